use std::path::{Path, PathBuf};
use serde::Deserialize;

use super::errors::RecognizeError;
use super::preview::Preview;

/// The image the user picked, held in memory until it is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(path: PathBuf, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = content_type_for(&path).to_string();
        Self {
            path,
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Human readable size, e.g. `12.3 KB`.
    pub fn display_size(&self) -> String {
        let len = self.len() as f64;
        if len < 1024.0 {
            format!("{} B", self.len())
        } else if len < 1024.0 * 1024.0 {
            format!("{:.1} KB", len / 1024.0)
        } else {
            format!("{:.1} MB", len / (1024.0 * 1024.0))
        }
    }
}

/// Guesses the multipart content type from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// A file that finished reading, together with its rendered preview.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub file: SelectedFile,
    pub preview: Preview,
}

/// Body of a `/predict` response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictResponse {
    pub fn recognized(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.into()),
        }
    }

    /// Collapses the response into the recognized text or the server's reason.
    pub fn into_text(self) -> Result<String, RecognizeError> {
        if self.success {
            Ok(self.text.unwrap_or_default())
        } else {
            Err(RecognizeError::Server(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// Body of a `/health` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.status == "ok" && self.model_loaded
    }
}
