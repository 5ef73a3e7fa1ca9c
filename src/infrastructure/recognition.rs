//! HTTP client for the recognition server.

use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};
use tracing::debug;

use crate::domain::{HealthStatus, PredictResponse, RecognizeError, RecognizeResult, SelectedFile};
use crate::error::AppError;

/// Multipart field the server reads the image from.
pub const IMAGE_FIELD: &str = "image";

/// The remote side of the workflow. Implementations are called from worker
/// threads, one request per call.
pub trait RecognitionService: Send + Sync {
    fn predict(&self, file: &SelectedFile) -> RecognizeResult<PredictResponse>;
    fn health(&self) -> RecognizeResult<HealthStatus>;
}

pub struct HttpRecognitionService {
    base_url: String,
    client: Client,
}

impl HttpRecognitionService {
    /// Builds a client for `base_url`. Without `timeout` requests wait until
    /// the transport resolves.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl RecognitionService for HttpRecognitionService {
    fn predict(&self, file: &SelectedFile) -> RecognizeResult<PredictResponse> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        let url = self.endpoint("predict");
        debug!(%url, bytes = file.len(), "POST");
        let response = self.client.post(&url).multipart(form).send()?;
        decode_json(response)
    }

    fn health(&self) -> RecognizeResult<HealthStatus> {
        let url = self.endpoint("health");
        debug!(%url, "GET");
        let response = self.client.get(&url).send()?;
        decode_json(response)
    }
}

/// Decodes a JSON body, mapping non-2xx statuses to [`RecognizeError::Status`].
fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> RecognizeResult<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(RecognizeError::Status(status_message(status, &body)));
    }
    Ok(serde_json::from_str(&body)?)
}

/// `400 Bad Request`, followed by the server's `error` field when it sent one.
fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string));
    match detail {
        Some(detail) => format!("{}: {}", status, detail),
        None => status.to_string(),
    }
}
