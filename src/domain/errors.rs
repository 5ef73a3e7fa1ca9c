use thiserror::Error;

/// Why a recognition (or health) request did not produce text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecognizeError {
    /// The server answered and reported a failure of its own.
    #[error("{0}")]
    Server(String),
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("server returned {0}")]
    Status(String),
    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RecognizeError {
    fn from(err: reqwest::Error) -> Self {
        RecognizeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RecognizeError {
    fn from(err: serde_json::Error) -> Self {
        RecognizeError::Decode(err.to_string())
    }
}

/// Failure to turn a chosen path into a selected file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickError {
    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("{path} is not a file")]
    NotAFile { path: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreviewError {
    #[error("cannot decode image: {0}")]
    Decode(String),
}

pub type RecognizeResult<T> = Result<T, RecognizeError>;
