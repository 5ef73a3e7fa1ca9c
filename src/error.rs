use thiserror::Error;

/// Failures that stop the program before or outside the event loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("cannot build HTTP client: {0}")]
    Client(String),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
