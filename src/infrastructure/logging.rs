use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

pub const LOG_FILE_PREFIX: &str = "ocrdesk.log";

/// Installs a file logger under `log_dir`, rotated daily.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
/// `RUST_LOG` takes precedence over `level`. Keep the returned guard alive
/// for the lifetime of the program or buffered lines are lost.
pub fn init_logging(log_dir: &Path, level: &str) -> Result<WorkerGuard, AppError> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| AppError::Logging(format!("{}: {}", log_dir.display(), e)))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
