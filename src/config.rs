use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::application::DEFAULT_SERVER;

#[derive(Debug, Parser)]
#[command(name = "ocrdesk")]
#[command(about = "Pick an image, send it to a recognition server and copy the text", long_about = None)]
pub struct Cli {
    /// Image to select on startup
    pub image: Option<PathBuf>,

    /// Base URL of the recognition server
    #[arg(long, env = "OCRDESK_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory for log files (default: the user cache directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("ocrdesk")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ocrdesk"]);
        assert!(cli.image.is_none());
        assert_eq!(cli.request_timeout(), None);
        assert_eq!(cli.log_level, "info");
        assert!(cli.resolved_log_dir().ends_with("ocrdesk"));
    }

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::parse_from([
            "ocrdesk",
            "scan.png",
            "--server",
            "http://ocr.local:8080",
            "--timeout-secs",
            "30",
            "--log-dir",
            "/tmp/ocrdesk-logs",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.image, Some(PathBuf::from("scan.png")));
        assert_eq!(cli.server, "http://ocr.local:8080");
        assert_eq!(cli.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cli.resolved_log_dir(), PathBuf::from("/tmp/ocrdesk-logs"));
        assert_eq!(cli.log_level, "debug");
    }
}
