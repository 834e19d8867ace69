//! Error types shared across the scraper.
//!
//! Every fallible operation in the crate returns [`Result`]. Per-item failures
//! (a single recipe page, a single image) are logged by the caller and
//! skipped; only client construction, configuration loading, and output
//! writing surface to `main`.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Video host not enabled for download: {0}")]
    UnsupportedVideoHost(String),

    #[error("Video download failed: {0}")]
    VideoDownload(String),
}
