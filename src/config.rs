//! Runtime configuration for the scraper.
//!
//! All process-wide settings (the identifying `User-Agent`, politeness
//! delays, media locations) live in a single [`ScraperConfig`] value that is
//! handed to the fetcher and scraper at construction. Nothing here is global
//! or mutable after startup.
//!
//! Configuration may be loaded from a YAML file; any field left out falls
//! back to its default, so an empty file is a valid configuration.
//!
//! ```yaml
//! catalog_url: https://iba-world.com/cocktails/all-cocktails/
//! page_delay_ms: 500
//! recipe_delay_ms: 1000
//! video_download_hosts:
//!   - youtube.com
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://iba-world.com";
pub const DEFAULT_CATALOG_URL: &str = "https://iba-world.com/cocktails/all-cocktails/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Settings for a scraping run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site root used to resolve relative links and media.
    pub base_url: String,
    /// First catalog page; later pages are `{catalog_url}page/{n}/`.
    pub catalog_url: String,
    /// Browser-like identifying header sent with every request.
    pub user_agent: String,
    /// Pause between catalog pages.
    pub page_delay_ms: u64,
    /// Pause between recipe detail pages.
    pub recipe_delay_ms: u64,
    /// A catalog page yielding fewer new links than this ends pagination.
    pub min_links_per_page: usize,
    pub images_dir: PathBuf,
    pub videos_dir: PathBuf,
    /// Substrings a video URL must contain for the downloader to fetch it.
    pub video_download_hosts: Vec<String>,
    pub max_video_height: u32,
    /// Path or name of the external video downloader binary.
    pub yt_dlp_path: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_delay_ms: 500,
            recipe_delay_ms: 1000,
            min_links_per_page: 5,
            images_dir: PathBuf::from("images"),
            videos_dir: PathBuf::from("videos"),
            video_download_hosts: vec!["youtube.com".to_string()],
            max_video_height: 1080,
            yt_dlp_path: "yt-dlp".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a YAML file.
    #[instrument(level = "info")]
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&raw)?;
        info!("Loaded scraper configuration");
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn recipe_delay(&self) -> Duration {
        Duration::from_millis(self.recipe_delay_ms)
    }

    /// URL of the `page`-th catalog page (1-based).
    pub fn catalog_page_url(&self, page: usize) -> String {
        if page <= 1 {
            self.catalog_url.clone()
        } else {
            format!("{}page/{}/", self.catalog_url, page)
        }
    }
}
