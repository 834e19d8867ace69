//! Media download for scraped recipes.
//!
//! Images are fetched over HTTP and written to the images directory. Videos
//! are handed to an external downloader ([`VideoFetcher`], by default
//! `yt-dlp`) when the link belongs to one of the configured download hosts.
//!
//! The locator recognizes both YouTube and Vimeo links, but only hosts listed
//! in `video_download_hosts` are downloaded (default: `youtube.com`). Any
//! other recognized video is skipped with a warning and keeps its remote URL.
//!
//! Files are named after the cocktail:
//!
//! ```text
//! images/Planters_Punch.webp
//! videos/Planters_Punch.mp4
//! ```

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::Fetch;
use crate::locate::VideoHost;
use crate::models::Recipe;
use crate::text::safe_file_stem;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info, instrument, warn};

const DEFAULT_IMAGE_EXTENSION: &str = ".webp";
const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// External capability that downloads one video to a templated path.
pub trait VideoFetcher {
    /// Download `url` using `output_template` (with a `%(ext)s` placeholder).
    ///
    /// Returns the final file path when the tool reports one.
    async fn download(&self, url: &str, output_template: &str) -> Result<Option<PathBuf>>;
}

/// [`VideoFetcher`] backed by the `yt-dlp` command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    max_height: u32,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>, max_height: u32) -> Self {
        Self {
            binary: binary.into(),
            max_height,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.yt_dlp_path.clone(), config.max_video_height)
    }

    fn args(&self, url: &str, output_template: &str) -> Vec<String> {
        vec![
            "-f".to_string(),
            format!("best[height<={}]", self.max_height),
            "-o".to_string(),
            output_template.to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            url.to_string(),
        ]
    }
}

impl VideoFetcher for YtDlp {
    #[instrument(level = "info", skip(self))]
    async fn download(&self, url: &str, output_template: &str) -> Result<Option<PathBuf>> {
        let output = Command::new(&self.binary)
            .args(self.args(url, output_template))
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScrapeError::VideoDownload(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .map(PathBuf::from))
    }
}

/// File extension (with dot) for an image URL, `.webp` when none is visible.
pub fn image_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    match last_segment.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{ext}"),
        _ => DEFAULT_IMAGE_EXTENSION.to_string(),
    }
}

/// Downloads recipe media into the configured directories.
pub struct MediaDownloader<'a, F, V> {
    fetcher: &'a F,
    video_fetcher: V,
    config: &'a ScraperConfig,
}

impl<'a, F: Fetch, V: VideoFetcher> MediaDownloader<'a, F, V> {
    pub fn new(fetcher: &'a F, video_fetcher: V, config: &'a ScraperConfig) -> Self {
        Self {
            fetcher,
            video_fetcher,
            config,
        }
    }

    /// Create the images and videos directories.
    pub async fn setup_folders(&self) -> Result<()> {
        fs::create_dir_all(&self.config.images_dir).await?;
        fs::create_dir_all(&self.config.videos_dir).await?;
        info!(
            images = %self.config.images_dir.display(),
            videos = %self.config.videos_dir.display(),
            "Created media folders"
        );
        Ok(())
    }

    /// Fetch `url` and save it as `{images_dir}/{safe name}{ext}`.
    #[instrument(level = "info", skip(self))]
    pub async fn download_image(&self, url: &str, name: &str) -> Result<PathBuf> {
        let file_name = format!("{}{}", safe_file_stem(name), image_extension(url));
        let path = self.config.images_dir.join(file_name);

        let bytes = self.fetcher.fetch_bytes(url).await?;
        fs::write(&path, bytes).await?;
        info!(path = %path.display(), "Downloaded image");
        Ok(path)
    }

    fn video_host_enabled(&self, url: &str) -> bool {
        self.config
            .video_download_hosts
            .iter()
            .any(|host| url.contains(host.as_str()))
    }

    /// Download a video through the external fetcher, if its host is
    /// enabled for download.
    #[instrument(level = "info", skip(self))]
    pub async fn download_video(&self, url: &str, name: &str) -> Result<PathBuf> {
        if !self.video_host_enabled(url) {
            let host = VideoHost::detect(url)
                .map(|h| format!("{h:?}"))
                .unwrap_or_else(|| url.to_string());
            return Err(ScrapeError::UnsupportedVideoHost(host));
        }

        let stem = safe_file_stem(name);
        let template = self.config.videos_dir.join(format!("{stem}.%(ext)s"));
        let reported = self
            .video_fetcher
            .download(url, &template.to_string_lossy())
            .await?;

        let path = reported.unwrap_or_else(|| {
            self.config
                .videos_dir
                .join(format!("{stem}.{DEFAULT_VIDEO_EXTENSION}"))
        });
        info!(path = %path.display(), "Downloaded video");
        Ok(path)
    }

    /// Download media for every recipe, in order.
    ///
    /// # Arguments
    ///
    /// * `recipes` - Scraped recipes whose `image`/`video` URLs are fetched
    ///
    /// # Returns
    ///
    /// The same recipes with `local_image`/`local_video` set where a download
    /// succeeded. Failures are logged and leave the recipe with only its
    /// remote URLs.
    ///
    /// # Errors
    ///
    /// Only when the media directories cannot be created.
    #[instrument(level = "info", skip_all, fields(count = recipes.len()))]
    pub async fn download_all(&self, recipes: Vec<Recipe>) -> Result<Vec<Recipe>> {
        self.setup_folders().await?;

        let mut updated = Vec::with_capacity(recipes.len());
        for mut recipe in recipes {
            info!(name = %recipe.name, "Downloading media");

            if let Some(image) = recipe.image.clone() {
                match self.download_image(&image, &recipe.name).await {
                    Ok(path) => recipe.local_image = Some(path_string(&path)),
                    Err(e) => error!(name = %recipe.name, %image, error = %e, "Image download failed"),
                }
            }

            if let Some(video) = recipe.video.clone() {
                match self.download_video(&video, &recipe.name).await {
                    Ok(path) => recipe.local_video = Some(path_string(&path)),
                    Err(e @ ScrapeError::UnsupportedVideoHost(_)) => {
                        warn!(name = %recipe.name, %video, error = %e, "Skipping video download")
                    }
                    Err(e) => error!(name = %recipe.name, %video, error = %e, "Video download failed"),
                }
            }

            updated.push(recipe);
        }

        info!(count = updated.len(), "Completed media download");
        Ok(updated)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeFetch;

    impl Fetch for FakeFetch {
        async fn fetch_text(&self, _url: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            if url.contains("missing") {
                return Err(ScrapeError::VideoDownload("404".into()));
            }
            Ok(b"image-bytes".to_vec())
        }
    }

    #[derive(Default)]
    struct RecordingVideoFetcher {
        calls: RefCell<Vec<(String, String)>>,
        reported: Option<PathBuf>,
    }

    impl VideoFetcher for &RecordingVideoFetcher {
        async fn download(&self, url: &str, output_template: &str) -> Result<Option<PathBuf>> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), output_template.to_string()));
            Ok(self.reported.clone())
        }
    }

    fn config_in(dir: &Path) -> ScraperConfig {
        ScraperConfig {
            images_dir: dir.join("images"),
            videos_dir: dir.join("videos"),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://iba-world.com/a/negroni.jpg"), ".jpg");
        assert_eq!(image_extension("https://iba-world.com/a/negroni.png?ver=1.2"), ".png");
        assert_eq!(image_extension("https://iba-world.com/a/negroni"), ".webp");
        assert_eq!(image_extension("https://cdn.iba-world.com/image/"), ".webp");
    }

    #[test]
    fn test_yt_dlp_args() {
        let args = YtDlp::new("yt-dlp", 1080).args("https://youtu.be/x", "videos/Negroni.%(ext)s");
        assert_eq!(args[0..4], ["-f", "best[height<=1080]", "-o", "videos/Negroni.%(ext)s"]);
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.contains(&"--no-warnings".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/x"));
    }

    #[tokio::test]
    async fn test_download_image_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let video = RecordingVideoFetcher::default();
        let downloader = MediaDownloader::new(&FakeFetch, &video, &config);
        downloader.setup_folders().await.unwrap();

        let path = downloader
            .download_image("https://iba-world.com/img/planters-punch.jpg", "Planter's Punch")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("images").join("Planters_Punch.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"image-bytes");
    }

    #[tokio::test]
    async fn test_download_video_uses_template_and_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let video = RecordingVideoFetcher::default();
        let downloader = MediaDownloader::new(&FakeFetch, &video, &config);

        let path = downloader
            .download_video("https://www.youtube.com/watch?v=abc", "Dry Martini")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("videos").join("Dry_Martini.mp4"));

        let calls = video.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.ends_with("Dry_Martini.%(ext)s"));
    }

    #[tokio::test]
    async fn test_download_video_skips_hosts_not_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let video = RecordingVideoFetcher::default();
        let downloader = MediaDownloader::new(&FakeFetch, &video, &config);

        let err = downloader
            .download_video("https://vimeo.com/123456", "Bellini")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::UnsupportedVideoHost(ref h) if h == "Vimeo"));
        assert!(video.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_download_all_keeps_remote_urls_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let video = RecordingVideoFetcher {
            reported: Some(PathBuf::from("videos/Negroni.webm")),
            ..Default::default()
        };
        let downloader = MediaDownloader::new(&FakeFetch, &video, &config);

        let recipes = vec![
            Recipe {
                name: "Negroni".into(),
                image: Some("https://iba-world.com/img/negroni.webp".into()),
                video: Some("https://www.youtube.com/watch?v=neg".into()),
                ..Default::default()
            },
            Recipe {
                name: "Bellini".into(),
                image: Some("https://iba-world.com/img/missing.webp".into()),
                video: Some("https://vimeo.com/42".into()),
                ..Default::default()
            },
        ];

        let updated = downloader.download_all(recipes).await.unwrap();
        assert!(dir.path().join("images").is_dir());
        assert!(dir.path().join("videos").is_dir());

        assert!(updated[0].local_image.as_deref().unwrap().ends_with("Negroni.webp"));
        assert_eq!(updated[0].local_video.as_deref(), Some("videos/Negroni.webm"));

        assert_eq!(updated[1].local_image, None);
        assert_eq!(updated[1].local_video, None);
        assert_eq!(updated[1].image.as_deref(), Some("https://iba-world.com/img/missing.webp"));
        assert_eq!(updated[1].video.as_deref(), Some("https://vimeo.com/42"));
    }
}
