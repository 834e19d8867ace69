//! HTTP access to the recipe site.
//!
//! [`Fetch`] is the seam between the scraping logic and the network: the
//! pipeline only ever asks for a page's text or a file's bytes.
//! [`HttpFetcher`] implements it with a single `reqwest` client whose
//! identifying header comes from [`ScraperConfig`]. No retries, no backoff,
//! no timeouts beyond reqwest's defaults.

use crate::config::ScraperConfig;
use crate::error::Result;
use reqwest::Client;
use tracing::{debug, instrument};

/// Something that can GET a URL.
pub trait Fetch {
    /// Body of a successful response as text. Non-2xx statuses are errors.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Body of a successful response as raw bytes.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the shared client. Failing here is fatal for the run.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent.as_str()).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Fetched file");
        Ok(bytes.to_vec())
    }
}
