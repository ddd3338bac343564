//! Page fetching — retrieves the raw text of a careers page.
//!
//! The fetcher sits behind a trait so the pipeline can be exercised in tests
//! without network access. Failures surface as `AppError::Fetch`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::AppError;

/// The fetch seam. Production uses `HttpFetcher`; tests substitute a mock.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the raw body of the page at `url`.
    async fn fetch(&self, url: &str) -> Result<String, AppError>;
}

/// HTTP fetcher with a browser-ish User-Agent; some careers pages refuse
/// requests without one.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent("Mozilla/5.0 (compatible; coldmail-api/0.1)")
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch '{url}': {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "Fetching '{url}' returned status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read body of '{url}': {e}")))?;

        debug!("Fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}
