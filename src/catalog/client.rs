//! Page fetching for both sites. Requests impersonate Chrome through wreq.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Source of page bodies. Commands take this so tests can serve canned HTML.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches a page and returns its body as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Shared wreq client with a cookie jar and compression.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Applies the configured timeout and optional proxy.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy) = config.proxy.as_deref() {
            debug!(proxy, "routing requests through proxy");
            builder = builder.proxy(wreq::Proxy::all(proxy).context("Invalid proxy URL")?);
        }

        Ok(Self { client: builder.build().context("Cannot build HTTP client")? })
    }
}

#[async_trait]
impl PageFetch for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "pl-PL,pl;q=0.9,en;q=0.8")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!(%status, url, "response");

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status: {}", url, status);
        }

        response.text().await.with_context(|| format!("Failed to read body of {}", url))
    }
}
