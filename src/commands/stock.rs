//! Supplier availability command.

use crate::catalog::{AvailabilityRecord, HttpClient, PageFetch};
use crate::commands::parse_url;
use crate::config::Config;
use crate::error::RestockError;
use crate::format::Formatter;
use crate::stock::StockParser;
use anyhow::{Context, Result};
use tracing::info;

/// Prints the supplier's availability listing.
pub struct StockCommand {
    config: Config,
}

impl StockCommand {
    /// Creates a new stock command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the supplier page and returns formatted records.
    pub async fn execute(&self) -> Result<String> {
        let client = HttpClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Fetches with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<String> {
        let records = fetch_stock(client, &self.config).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_records(&records))
    }
}

/// Fetches and parses the supplier availability page.
///
/// Unlike catalog pages, a fetch failure here is an error: nothing can be
/// reconciled without it.
pub async fn fetch_stock(
    client: &impl PageFetch,
    config: &Config,
) -> Result<Vec<AvailabilityRecord>, RestockError> {
    let base = parse_url(&config.stock_base_url)?;

    info!("Fetching supplier availability from {}", config.stock_url);
    let html = client.fetch(&config.stock_url).await.map_err(|e| RestockError::StockSource {
        url: config.stock_url.clone(),
        source: e.into(),
    })?;

    let records = StockParser::new(base).parse(&html);
    info!("Found {} supplier records", records.len());

    Ok(records)
}
