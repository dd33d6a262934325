//! Restock report command: crawl, check availability, reconcile, write CSV.

use crate::catalog::{HttpClient, PageFetch};
use crate::commands::check::{check_products, unavailable};
use crate::commands::crawl::crawl_catalog;
use crate::commands::parse_url;
use crate::commands::stock::fetch_stock;
use crate::config::Config;
use crate::error::RestockError;
use crate::report::{build_report, write_report};
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub products: usize,
    pub unavailable: usize,
    pub matched: usize,
    pub output: PathBuf,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Products checked:    {}", self.products)?;
        writeln!(f, "Unavailable:         {}", self.unavailable)?;
        writeln!(f, "Matched at supplier: {}", self.matched)?;
        write!(f, "Restock report written to {}", self.output.display())
    }
}

/// Runs the full reconciliation pipeline.
pub struct ReportCommand {
    config: Config,
}

impl ReportCommand {
    /// Creates a new report command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline against the live sites.
    pub async fn execute(&self) -> Result<ReportSummary> {
        let client = HttpClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Runs the pipeline with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<ReportSummary> {
        let catalog = parse_url(&self.config.catalog_url)?;

        info!("Starting product scrape...");
        let mut products = crawl_catalog(client, &self.config).await?;
        let total = products.len();

        check_products(client, &mut products, &catalog).await;

        let out_of_stock = unavailable(products);
        let unavailable_count = out_of_stock.len();
        info!("Found {} unavailable products", unavailable_count);

        let records = fetch_stock(client, &self.config).await?;
        if records.is_empty() {
            let url = self.config.stock_url.clone();
            return Err(RestockError::EmptyStockSource { url }.into());
        }

        let rows = build_report(out_of_stock, &records);
        let matched = rows.iter().filter(|row| row.is_matched()).count();

        write_report(&rows, &self.config.output)?;

        Ok(ReportSummary {
            products: total,
            unavailable: unavailable_count,
            matched,
            output: self.config.output.clone(),
        })
    }
}
