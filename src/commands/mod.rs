//! CLI command implementations.

pub mod check;
pub mod crawl;
pub mod report;
pub mod stock;

pub use check::CheckCommand;
pub use crawl::CrawlCommand;
pub use report::{ReportCommand, ReportSummary};
pub use stock::StockCommand;

use crate::error::RestockError;
use url::Url;

/// Parses a configured URL.
pub(crate) fn parse_url(raw: &str) -> Result<Url, RestockError> {
    Url::parse(raw)
        .map_err(|e| RestockError::InvalidUrl { url: raw.to_string(), reason: e.to_string() })
}
