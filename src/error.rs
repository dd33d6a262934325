//! Fatal error conditions of a reconciliation run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestockError {
    #[error("failed to fetch availability source {url}")]
    StockSource {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("availability source {url} yielded no records; refusing to write a report")]
    EmptyStockSource { url: String },

    #[error("failed to write report to {}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
