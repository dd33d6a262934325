//! restock-crawler - catalog availability crawler and supplier reconciliation
//!
//! Crawls a paginated store catalog, checks each product page for an
//! add-to-cart control, and matches the out-of-stock products against a
//! supplier's availability listing to produce a restock report.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod report;
pub mod stock;

pub use catalog::models::{AvailabilityRecord, Product, ReportRow};
pub use config::Config;
pub use error::RestockError;
