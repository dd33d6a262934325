//! Store catalog: HTTP client, listing and detail page extraction, and data models.

pub mod availability;
pub mod client;
pub mod listing;
pub mod markup;
pub mod models;
pub mod selectors;
pub mod tokens;

pub use availability::is_available;
pub use client::{HttpClient, PageFetch};
pub use listing::extract_products;
pub use models::{AvailabilityRecord, Product, ReportRow};
