//! First-token matching of unavailable products against supplier records.
//!
//! The two sources name products inconsistently, so only the first word of
//! the catalog name is compared. The first record containing it wins.

use crate::catalog::models::{AvailabilityRecord, Product, ReportRow};
use tracing::debug;

/// Lowercases, strips commas and periods, and splits on whitespace.
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .replace([',', '.'], "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// First token of a normalized name, if any.
pub fn first_token(name: &str) -> Option<String> {
    tokenize(name).into_iter().next()
}

/// Finds the first record whose lowercased name contains the product's first token.
pub fn find_match<'a>(
    product: &Product,
    records: &'a [AvailabilityRecord],
) -> Option<&'a AvailabilityRecord> {
    let token = first_token(&product.name)?;
    records.iter().find(|record| record.name.to_lowercase().contains(&token))
}

/// Builds one report row per unavailable product, preserving input order.
pub fn build_report(unavailable: Vec<Product>, records: &[AvailabilityRecord]) -> Vec<ReportRow> {
    unavailable
        .iter()
        .map(|product| match find_match(product, records) {
            Some(record) => {
                debug!("Matched '{}' -> '{}'", product.name, record.name);
                ReportRow::matched(product, record)
            }
            None => {
                debug!("No supplier record for '{}'", product.name);
                ReportRow::unmatched(product)
            }
        })
        .collect()
}
