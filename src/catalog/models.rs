//! Data models for catalog products, supplier availability records, and report rows.

use serde::{Deserialize, Serialize};

/// Availability label used when no supplier record matches a product.
pub const NOT_FOUND: &str = "Not found";

/// A product listed in the store catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name as shown in the listing
    pub name: String,
    /// Detail page URL (absolute or site-relative)
    pub url: String,
    /// Whether the detail page offers an add-to-cart control
    pub available: bool,
}

impl Product {
    /// Creates a product with availability not yet determined.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), available: false }
    }
}

/// A row from the supplier's availability listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Supplier product name
    pub name: String,
    /// Supplier catalog number
    pub catalog_number: String,
    /// Free-form availability label (e.g. "Dostępny od ręki")
    pub availability: String,
    /// Absolute link to the supplier page
    pub link: String,
}

/// One line of the restock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Original Name")]
    pub original_name: String,
    #[serde(rename = "Matched Unique Name")]
    pub matched_name: String,
    #[serde(rename = "Catalog Number")]
    pub catalog_number: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Availability")]
    pub availability: String,
}

impl ReportRow {
    /// Row for a product matched against a supplier record.
    pub fn matched(product: &Product, record: &AvailabilityRecord) -> Self {
        Self {
            original_name: product.name.clone(),
            matched_name: record.name.clone(),
            catalog_number: record.catalog_number.clone(),
            url: record.link.clone(),
            availability: record.availability.clone(),
        }
    }

    /// Row for a product with no supplier counterpart.
    pub fn unmatched(product: &Product) -> Self {
        Self {
            original_name: product.name.clone(),
            matched_name: String::new(),
            catalog_number: String::new(),
            url: String::new(),
            availability: NOT_FOUND.to_string(),
        }
    }

    /// Returns true if a supplier record was found for this row.
    pub fn is_matched(&self) -> bool {
        !self.matched_name.is_empty() || self.availability != NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> AvailabilityRecord {
        AvailabilityRecord {
            name: "ARES Fotel biurowy skóra".to_string(),
            catalog_number: "U-1042".to_string(),
            availability: "Dostępny od ręki".to_string(),
            link: "http://old.unique-meble.pl/ares.html".to_string(),
        }
    }

    #[test]
    fn test_product_new_defaults_unavailable() {
        let product = Product::new("Ares fotel", "/fotele/ares.html");
        assert_eq!(product.name, "Ares fotel");
        assert_eq!(product.url, "/fotele/ares.html");
        assert!(!product.available);
    }

    #[test]
    fn test_report_row_matched() {
        let product = Product::new("Ares fotel gabinetowy", "https://example.com/ares");
        let row = ReportRow::matched(&product, &make_record());

        assert_eq!(row.original_name, "Ares fotel gabinetowy");
        assert_eq!(row.matched_name, "ARES Fotel biurowy skóra");
        assert_eq!(row.catalog_number, "U-1042");
        assert_eq!(row.url, "http://old.unique-meble.pl/ares.html");
        assert_eq!(row.availability, "Dostępny od ręki");
        assert!(row.is_matched());
    }

    #[test]
    fn test_report_row_unmatched() {
        let product = Product::new("Zeus fotel", "https://example.com/zeus");
        let row = ReportRow::unmatched(&product);

        assert_eq!(row.original_name, "Zeus fotel");
        assert!(row.matched_name.is_empty());
        assert!(row.catalog_number.is_empty());
        assert!(row.url.is_empty());
        assert_eq!(row.availability, NOT_FOUND);
        assert!(!row.is_matched());
    }

    #[test]
    fn test_report_row_serde_uses_report_headers() {
        let product = Product::new("Ares", "u");
        let json = serde_json::to_string(&ReportRow::unmatched(&product)).unwrap();
        assert!(json.contains("\"Original Name\""));
        assert!(json.contains("\"Matched Unique Name\""));
        assert!(json.contains("\"Availability\":\"Not found\""));
    }

    #[test]
    fn test_record_serde() {
        let record = make_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AvailabilityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
