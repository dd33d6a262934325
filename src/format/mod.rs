//! Output formatting for products and availability records (table, JSON, CSV).

use crate::catalog::models::{AvailabilityRecord, Product};
use crate::config::OutputFormat;
use crate::report::writer::DELIMITER;
use serde::Serialize;

const NAME_WIDTH: usize = 50;

/// Formats crawl results for the terminal.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats catalog products.
    pub fn format_products(&self, products: &[Product]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(products),
            OutputFormat::Csv => Self::csv(products),
            OutputFormat::Table if products.is_empty() => "No products found.".to_string(),
            OutputFormat::Table => self.table_products(products),
        }
    }

    /// Formats supplier availability records.
    pub fn format_records(&self, records: &[AvailabilityRecord]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(records),
            OutputFormat::Csv => Self::csv(records),
            OutputFormat::Table if records.is_empty() => {
                "No availability records found.".to_string()
            }
            OutputFormat::Table => self.table_records(records),
        }
    }

    fn json<T: Serialize>(items: &[T]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    fn csv<T: Serialize>(items: &[T]) -> String {
        let mut writer =
            csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(Vec::new());

        for item in items {
            if writer.serialize(item).is_err() {
                return String::new();
            }
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_default()
    }

    fn table_products(&self, products: &[Product]) -> String {
        let name_width = NAME_WIDTH;
        let mut lines = Vec::new();

        lines.push(format!("{:<name_width$}  {:<11}  {}", "Name", "Stock", "URL"));
        lines.push(format!("{:-<name_width$}  {:-<11}  {:-<30}", "", "", ""));

        for product in products {
            let stock = if product.available { "available" } else { "unavailable" };
            lines.push(format!(
                "{:<name_width$}  {:<11}  {}",
                truncate(&product.name, NAME_WIDTH),
                stock,
                product.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    fn table_records(&self, records: &[AvailabilityRecord]) -> String {
        let name_width = NAME_WIDTH;
        let mut lines = Vec::new();

        lines.push(format!(
            "{:<name_width$}  {:<12}  {:<25}  {}",
            "Name", "Catalog", "Availability", "Link"
        ));
        lines.push(format!("{:-<name_width$}  {:-<12}  {:-<25}  {:-<30}", "", "", "", ""));

        for record in records {
            lines.push(format!(
                "{:<name_width$}  {:<12}  {:<25}  {}",
                truncate(&record.name, NAME_WIDTH),
                record.catalog_number,
                truncate(&record.availability, 25),
                record.link
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} records", records.len()));

        lines.join("\n")
    }
}

/// Truncates on character boundaries, marking cut text with "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
