//! HTML parser for the supplier availability listing.

use crate::catalog::markup::{class_starts_with, leading_text, resolve_url, subtree_contains_text};
use crate::catalog::models::AvailabilityRecord;
use crate::catalog::selectors::stock;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};
use url::Url;

/// Extracts availability records, resolving links against a configured base.
pub struct StockParser {
    base: Url,
}

impl StockParser {
    /// Creates a parser that resolves row links against `base`.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Parses every qualifying item row of the availability page, in document order.
    pub fn parse(&self, html: &str) -> Vec<AvailabilityRecord> {
        let document = Html::parse_document(html);

        let mut rows = Vec::new();
        collect_item_rows(document.root_element(), &mut rows);

        let records: Vec<_> = rows.into_iter().filter_map(|row| self.parse_row(row)).collect();

        debug!("Extracted {} availability records", records.len());
        records
    }

    /// Reads one row in a single walk; the first element of each kind wins.
    fn parse_row(&self, row: ElementRef<'_>) -> Option<AvailabilityRecord> {
        let mut name = None;
        let mut availability = None;
        let mut catalog_number = None;
        let mut link = None;

        for element in row.descendants().filter_map(ElementRef::wrap) {
            match element.value().name() {
                stock::NAME_TAG if name.is_none() => name = leading_text(element),
                stock::AVAILABILITY_TAG if availability.is_none() => {
                    availability = leading_text(element)
                }
                stock::CATALOG_NUMBER_TAG if catalog_number.is_none() => {
                    catalog_number = leading_text(element)
                }
                stock::LINK_TAG if link.is_none() => {
                    link = element.value().attr("href").map(|href| resolve_url(&self.base, href))
                }
                _ => {}
            }
        }

        let name = name.unwrap_or_default();
        let availability = availability.unwrap_or_default();

        if name.is_empty() && availability.is_empty() {
            trace!("Skipping row without name or availability");
            return None;
        }

        Some(AvailabilityRecord {
            name,
            catalog_number: catalog_number.unwrap_or_default(),
            availability,
            link: link.unwrap_or_default(),
        })
    }
}

/// Depth-first search for item rows; descent stops at a qualifying row.
fn collect_item_rows<'a>(element: ElementRef<'a>, rows: &mut Vec<ElementRef<'a>>) {
    if is_item_row(element) {
        rows.push(element);
        return;
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        collect_item_rows(child, rows);
    }
}

fn is_item_row(element: ElementRef<'_>) -> bool {
    element.value().name() == stock::ROW_TAG
        && class_starts_with(element, stock::ROW_CLASS_PREFIX)
        && !subtree_contains_text(element, stock::OPTIONS_PHRASE)
}
