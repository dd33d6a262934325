//! Helpers over the parsed markup tree shared by the extractors.

use scraper::ElementRef;
use url::Url;

/// Returns true if the element's class attribute contains `marker` as a substring.
pub fn class_contains(element: ElementRef<'_>, marker: &str) -> bool {
    element.value().attr("class").is_some_and(|class| class.contains(marker))
}

/// Returns true if the element's class attribute starts with `prefix`.
pub fn class_starts_with(element: ElementRef<'_>, prefix: &str) -> bool {
    element.value().attr("class").is_some_and(|class| class.starts_with(prefix))
}

/// Trimmed text of the first direct text child that is not blank.
///
/// Text inside nested elements is not considered.
pub fn direct_text(element: ElementRef<'_>) -> Option<String> {
    element.children().find_map(|node| {
        node.value()
            .as_text()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Trimmed text of the element's leading child, if that child is a text node.
pub fn leading_text(element: ElementRef<'_>) -> Option<String> {
    element
        .first_child()?
        .value()
        .as_text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Case-insensitive search for `needle` inside any single text node of the subtree.
pub fn subtree_contains_text(element: ElementRef<'_>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    element.text().any(|text| text.to_lowercase().contains(&needle))
}

/// Resolves `href` against `base`, falling back to the raw value when it cannot be joined.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href).map(String::from).unwrap_or_else(|_| href.to_string())
}
