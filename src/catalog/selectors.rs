//! Markup markers for the store catalog and the supplier availability page.
//!
//! This file contains every tag name, class marker and CSS selector the
//! extractors depend on. Update it when either site changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Markers for catalog listing pages.
pub mod listing {
    use super::*;

    /// Primary content region; only products inside it are considered.
    pub static CONTENT_WRAPPER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div#content-wrapper").unwrap());

    /// Repeated product entry unit (class may carry several tokens).
    pub static ENTRY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("article[class*='product-miniature']").unwrap());

    /// Heading tag that opens the title scope.
    pub const TITLE_TAG: &str = "h2";

    /// Substring of the heading class marking a product title.
    pub const TITLE_CLASS: &str = "product-title";

    /// Anchor carrying the product link and name.
    pub const LINK_TAG: &str = "a";
}

/// Markers for product detail pages, matched against raw tokens.
pub mod detail {
    /// Container element type tracked by the availability scanner.
    pub const CONTAINER_TAG: &str = "div";

    /// Exact class of the quantity-selector container.
    pub const QUANTITY_CLASS: &str = "product-quantity";

    /// Exact class of the add-to-cart region inside the quantity selector.
    pub const ADD_CLASS: &str = "add";

    /// Clickable control that signals the product can be ordered.
    pub const CONTROL_TAG: &str = "button";
}

/// Markers for the supplier availability page.
pub mod stock {
    /// Table row tag holding one supplier item.
    pub const ROW_TAG: &str = "tr";

    /// Required prefix of the row class.
    pub const ROW_CLASS_PREFIX: &str = "Availability";

    /// Rows containing this phrase are variant selectors, not items.
    pub const OPTIONS_PHRASE: &str = "Pokaż opcje";

    pub const NAME_TAG: &str = "h2";
    pub const AVAILABILITY_TAG: &str = "h3";
    pub const CATALOG_NUMBER_TAG: &str = "strong";
    pub const LINK_TAG: &str = "a";
}
