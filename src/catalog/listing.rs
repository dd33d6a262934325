//! Product extraction from catalog listing pages.

use crate::catalog::markup::{class_contains, direct_text};
use crate::catalog::models::Product;
use crate::catalog::selectors::listing;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Link and name captured from a title anchor.
#[derive(Debug, Default)]
struct TitleLink {
    url: Option<String>,
    name: Option<String>,
}

/// Extracts every product entry from a listing page, in document order.
///
/// Returns an empty list when the page has no content region or no complete
/// entries; the crawler treats that as the end of pagination.
pub fn extract_products(html: &str) -> Vec<Product> {
    let document = Html::parse_document(html);

    let Some(wrapper) = document.select(&listing::CONTENT_WRAPPER).next() else {
        debug!("No content wrapper found on listing page");
        return Vec::new();
    };

    let mut products = Vec::new();
    for entry in wrapper.select(&listing::ENTRY) {
        match product_from_entry(entry) {
            Some(product) => {
                trace!("Parsed product: {} - {}", product.name, product.url);
                products.push(product);
            }
            None => trace!("Skipping entry without title link"),
        }
    }

    debug!("Extracted {} products from listing page", products.len());
    products
}

/// Builds a product from one entry unit, or `None` if name or URL is missing.
fn product_from_entry(entry: ElementRef<'_>) -> Option<Product> {
    let link = find_title_link(entry, false)?;
    let url = link.url.filter(|url| !url.is_empty())?;
    let name = link.name.filter(|name| !name.is_empty())?;
    Some(Product::new(name, url))
}

/// Depth-first search for the first anchor inside a title heading.
///
/// `in_title` is the scope inherited from the parent; the nearest enclosing
/// heading decides the scope for its subtree.
fn find_title_link(element: ElementRef<'_>, in_title: bool) -> Option<TitleLink> {
    for child in element.children().filter_map(ElementRef::wrap) {
        let tag = child.value().name();

        let scope = if tag == listing::TITLE_TAG {
            class_contains(child, listing::TITLE_CLASS)
        } else {
            in_title
        };

        if scope && tag == listing::LINK_TAG {
            return Some(TitleLink {
                url: child.value().attr("href").map(str::to_string),
                name: direct_text(child),
            });
        }

        if let Some(link) = find_title_link(child, scope) {
            return Some(link);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_page(entries: &str) -> String {
        format!(
            r#"<html><body>
                <div id="header"><a href="/cart">Cart</a></div>
                <div id="content-wrapper"><section id="products">{}</section></div>
            </body></html>"#,
            entries
        )
    }

    fn entry(title_html: &str) -> String {
        format!(
            r#"<article class="product-miniature js-product-miniature">
                <div class="thumbnail-container"><a href="/img"><img src="x.jpg"></a></div>
                <div class="product-description">{}</div>
            </article>"#,
            title_html
        )
    }

    #[test]
    fn test_extract_single_product() {
        let html = listing_page(&entry(
            r#"<h2 class="h3 product-title"><a href="https://shop.pl/ares.html">Ares fotel</a></h2>"#,
        ));

        let products = extract_products(&html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Ares fotel");
        assert_eq!(products[0].url, "https://shop.pl/ares.html");
        assert!(!products[0].available);
    }

    #[test]
    fn test_missing_content_wrapper_yields_empty() {
        let html = format!(
            "<html><body><div id=\"main\">{}</div></body></html>",
            entry(r#"<h2 class="product-title"><a href="/a">A</a></h2>"#)
        );
        assert!(extract_products(&html).is_empty());
    }

    #[test]
    fn test_entries_outside_wrapper_ignored() {
        let html = format!(
            r#"<html><body>
                <div id="content-wrapper">{}</div>
                <aside>{}</aside>
            </body></html>"#,
            entry(r#"<h2 class="product-title"><a href="/in">Inside</a></h2>"#),
            entry(r#"<h2 class="product-title"><a href="/out">Outside</a></h2>"#)
        );

        let products = extract_products(&html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Inside");
    }

    #[test]
    fn test_entry_without_href_discarded() {
        let html = listing_page(&format!(
            "{}{}",
            entry(r#"<h2 class="product-title"><a href="/ares.html">Ares</a></h2>"#),
            entry(r#"<h2 class="product-title"><a>Patron</a></h2>"#)
        ));

        let products = extract_products(&html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Ares");
    }

    #[test]
    fn test_entry_without_name_discarded() {
        let html = listing_page(&entry(
            r#"<h2 class="product-title"><a href="/ares.html"><span>Ares</span></a></h2>"#,
        ));
        assert!(extract_products(&html).is_empty());
    }

    #[test]
    fn test_anchor_outside_title_ignored() {
        let html = listing_page(&entry(
            r#"<h2 class="product-name"><a href="/wrong">Wrong</a></h2>
               <a href="/loose">Loose</a>"#,
        ));
        assert!(extract_products(&html).is_empty());
    }

    #[test]
    fn test_title_heading_without_anchor_then_anchor_after() {
        // Scope closes when leaving the heading
        let html = listing_page(&entry(
            r#"<h2 class="product-title">No link</h2><a href="/after">After</a>"#,
        ));
        assert!(extract_products(&html).is_empty());
    }

    #[test]
    fn test_first_anchor_in_title_wins() {
        let html = listing_page(&entry(
            r#"<h2 class="product-title"><a href="/first">First</a><a href="/second">Second</a></h2>"#,
        ));

        let products = extract_products(&html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].url, "/first");
        assert_eq!(products[0].name, "First");
    }

    #[test]
    fn test_nearest_heading_decides_scope() {
        let html = listing_page(&entry(
            r#"<div class="product-title-wrap">
                <h2 class="product-title"><span><h2 class="subtitle"><a href="/inner">Inner</a></h2></span></h2>
            </div>"#,
        ));
        // Inner heading is not a title, so its anchor is out of scope
        assert!(extract_products(&html).is_empty());
    }

    #[test]
    fn test_name_is_trimmed_direct_text() {
        let html = listing_page(&entry(
            r#"<h2 class="product-title"><a href="/ares">
                Ares Fotel gabinetowy <span class="badge">NEW</span>
            </a></h2>"#,
        ));

        let products = extract_products(&html);
        assert_eq!(products[0].name, "Ares Fotel gabinetowy");
    }

    #[test]
    fn test_document_order_preserved() {
        let entries: String = ["Zeus", "Ares", "Hera"]
            .iter()
            .map(|name| {
                entry(&format!(
                    r#"<h2 class="product-title"><a href="/{}">{}</a></h2>"#,
                    name.to_lowercase(),
                    name
                ))
            })
            .collect();

        let names: Vec<_> =
            extract_products(&listing_page(&entries)).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Zeus", "Ares", "Hera"]);
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_products("").is_empty());
        assert!(extract_products(&listing_page("")).is_empty());
    }
}
