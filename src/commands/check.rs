//! Availability checks for product detail pages.

use crate::catalog::markup::resolve_url;
use crate::catalog::{is_available, HttpClient, PageFetch, Product};
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::{info, warn};
use url::Url;

/// Checks individual detail pages given on the command line.
pub struct CheckCommand {
    config: Config,
}

impl CheckCommand {
    /// Creates a new check command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Checks each URL and returns one line per page.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let client = HttpClient::new(&self.config).await.context("Failed to create HTTP client")?;

        Ok(self.execute_with_client(&client, urls).await)
    }

    /// Checks with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch, urls: &[String]) -> String {
        let mut lines = Vec::with_capacity(urls.len());

        for url in urls {
            let status =
                if check_availability(client, url).await { "available" } else { "unavailable" };
            lines.push(format!("{:<11}  {}", status, url));
        }

        lines.join("\n")
    }
}

/// Fetches a detail page and scans it for an add-to-cart control.
///
/// A page that cannot be fetched counts as unavailable.
pub async fn check_availability(client: &impl PageFetch, url: &str) -> bool {
    match client.fetch(url).await {
        Ok(html) => is_available(&html),
        Err(e) => {
            warn!("Error checking product page {}: {:#}", url, e);
            false
        }
    }
}

/// Sets `available` on every product, resolving relative URLs against `base`.
pub async fn check_products(client: &impl PageFetch, products: &mut [Product], base: &Url) {
    let total = products.len();
    info!("Checking availability for {} products...", total);

    for (i, product) in products.iter_mut().enumerate() {
        let url = resolve_url(base, &product.url);
        product.available = check_availability(client, &url).await;
        info!("[{}/{}] Checked: {}", i + 1, total, product.name);
    }
}

/// Moves the unavailable products out, preserving order.
pub fn unavailable(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|product| !product.available).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{detail_page, MockClient};

    fn base() -> Url {
        Url::parse("https://shop.test/fotele?q=x").unwrap()
    }

    #[tokio::test]
    async fn test_check_availability_true() {
        let client = MockClient::new().with_page("https://shop.test/ares.html", detail_page(true));
        assert!(check_availability(&client, "https://shop.test/ares.html").await);
    }

    #[tokio::test]
    async fn test_check_availability_false() {
        let client = MockClient::new().with_page("https://shop.test/ares.html", detail_page(false));
        assert!(!check_availability(&client, "https://shop.test/ares.html").await);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unavailable() {
        let client = MockClient::new();
        assert!(!check_availability(&client, "https://shop.test/missing.html").await);
    }

    #[tokio::test]
    async fn test_check_products_resolves_relative_urls() {
        let client = MockClient::new()
            .with_page("https://shop.test/ares.html", detail_page(true))
            .with_page("https://shop.test/zeus.html", detail_page(false));

        let mut products = vec![
            Product::new("Ares", "/ares.html"),
            Product::new("Zeus", "https://shop.test/zeus.html"),
            Product::new("Hera", "/hera.html"),
        ];

        check_products(&client, &mut products, &base()).await;

        assert!(products[0].available);
        assert!(!products[1].available);
        assert!(!products[2].available);
        assert_eq!(
            client.requests(),
            vec![
                "https://shop.test/ares.html",
                "https://shop.test/zeus.html",
                "https://shop.test/hera.html"
            ]
        );
    }

    #[test]
    fn test_unavailable_preserves_order() {
        let mut ares = Product::new("Ares", "/a");
        ares.available = true;
        let products = vec![Product::new("Zeus", "/z"), ares, Product::new("Hera", "/h")];

        let names: Vec<_> = unavailable(products).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Zeus", "Hera"]);
    }

    #[tokio::test]
    async fn test_check_command_output() {
        let client = MockClient::new().with_page("https://shop.test/ares.html", detail_page(true));
        let cmd = CheckCommand::new(Config::default());

        let urls = vec![
            "https://shop.test/ares.html".to_string(),
            "https://shop.test/zeus.html".to_string(),
        ];
        let output = cmd.execute_with_client(&client, &urls).await;

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "available    https://shop.test/ares.html");
        assert_eq!(lines[1], "unavailable  https://shop.test/zeus.html");
    }
}
