//! Catalog crawl command: paginates the listing until a page yields no products.

use crate::catalog::{extract_products, HttpClient, PageFetch, Product};
use crate::commands::parse_url;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use url::Url;

/// Lists every product in the catalog.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Crawls the catalog and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = HttpClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Crawls with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<String> {
        let products = crawl_catalog(client, &self.config).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}

/// URL of listing page `page`, numbered from 1.
pub fn page_url(catalog: &Url, page: u32) -> Url {
    let mut url = catalog.clone();
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}

/// Fetches listing pages in order and accumulates their products.
///
/// Pagination ends at the first page that fails to load or yields no
/// products, or at `max_pages`. Only an invalid catalog URL is an error.
pub async fn crawl_catalog(client: &impl PageFetch, config: &Config) -> Result<Vec<Product>> {
    let catalog = parse_url(&config.catalog_url)?;
    let mut products: Vec<Product> = Vec::new();
    let mut page = 1;

    loop {
        if page > config.max_pages {
            warn!("Reached page limit ({}), stopping", config.max_pages);
            break;
        }

        let url = page_url(&catalog, page);
        debug!("Fetching listing page {}", page);

        let html = match client.fetch(url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch page {}: {:#}", page, e);
                break;
            }
        };

        let page_products = extract_products(&html);
        if page_products.is_empty() {
            info!("No products found on page {}, done crawling", page);
            break;
        }

        let found = page_products.len();
        products.extend(page_products);
        info!("Page {}: found {} products (total: {})", page, found, products.len());
        page += 1;
    }

    if let Some(limit) = config.max_products {
        if products.len() > limit {
            debug!("Truncating {} products to {}", products.len(), limit);
            products.truncate(limit);
        }
    }

    Ok(products)
}
