//! restock-crawler - catalog availability crawler and supplier reconciliation

use anyhow::Result;
use clap::{Parser, Subcommand};
use restock_crawler::commands::{CheckCommand, CrawlCommand, ReportCommand, StockCommand};
use restock_crawler::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "restock-crawler",
    version,
    about = "Find out-of-stock catalog products and look them up at the supplier",
    long_about = "Crawls a paginated store catalog, checks every product page for an add-to-cart \
                  control, and matches unavailable products against the supplier's availability \
                  listing, writing a semicolon-delimited restock report."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "RESTOCK_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for list and stock
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Safety limit on listing pages
    #[arg(long, global = true)]
    max_pages: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl, check availability, and write the restock report
    #[command(alias = "r")]
    Report {
        /// Report destination
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only check the first N products
        #[arg(long)]
        max_products: Option<usize>,
    },

    /// List every product in the catalog
    #[command(alias = "l")]
    List,

    /// Check availability of product pages
    #[command(alias = "c")]
    Check {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Show the supplier availability listing
    #[command(alias = "s")]
    Stock,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress is reported at info level
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }

    match cli.command {
        Commands::Report { output, max_products } => {
            if let Some(output) = output {
                config.output = output;
            }
            if max_products.is_some() {
                config.max_products = max_products;
            }

            let summary = ReportCommand::new(config).execute().await?;
            println!("{}", summary);
        }

        Commands::List => {
            let output = CrawlCommand::new(config).execute().await?;
            println!("{}", output);
        }

        Commands::Check { urls } => {
            let output = CheckCommand::new(config).execute(&urls).await?;
            println!("{}", output);
        }

        Commands::Stock => {
            let output = StockCommand::new(config).execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
