//! Crawler settings: built-in defaults, an optional TOML file, then `RESTOCK_*` variables.
//! CLI flags are applied last by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a run needs to know about the two sites and the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog listing URL; the page number is appended as a query pair
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Supplier availability page
    #[serde(default = "default_stock_url")]
    pub stock_url: String,

    /// Base that supplier links are resolved against
    #[serde(default = "default_stock_base_url")]
    pub stock_base_url: String,

    /// Report destination
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Safety limit on listing pages crawled
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Only check the first N products (all when unset)
    #[serde(default)]
    pub max_products: Option<usize>,

    /// HTTP or SOCKS proxy for both sites
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format for listing commands
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_catalog_url() -> String {
    "https://fotelewarszawa.pl/42-fotele-biurowe?resultsPerPage=100&q=Marka-Unique".to_string()
}

fn default_stock_url() -> String {
    "http://old.unique-meble.pl/dostepnosc.html".to_string()
}

fn default_stock_base_url() -> String {
    "http://old.unique-meble.pl".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("restock_report.csv")
}

fn default_max_pages() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            stock_url: default_stock_url(),
            stock_base_url: default_stock_base_url(),
            output: default_output(),
            max_pages: default_max_pages(),
            max_products: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
        }
    }
}

const LOCAL_CONFIG: &str = "restock.toml";

impl Config {
    /// Reads a TOML file; keys it leaves out keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading config");

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;

        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Resolves the config file: an explicit path wins, then `./restock.toml`,
    /// then the user config directory. Defaults apply when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit.map(Path::to_path_buf).or_else(Self::discover) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("no config file, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("restock-crawler").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Overlays non-blank `RESTOCK_*` variables.
    pub fn with_env(mut self) -> Self {
        if let Some(url) = non_empty_env("RESTOCK_CATALOG_URL") {
            self.catalog_url = url;
        }
        if let Some(url) = non_empty_env("RESTOCK_STOCK_URL") {
            self.stock_url = url;
        }
        if let Some(output) = non_empty_env("RESTOCK_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(proxy) = non_empty_env("RESTOCK_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// How `list` and `stock` render their results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    const ALL: [OutputFormat; 3] = [OutputFormat::Table, OutputFormat::Json, OutputFormat::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown format: {}. Use: table, json, csv", s))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_defaults_point_at_live_sites() {
        let config = Config::default();
        assert!(config.catalog_url.contains("q=Marka-Unique"));
        assert_eq!(config.stock_url, "http://old.unique-meble.pl/dostepnosc.html");
        assert_eq!(config.stock_base_url, "http://old.unique-meble.pl");
        assert_eq!(config.output, PathBuf::from("restock_report.csv"));
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.max_products, None);
        assert_eq!(config.proxy, None);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_format_names() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
        assert_eq!("Json".parse::<OutputFormat>(), Ok(OutputFormat::Json));

        let err = "markdown".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, "Unknown format: markdown. Use: table, json, csv");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            max_pages = 3
            max_products = 10
            output = "out/report.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_pages, 3);
        assert_eq!(config.max_products, Some(10));
        assert_eq!(config.output, PathBuf::from("out/report.csv"));
        assert_eq!(config.stock_base_url, "http://old.unique-meble.pl");
    }

    #[test]
    fn test_full_toml() {
        let config: Config = toml::from_str(
            r#"
            catalog_url = "https://shop.example/chairs?q=x"
            stock_url = "https://supplier.example/stock.html"
            stock_base_url = "https://supplier.example"
            output = "report.csv"
            max_pages = 5
            max_products = 20
            proxy = "socks5://127.0.0.1:9050"
            timeout_secs = 10
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog_url, "https://shop.example/chairs?q=x");
        assert_eq!(config.stock_url, "https://supplier.example/stock.html");
        assert_eq!(config.stock_base_url, "https://supplier.example");
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.max_products, Some(20));
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_load_explicit_file() {
        let file = config_file("timeout_secs = 5\nformat = \"json\"\n");

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::from_file("/nonexistent/restock.toml").unwrap_err().to_string();
        assert!(err.starts_with("Cannot read config"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = config_file("max_pages = [");

        let err = Config::from_file(file.path()).unwrap_err().to_string();
        assert!(err.starts_with("Invalid config"));
    }

    #[test]
    fn test_env_overrides_skip_blank_values() {
        let saved: Vec<_> = ["RESTOCK_STOCK_URL", "RESTOCK_PROXY"]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();

        std::env::set_var("RESTOCK_STOCK_URL", "http://mirror.example/stock.html");
        std::env::set_var("RESTOCK_PROXY", "   ");

        let config = Config::default().with_env();
        assert_eq!(config.stock_url, "http://mirror.example/stock.html");
        assert_eq!(config.proxy, None);

        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
