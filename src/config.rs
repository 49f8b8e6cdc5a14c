//! Runtime configuration
//!
//! Everything has a compiled-in default; a couple of values can be overridden
//! from the environment so the client can be pointed at a proxy or mirror.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_INITIAL_QUERY: &str = "fiction";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_LOG_DIR: &str = ".logs";
pub const DEFAULT_LOG_FILTER: &str = "bookscout=debug,reqwest=info,warn";

const CATALOG_URL_VAR: &str = "BOOKSCOUT_CATALOG_URL";
const INITIAL_QUERY_VAR: &str = "BOOKSCOUT_INITIAL_QUERY";
const LOG_DIR_VAR: &str = "BOOKSCOUT_LOG_DIR";
const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Volumes endpoint of the catalog service, without query string
    pub catalog_url: String,
    /// Query committed and fetched at startup; empty means start idle
    pub initial_query: String,
    pub request_timeout: Duration,
    /// Directory for the rotating log files
    pub log_dir: PathBuf,
    /// `EnvFilter` directives; `RUST_LOG` wins over the built-in default
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            initial_query: DEFAULT_INITIAL_QUERY.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(CATALOG_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.catalog_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(query) = lookup(INITIAL_QUERY_VAR) {
            config.initial_query = query;
        }
        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir.trim());
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }

        config
    }
}
