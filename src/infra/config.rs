//! Centralized configuration (environment variables + defaults).

use crate::domain::catalog::CATALOG_PAGE_SIZE;
use crate::error::{CatalogError, CatalogResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/products";
pub const DEFAULT_STORE_DIR: &str = ".catalog";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Which repository implementation backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Remote,
    Local,
}

impl FromStr for Backend {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "http" => Ok(Backend::Remote),
            "local" | "fallback" => Ok(Backend::Local),
            other => Err(CatalogError::Config(format!(
                "CATALOG_BACKEND must be 'remote' or 'local', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Remote => f.write_str("remote"),
            Backend::Local => f.write_str("local"),
        }
    }
}

/// Repository backend (`CATALOG_BACKEND`, default `remote`).
pub fn backend() -> CatalogResult<Backend> {
    match std::env::var("CATALOG_BACKEND") {
        Ok(v) => v.parse(),
        Err(_) => Ok(Backend::default()),
    }
}

/// Products collection URL (`CATALOG_API_URL`).
pub fn api_url() -> String {
    std::env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Request timeout for the remote backend (`CATALOG_HTTP_TIMEOUT_SECS`, at least 1s).
pub fn http_timeout() -> CatalogResult<Duration> {
    let secs = positive_var("CATALOG_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS as usize)?;
    Ok(Duration::from_secs(secs as u64))
}

/// Directory holding the local fallback store (`CATALOG_STORE_DIR`).
pub fn store_dir() -> PathBuf {
    std::env::var("CATALOG_STORE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_DIR))
}

/// Products per page (`CATALOG_PAGE_SIZE`).
pub fn page_size() -> CatalogResult<usize> {
    positive_var("CATALOG_PAGE_SIZE", CATALOG_PAGE_SIZE)
}

fn positive_var(name: &str, default: usize) -> CatalogResult<usize> {
    match std::env::var(name) {
        Ok(v) => parse_positive(name, &v),
        Err(_) => Ok(default),
    }
}

/// Parses a strictly positive integer setting.
pub fn parse_positive(name: &str, value: &str) -> CatalogResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CatalogError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, value
        ))),
    }
}

/// Every setting, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub backend: Backend,
    pub api_url: String,
    pub http_timeout: Duration,
    pub store_dir: PathBuf,
    pub page_size: usize,
}

impl CatalogConfig {
    /// Loads `.env` (if present) and reads every setting from the environment.
    pub fn from_env() -> CatalogResult<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            backend: backend()?,
            api_url: api_url(),
            http_timeout: http_timeout()?,
            store_dir: store_dir(),
            page_size: page_size()?,
        })
    }

    /// Local fallback configuration rooted at `store_dir`.
    pub fn local(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Local,
            store_dir: store_dir.into(),
            ..Self::default()
        }
    }

    /// Remote configuration for the given products URL.
    pub fn remote(api_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::Remote,
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            page_size: CATALOG_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_known_names() {
        assert_eq!("remote".parse::<Backend>().unwrap(), Backend::Remote);
        assert_eq!(" LOCAL ".parse::<Backend>().unwrap(), Backend::Local);
        assert_eq!("fallback".parse::<Backend>().unwrap(), Backend::Local);
        assert!(matches!("sqlite".parse::<Backend>(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn positive_settings_reject_zero_and_garbage() {
        assert_eq!(parse_positive("X", "8").unwrap(), 8);
        assert!(parse_positive("X", "0").is_err());
        assert!(parse_positive("X", "-1").is_err());
        assert!(parse_positive("X", "six").is_err());
    }

    #[test]
    fn defaults_point_at_the_local_dev_api() {
        let config = CatalogConfig::default();
        assert_eq!(config.backend, Backend::Remote);
        assert_eq!(config.api_url, "http://localhost:3001/products");
        assert_eq!(config.page_size, 6);

        let local = CatalogConfig::local("/tmp/store");
        assert_eq!(local.backend, Backend::Local);
        assert_eq!(local.store_dir, PathBuf::from("/tmp/store"));
    }
}
