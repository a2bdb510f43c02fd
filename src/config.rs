//! Client configuration
//!
//! [`CatalogConfig`] configures the HTTP client. [`Args`] is the command line
//! surface of the `wisdom-catalog` binary; every flag also reads from the
//! environment.

use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::error::{CatalogError, Result};
use crate::state::Category;

/// Default origin of the catalog API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Configuration for [`crate::CatalogClient`]
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash
    pub base_url: String,
    /// Optional request timeout. `None` leaves requests unbounded.
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Config pointing at `base_url` with no timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Check the configuration and normalize the base URL
    pub fn validate(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(CatalogError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Output format of the rendered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Wisdom Catalog - browse philosophies, religions and astrological systems
#[derive(Parser, Debug, Clone)]
#[command(name = "wisdom-catalog")]
#[command(about = "Render the wisdom traditions catalog as tabbed cards")]
pub struct Args {
    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Tab to display (philosophy, religion, astrology)
    #[arg(long, env = "CATALOG_TAB", default_value = "philosophy")]
    pub tab: Category,

    /// Search query run after the initial load
    #[arg(long, env = "CATALOG_SEARCH")]
    pub search: Option<String>,

    /// Output format
    #[arg(long, env = "CATALOG_FORMAT", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Request timeout in seconds (unbounded when unset)
    #[arg(long, env = "CATALOG_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Build the validated client configuration
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        CatalogConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
        .validate()
    }
}
