//! Connection settings for the hosted catalog service.
//!
//! Configuration is via environment variables:
//! - `SHOWNTELL_CATALOG_URL` - Base URL of the hosted service (required)
//! - `SHOWNTELL_CATALOG_KEY` - Publishable API key (required)
//! - `SHOWNTELL_STORAGE_BUCKET` - Bucket for submission images (default: `project-images`)

use thiserror::Error;

/// Default bucket for submission images.
const DEFAULT_BUCKET: &str = "project-images";

/// Missing or unusable environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Connection settings for the hosted catalog and identity service.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// Publishable API key sent with every request.
    pub api_key: String,
    /// Storage bucket that receives submission images.
    pub bucket: String,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("SHOWNTELL_CATALOG_URL")
            .map_err(|_| ConfigError::MissingVar("SHOWNTELL_CATALOG_URL"))?;
        let api_key = std::env::var("SHOWNTELL_CATALOG_KEY")
            .map_err(|_| ConfigError::MissingVar("SHOWNTELL_CATALOG_KEY"))?;
        let bucket = std::env::var("SHOWNTELL_STORAGE_BUCKET")
            .unwrap_or_else(|_| DEFAULT_BUCKET.to_string());
        Ok(Self::new(base_url, api_key, bucket))
    }

    /// Create with explicit settings.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }
}
