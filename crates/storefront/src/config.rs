//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GALLERY_DATA_DIR` - Directory holding the persisted cart and wishlist (default: `.gallery`)
//! - `GALLERY_STORAGE` - Storage backend, `file` or `memory` (default: `file`)
//! - `GALLERY_CURRENCY` - ISO 4217 currency for display and checkout (default: `GBP`)
//! - `GALLERY_LOG_FORMAT` - Log output, `text` or `json` (default: `text`)

use std::path::PathBuf;

use thiserror::Error;

use gallery_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the stores keep their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One JSON file per store under the data directory.
    #[default]
    File,
    /// Nothing survives the process.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("expected `file` or `memory`, got `{s}`")),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected `text` or `json`, got `{s}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file backend
    pub data_dir: PathBuf,
    /// Storage backend for both stores
    pub storage: StorageBackend,
    /// Currency prices are quoted in
    pub currency: CurrencyCode,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage: StorageBackend::default(),
            currency: CurrencyCode::default(),
            log_format: LogFormat::default(),
        }
    }
}

const DEFAULT_DATA_DIR: &str = ".gallery";

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("GALLERY_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let storage = parse_or_default(&lookup, "GALLERY_STORAGE")?;
        let currency = lookup("GALLERY_CURRENCY")
            .map(|value| {
                value.parse::<CurrencyCode>().map_err(|e| {
                    ConfigError::InvalidEnvVar("GALLERY_CURRENCY".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or_default();
        let log_format = parse_or_default(&lookup, "GALLERY_LOG_FORMAT")?;

        Ok(Self {
            data_dir,
            storage,
            currency,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to the type's default when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String> + Default,
{
    lookup(key).map_or_else(
        || Ok(T::default()),
        |value| {
            value
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.data_dir, PathBuf::from(".gallery"));
        assert_eq!(config.currency, CurrencyCode::GBP);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = load(&[
            ("GALLERY_DATA_DIR", "/var/lib/gallery"),
            ("GALLERY_STORAGE", "memory"),
            ("GALLERY_CURRENCY", "eur"),
            ("GALLERY_LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/gallery"));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_storage_backend() {
        let err = load(&[("GALLERY_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "GALLERY_STORAGE"));
    }

    #[test]
    fn test_invalid_currency() {
        let err = load(&[("GALLERY_CURRENCY", "doubloons")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "GALLERY_CURRENCY"));
    }
}
