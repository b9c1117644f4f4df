//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPCART_DATA_DIR` - Directory for the file-backed store (default: .shopcart)
//! - `SHOPCART_STORAGE_KEY` - Key holding the serialized cart (default: cart)
//! - `SHOPCART_PLACEHOLDER_IMAGE` - Image shown for items without one
//!   (default: images/default_image.png)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::is_valid_key;
use crate::view::DEFAULT_PLACEHOLDER_IMAGE;

/// Default persisted key, shared with pages that read the cart directly.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Default directory for the file-backed store.
pub const DEFAULT_DATA_DIR: &str = ".shopcart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Key under which the cart is persisted
    pub storage_key: String,
    /// Image shown for items without an image reference
    pub placeholder_image: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get_or_default("SHOPCART_DATA_DIR", DEFAULT_DATA_DIR));
        let storage_key = get_or_default("SHOPCART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        let placeholder_image =
            get_or_default("SHOPCART_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE);

        require_non_empty("SHOPCART_DATA_DIR", data_dir.as_os_str().is_empty())?;
        require_non_empty("SHOPCART_STORAGE_KEY", storage_key.trim().is_empty())?;
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPCART_STORAGE_KEY".to_string(),
                "must contain only ASCII letters, digits, '-' and '_'".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            storage_key,
            placeholder_image,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn require_non_empty(key: &str, is_empty: bool) -> Result<(), ConfigError> {
    if is_empty {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}
