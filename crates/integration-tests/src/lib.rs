//! Integration tests for Shopcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Add/remove sequences against the cart store
//! - `cart_persistence` - Reloading the cart from a file store across sessions

use shopcart_storefront::{CartConfig, CartStore, FileStore};
use tempfile::TempDir;

/// A throwaway data directory standing in for one browser profile.
///
/// Every [`session`](Self::session) loads the cart afresh, the way each page
/// load does.
pub struct TestContext {
    dir: TempDir,
    config: CartConfig,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = CartConfig {
            data_dir: dir.path().to_path_buf(),
            ..CartConfig::default()
        };
        Self { dir, config }
    }

    /// Start a new session: load the cart from disk.
    #[must_use]
    pub fn session(&self) -> CartStore<FileStore> {
        CartStore::load_with_config(FileStore::new(self.dir.path()), &self.config)
    }

    /// Path of the persisted cart file.
    #[must_use]
    pub fn cart_file(&self) -> std::path::PathBuf {
        self.dir
            .path()
            .join(format!("{}.json", self.config.storage_key))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
