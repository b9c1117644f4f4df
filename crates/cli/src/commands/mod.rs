//! CLI command implementations.

pub mod cart;

use shopcart_storefront::config::ConfigError;
use shopcart_storefront::{CartError, DisplayError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart operation failed.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// The cart could not be rendered.
    #[error("Render error: {0}")]
    Display(#[from] DisplayError),
}
