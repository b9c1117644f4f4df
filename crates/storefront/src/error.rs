//! Cart error types.
//!
//! Everything here is recoverable: a rejected operation leaves the cart as it
//! was before the call. Malformed persisted state is not an error at all, it
//! loads as an empty cart.

use shopcart_core::{PriceError, ProductId};
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The price could not be extracted from its display text.
    #[error("Unparsable price: {0}")]
    UnparsablePrice(#[from] PriceError),

    /// Adding one more unit would overflow the quantity.
    #[error("Quantity overflow for product {id}")]
    QuantityOverflow { id: ProductId },

    /// The cart changed in memory but could not be written back.
    #[error("Failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CartError {
    /// `true` when the operation was refused and nothing changed.
    ///
    /// Persistence failures happen after the in-memory change, so they are
    /// not rejections.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::UnparsablePrice(_) | Self::QuantityOverflow { .. })
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
