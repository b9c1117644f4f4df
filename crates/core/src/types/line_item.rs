//! Cart line items.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// One distinct product held in the cart.
///
/// Serializes to the persisted layout
/// `{ "id", "name", "img", "price", "quantity" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique key within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image reference; `None` means the placeholder image is shown.
    #[serde(rename = "img", default)]
    pub image: Option<String>,
    /// Unit price captured when the product was first added.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Number of units, always at least one.
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Create a line item holding a single unit.
    #[must_use]
    pub fn new(item: NewLineItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            image: item.image,
            unit_price: item.unit_price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn extended_price(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }

    /// Image reference, treating an empty string like a missing one.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().filter(|img| !img.is_empty())
    }

    /// Add one unit. Returns `false` (and leaves the quantity alone) on overflow.
    #[must_use]
    pub fn increment(&mut self) -> bool {
        match self.quantity.checked_add(1) {
            Some(quantity) => {
                self.quantity = quantity;
                true
            }
            None => false,
        }
    }
}

/// Structured input for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: Price,
}

impl NewLineItem {
    /// Create a new line item input.
    ///
    /// An empty image reference is normalized to `None`.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        image: Option<String>,
        unit_price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.filter(|img| !img.is_empty()),
            unit_price,
        }
    }
}
