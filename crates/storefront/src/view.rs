//! Display records produced by rendering the cart.
//!
//! These are plain data for a presentation layer; nothing here draws.

use shopcart_core::{LineItem, Price, ProductId};

/// Image shown for items without an image reference.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/default_image.png";

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    /// Key for the removal control.
    pub id: ProductId,
    pub name: String,
    /// Image reference, or the placeholder.
    pub image: String,
    pub quantity: u32,
    /// Unit price times quantity.
    pub line_price: Price,
}

impl CartItemView {
    /// Build the display record for one line item.
    #[must_use]
    pub fn from_line_item(item: &LineItem, placeholder_image: &str) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.image_ref().unwrap_or(placeholder_image).to_owned(),
            quantity: item.quantity.get(),
            line_price: item.extended_price(),
        }
    }
}

/// Cart display data.
///
/// An empty cart renders as [`CartView::Empty`] rather than an empty list,
/// so presenters show an explicit empty-state message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    /// Nothing in the cart. The total is always zero.
    Empty,
    /// One record per line item, in cart order.
    Items {
        items: Vec<CartItemView>,
        subtotal: Price,
        item_count: u32,
    },
}

impl CartView {
    /// Build a view from line items in cart order.
    #[must_use]
    pub fn from_items<'a>(
        items: impl IntoIterator<Item = &'a LineItem>,
        placeholder_image: &str,
    ) -> Self {
        let items: Vec<CartItemView> = items
            .into_iter()
            .map(|item| CartItemView::from_line_item(item, placeholder_image))
            .collect();

        if items.is_empty() {
            return Self::Empty;
        }

        let subtotal = items.iter().map(|item| item.line_price).sum();
        let item_count = items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity));

        Self::Items {
            items,
            subtotal,
            item_count,
        }
    }

    /// `true` for the empty-state marker.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The item records; empty for [`CartView::Empty`].
    #[must_use]
    pub fn items(&self) -> &[CartItemView] {
        match self {
            Self::Empty => &[],
            Self::Items { items, .. } => items,
        }
    }

    /// Sum of line prices.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        match self {
            Self::Empty => Price::ZERO,
            Self::Items { subtotal, .. } => *subtotal,
        }
    }

    /// Total number of units across all items.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Items { item_count, .. } => *item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use shopcart_core::NewLineItem;

    use super::*;

    fn item(id: &str, image: Option<&str>, price: u64, quantity: u32) -> LineItem {
        let mut item = LineItem::new(NewLineItem::new(
            id,
            format!("Product {id}"),
            image.map(str::to_owned),
            Price::from_units(price),
        ));
        item.quantity = NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN);
        item
    }

    #[test]
    fn test_empty_items_render_marker() {
        let view = CartView::from_items(std::iter::empty(), DEFAULT_PLACEHOLDER_IMAGE);
        assert!(view.is_empty());
        assert_eq!(view.subtotal(), Price::ZERO);
        assert_eq!(view.item_count(), 0);
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_items_keep_order_and_extend_prices() {
        let items = [item("b", Some("b.png"), 100, 3), item("a", None, 40, 1)];
        let view = CartView::from_items(&items, DEFAULT_PLACEHOLDER_IMAGE);

        let ids: Vec<&str> = view.items().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(view.items()[0].line_price, Price::from_units(300));
        assert_eq!(view.subtotal(), Price::from_units(340));
        assert_eq!(view.item_count(), 4);
    }

    #[test]
    fn test_placeholder_for_missing_or_empty_image() {
        let mut blank = item("c", None, 1, 1);
        blank.image = Some(String::new());
        let items = [item("a", None, 1, 1), blank, item("b", Some("b.png"), 1, 1)];
        let view = CartView::from_items(&items, "ph.png");

        let images: Vec<&str> = view.items().iter().map(|v| v.image.as_str()).collect();
        assert_eq!(images, ["ph.png", "ph.png", "b.png"]);
    }
}
