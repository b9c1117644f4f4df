//! The cart store.
//!
//! [`CartStore`] owns the cart for one session. It is loaded once from a
//! [`KeyValueStore`], mutated in place, and written back after every
//! mutation. The derived total is cached but recomputed on every change, so
//! it never disagrees with the items.
//!
//! # Persisted layout
//!
//! ```json
//! [{"id": "A", "name": "Tea", "img": null, "price": 200, "quantity": 2}]
//! ```

use std::num::NonZeroU32;

use indexmap::IndexMap;
use shopcart_core::{LineItem, NewLineItem, Price, ProductId};
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::presenter::{DisplayError, Presenter};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::view::CartView;

/// Cart for one session, bound to its storage and presenter.
///
/// `P` defaults to `()`, which draws nothing.
#[derive(Debug)]
pub struct CartStore<S, P = ()> {
    store: S,
    presenter: P,
    storage_key: String,
    placeholder_image: String,
    items: IndexMap<ProductId, LineItem>,
    total: Price,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart from `store` under the default key.
    ///
    /// Never fails: missing or malformed state loads as an empty cart.
    pub fn load(store: S) -> Self {
        Self::load_with_config(store, &CartConfig::default())
    }

    /// Load the cart from `store` using the key and placeholder from `config`.
    ///
    /// Never fails: missing or malformed state loads as an empty cart.
    #[instrument(skip_all, fields(key = %config.storage_key))]
    pub fn load_with_config(store: S, config: &CartConfig) -> Self {
        let items = read_items(&store, &config.storage_key);
        let mut cart = Self {
            store,
            presenter: (),
            storage_key: config.storage_key.clone(),
            placeholder_image: config.placeholder_image.clone(),
            items,
            total: Price::ZERO,
        };
        cart.compute_total();
        tracing::debug!(items = cart.items.len(), total = %cart.total, "Cart loaded");
        cart
    }
}

impl<S: KeyValueStore, P: Presenter> CartStore<S, P> {
    /// Attach a presenter and draw the current state, as on page load.
    ///
    /// The itemized list is only drawn if the presenter has one; the total
    /// is always drawn.
    pub fn with_presenter<Q: Presenter>(self, presenter: Q) -> CartStore<S, Q> {
        let mut cart = CartStore {
            store: self.store,
            presenter,
            storage_key: self.storage_key,
            placeholder_image: self.placeholder_image,
            items: self.items,
            total: self.total,
        };
        if cart.presenter.shows_items() {
            cart.draw_items();
        }
        cart.draw_total();
        cart
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gains one unit and keeps the unit price
    /// recorded when it was first added; `item.unit_price` is ignored.
    /// Otherwise the product is appended with quantity 1.
    ///
    /// Returns the product's new quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::QuantityOverflow`] if the quantity is already at its
    ///   maximum; nothing changes.
    /// - [`CartError::Storage`] / [`CartError::Serialize`] if the cart
    ///   changed but could not be written back. The total is still redrawn.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add(&mut self, item: NewLineItem) -> Result<NonZeroU32> {
        let id = item.id.clone();
        let quantity = if let Some(existing) = self.items.get_mut(&id) {
            if !existing.increment() {
                tracing::error!(product_id = %id, "Quantity overflow, item not added");
                return Err(CartError::QuantityOverflow { id });
            }
            existing.quantity
        } else {
            let line = LineItem::new(item);
            let quantity = line.quantity;
            self.items.insert(id.clone(), line);
            quantity
        };

        self.compute_total();
        let saved = self.save();
        self.draw_total();
        saved?;

        tracing::info!(product_id = %id, quantity = quantity.get(), "Item added to cart");
        Ok(quantity)
    }

    /// Add one unit of a product whose price is only known from display text.
    ///
    /// The price is the first run of digits in `price_text`
    /// (`"Price: 150 руб."` is 150). It only matters when the product is new
    /// to the cart.
    ///
    /// # Errors
    ///
    /// [`CartError::UnparsablePrice`] if `price_text` holds no digits or the
    /// digits are not a valid amount. The cart is untouched and nothing is
    /// written. Otherwise as for [`add`](Self::add).
    pub fn add_from_text(
        &mut self,
        id: &str,
        name: &str,
        image: Option<&str>,
        price_text: &str,
    ) -> Result<NonZeroU32> {
        let unit_price = Price::from_display_text(price_text).map_err(|e| {
            tracing::error!(product_id = id, price_text, error = %e, "Could not extract price");
            e
        })?;

        self.add(NewLineItem::new(
            id,
            name,
            image.map(str::to_owned),
            unit_price,
        ))
    }

    /// Remove a product entirely, whatever its quantity.
    ///
    /// Removing a product that is not in the cart is a no-op. Either way the
    /// cart is written back and redrawn. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// [`CartError::Storage`] / [`CartError::Serialize`] if the cart could
    /// not be written back. The removal still stands in memory and is
    /// redrawn.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let removed = self.items.shift_remove(id).is_some();

        self.compute_total();
        let saved = self.save();
        self.redisplay();
        saved?;

        if removed {
            tracing::info!(product_id = id, "Item removed from cart");
        } else {
            tracing::debug!(product_id = id, "Remove of absent item ignored");
        }
        Ok(removed)
    }

    /// The cached total.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Recompute the total from the items and cache it.
    pub fn compute_total(&mut self) -> Price {
        self.total = self.items.values().map(LineItem::extended_price).sum();
        self.total
    }

    /// Display records for the current state.
    ///
    /// An empty cart yields [`CartView::Empty`]. The total is recomputed
    /// alongside, so it is zero for an empty cart.
    pub fn render(&mut self) -> CartView {
        let view = CartView::from_items(self.items.values(), &self.placeholder_image);
        self.compute_total();
        view
    }

    /// Draw both regions through the presenter.
    ///
    /// A missing region is logged and skipped; the other is still drawn.
    pub fn redisplay(&mut self) {
        self.draw_items();
        self.draw_total();
    }

    /// Line items in cart order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &LineItem> {
        self.items.values()
    }

    /// An owned copy of the line items in cart order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.values().cloned().collect()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.get(id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the cart to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if serialization or the storage write fails.
    pub fn save(&mut self) -> Result<()> {
        let items: Vec<&LineItem> = self.items.values().collect();
        let json = serde_json::to_string(&items)?;
        self.store.set(&self.storage_key, &json).map_err(|e| {
            tracing::error!(key = %self.storage_key, error = %e, "Failed to persist cart");
            e
        })?;
        Ok(())
    }

    /// The storage backend.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The presenter.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Consume the cart, returning its storage backend.
    pub fn into_store(self) -> S {
        self.store
    }

    fn draw_items(&mut self) {
        let view = self.render();
        if let Err(e) = self.presenter.show_items(&view) {
            report_display_error(&e);
        }
    }

    fn draw_total(&mut self) {
        if let Err(e) = self.presenter.show_total(self.total) {
            report_display_error(&e);
        }
    }
}

fn report_display_error(error: &DisplayError) {
    tracing::error!(error = %error, "Cart display failed");
}

/// Read persisted items, failing open to an empty cart.
fn read_items<S: KeyValueStore>(store: &S, key: &str) -> IndexMap<ProductId, LineItem> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return IndexMap::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read persisted cart, starting empty");
            return IndexMap::new();
        }
    };

    match parse_items(&raw) {
        Ok(items) => items,
        Err(reason) => {
            tracing::warn!(key, %reason, "Malformed persisted cart, starting empty");
            IndexMap::new()
        }
    }
}

/// Parse the persisted JSON array. `null` is an empty cart.
fn parse_items(raw: &str) -> std::result::Result<IndexMap<ProductId, LineItem>, String> {
    let parsed: Option<Vec<LineItem>> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut items = IndexMap::new();
    for item in parsed.unwrap_or_default() {
        let id = item.id.clone();
        if items.insert(id.clone(), item).is_some() {
            return Err(format!("duplicate product id {id}"));
        }
    }
    Ok(items)
}

impl CartStore<MemoryStore> {
    /// An empty cart backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }
}
