//! Drawing the cart.
//!
//! A [`Presenter`] owns two display regions: the itemized list and the
//! running total. A page may lack either one; drawing to a missing region
//! returns [`DisplayError::MissingTarget`], which the store logs and moves on.

use askama::Template;
use shopcart_core::Price;
use thiserror::Error;

use crate::view::{CartItemView, CartView};

/// Region holding the itemized list.
pub const ITEMS_REGION: &str = "cart-items";

/// Region holding the running total.
pub const TOTAL_REGION: &str = "cart-total";

/// Errors raised while drawing.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The page has no region with this id.
    #[error("Display region '{0}' not found")]
    MissingTarget(&'static str),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Presentation surface for the cart.
pub trait Presenter {
    /// Replace the itemized list.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the region is missing or cannot be drawn.
    fn show_items(&mut self, view: &CartView) -> Result<(), DisplayError>;

    /// Replace the total with plain numeric text.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the region is missing.
    fn show_total(&mut self, total: Price) -> Result<(), DisplayError>;

    /// Whether the itemized list is present at all.
    ///
    /// Used on startup, where a page without the list is normal and not
    /// worth a diagnostic.
    fn shows_items(&self) -> bool {
        true
    }
}

/// Headless: nothing to draw, nothing missing.
impl Presenter for () {
    fn show_items(&mut self, _view: &CartView) -> Result<(), DisplayError> {
        Ok(())
    }

    fn show_total(&mut self, _total: Price) -> Result<(), DisplayError> {
        Ok(())
    }

    fn shows_items(&self) -> bool {
        false
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub items: &'a [CartItemView],
}

/// Renders both regions to HTML strings.
///
/// Regions start out present and empty; use
/// [`without_items_region`](Self::without_items_region) and
/// [`without_total_region`](Self::without_total_region) to model a page
/// that lacks one.
#[derive(Debug, Clone)]
pub struct HtmlPresenter {
    items_html: Option<String>,
    total_text: Option<String>,
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPresenter {
    /// A page with both regions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items_html: Some(String::new()),
            total_text: Some(String::new()),
        }
    }

    /// Drop the itemized list region.
    #[must_use]
    pub fn without_items_region(mut self) -> Self {
        self.items_html = None;
        self
    }

    /// Drop the total region.
    #[must_use]
    pub fn without_total_region(mut self) -> Self {
        self.total_text = None;
        self
    }

    /// Current contents of the itemized list region.
    #[must_use]
    pub fn items_html(&self) -> Option<&str> {
        self.items_html.as_deref()
    }

    /// Current contents of the total region.
    #[must_use]
    pub fn total_text(&self) -> Option<&str> {
        self.total_text.as_deref()
    }
}

impl Presenter for HtmlPresenter {
    fn show_items(&mut self, view: &CartView) -> Result<(), DisplayError> {
        let region = self
            .items_html
            .as_mut()
            .ok_or(DisplayError::MissingTarget(ITEMS_REGION))?;

        *region = CartItemsTemplate {
            items: view.items(),
        }
        .render()?;
        Ok(())
    }

    fn show_total(&mut self, total: Price) -> Result<(), DisplayError> {
        let region = self
            .total_text
            .as_mut()
            .ok_or(DisplayError::MissingTarget(TOTAL_REGION))?;

        *region = total.to_string();
        Ok(())
    }

    fn shows_items(&self) -> bool {
        self.items_html.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopcart_core::{LineItem, NewLineItem};

    use super::*;
    use crate::view::DEFAULT_PLACEHOLDER_IMAGE;

    fn view(items: &[LineItem]) -> CartView {
        CartView::from_items(items, DEFAULT_PLACEHOLDER_IMAGE)
    }

    #[test]
    fn test_empty_cart_message() {
        let mut presenter = HtmlPresenter::new();
        presenter.show_items(&view(&[])).unwrap();
        assert_eq!(presenter.items_html().unwrap().trim(), "Корзина пуста.");
    }

    #[test]
    fn test_item_markup() {
        let mut item = LineItem::new(NewLineItem::new(
            "tea-1",
            "Green tea",
            None,
            Price::from_units(150),
        ));
        assert!(item.increment());

        let mut presenter = HtmlPresenter::new();
        presenter.show_items(&view(&[item])).unwrap();
        let html = presenter.items_html().unwrap();

        assert!(html.contains(r#"class="cart-item""#));
        assert!(html.contains(r#"src="images/default_image.png""#));
        assert!(html.contains("Green tea (2 шт.)"));
        assert!(html.contains("300 руб."));
        assert!(html.contains(r#"data-product-id="tea-1""#));
        assert!(html.contains("Удалить"));
        assert!(!html.contains("Корзина пуста."));
    }

    #[test]
    fn test_item_names_are_escaped() {
        let item = LineItem::new(NewLineItem::new(
            "x",
            "<script>alert(1)</script>",
            None,
            Price::from_units(1),
        ));

        let mut presenter = HtmlPresenter::new();
        presenter.show_items(&view(&[item])).unwrap();
        let html = presenter.items_html().unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_total_is_plain_number() {
        let mut presenter = HtmlPresenter::new();
        presenter.show_total(Price::from_units(400)).unwrap();
        assert_eq!(presenter.total_text(), Some("400"));

        presenter.show_total(Price::ZERO).unwrap();
        assert_eq!(presenter.total_text(), Some("0"));
    }

    #[test]
    fn test_missing_regions() {
        let mut presenter = HtmlPresenter::new()
            .without_items_region()
            .without_total_region();

        assert!(!presenter.shows_items());
        assert!(matches!(
            presenter.show_items(&view(&[])),
            Err(DisplayError::MissingTarget(ITEMS_REGION))
        ));
        assert!(matches!(
            presenter.show_total(Price::ZERO),
            Err(DisplayError::MissingTarget(TOTAL_REGION))
        ));
    }
}
