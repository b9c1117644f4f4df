//! Cart commands.
//!
//! Each command loads the cart from the file store, performs one operation
//! and returns the text to print.
//!
//! # Environment Variables
//!
//! - `SHOPCART_DATA_DIR` - Directory holding the persisted cart
//! - `SHOPCART_STORAGE_KEY` - Key the cart is stored under
//! - `SHOPCART_PLACEHOLDER_IMAGE` - Image shown for items without one

use std::fmt::Write as _;

use shopcart_core::NewLineItem;
use shopcart_storefront::presenter::{ITEMS_REGION, TOTAL_REGION};
use shopcart_storefront::{CartConfig, CartStore, CartView, FileStore, HtmlPresenter, Presenter};

use super::CommandError;
use crate::AddArgs;

fn open(config: &CartConfig) -> CartStore<FileStore> {
    tracing::debug!(dir = %config.data_dir.display(), "Opening cart store");
    CartStore::load_with_config(FileStore::new(&config.data_dir), config)
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CommandError` if the price cannot be extracted or the cart
/// cannot be written.
pub fn add(config: &CartConfig, args: AddArgs) -> Result<String, CommandError> {
    let mut cart = open(config);

    let quantity = if let Some(price) = args.price.price {
        cart.add(NewLineItem::new(
            args.id.as_str(),
            args.name,
            args.image,
            price,
        ))?
    } else {
        let text = args.price.price_text.unwrap_or_default();
        cart.add_from_text(&args.id, &args.name, args.image.as_deref(), &text)?
    };

    Ok(format!("{} x{quantity} (total: {})", args.id, cart.total()))
}

/// Remove a product entirely.
///
/// # Errors
///
/// Returns `CommandError` if the cart cannot be written.
pub fn remove(config: &CartConfig, id: &str) -> Result<String, CommandError> {
    let mut cart = open(config);

    if cart.remove(id)? {
        Ok(format!("removed {id} (total: {})", cart.total()))
    } else {
        Ok(format!("{id} not in cart (total: {})", cart.total()))
    }
}

/// Render the cart as plain text or as the HTML regions.
///
/// # Errors
///
/// Returns `CommandError` if the HTML fragment cannot be rendered.
pub fn show(config: &CartConfig, html: bool) -> Result<String, CommandError> {
    let mut cart = open(config);
    let view = cart.render();

    if html {
        let mut presenter = HtmlPresenter::new();
        presenter.show_items(&view)?;
        presenter.show_total(cart.total())?;
        return Ok(format!(
            "<div id=\"{ITEMS_REGION}\">{}</div>\n<div id=\"{TOTAL_REGION}\">{}</div>",
            presenter.items_html().unwrap_or_default(),
            presenter.total_text().unwrap_or_default(),
        ));
    }

    Ok(render_text(&view))
}

/// Print the cart total.
#[must_use]
pub fn total(config: &CartConfig) -> String {
    open(config).total().to_string()
}

fn render_text(view: &CartView) -> String {
    let mut out = String::new();
    match view {
        CartView::Empty => out.push_str("Корзина пуста.\n"),
        CartView::Items { items, .. } => {
            for item in items {
                let _ = writeln!(
                    out,
                    "{} ({} шт.)  {} руб.  [{}]",
                    item.name, item.quantity, item.line_price, item.id
                );
            }
        }
    }
    let _ = write!(out, "Total: {}", view.subtotal());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopcart_core::Price;
    use shopcart_storefront::CartError;

    use super::*;
    use crate::PriceArgs;

    fn config(dir: &tempfile::TempDir) -> CartConfig {
        CartConfig {
            data_dir: dir.path().to_path_buf(),
            ..CartConfig::default()
        }
    }

    fn add_args(id: &str, price: Option<u64>, price_text: Option<&str>) -> AddArgs {
        AddArgs {
            id: id.to_string(),
            name: format!("Product {id}"),
            image: None,
            price: PriceArgs {
                price: price.map(Price::from_units),
                price_text: price_text.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_state_survives_between_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        add(&config, add_args("A", None, Some("200 руб."))).unwrap();
        add(&config, add_args("A", None, Some("999 руб."))).unwrap();
        assert_eq!(total(&config), "400");

        let out = remove(&config, "A").unwrap();
        assert!(out.starts_with("removed A"));
        assert_eq!(total(&config), "0");
    }

    #[test]
    fn test_add_reports_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        assert_eq!(
            add(&config, add_args("A", Some(10), None)).unwrap(),
            "A x1 (total: 10)"
        );
        assert_eq!(
            add(&config, add_args("A", Some(10), None)).unwrap(),
            "A x2 (total: 20)"
        );
    }

    #[test]
    fn test_add_without_digits_fails_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let err = add(&config, add_args("A", None, Some("Free item"))).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Cart(CartError::UnparsablePrice(_))
        ));
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_remove_absent() {
        let dir = tempfile::tempdir().unwrap();
        let out = remove(&config(&dir), "ghost").unwrap();
        assert_eq!(out, "ghost not in cart (total: 0)");
    }

    #[test]
    fn test_show_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        assert_eq!(show(&config, false).unwrap(), "Корзина пуста.\nTotal: 0");

        add(&config, add_args("A", Some(150), None)).unwrap();
        add(&config, add_args("A", Some(150), None)).unwrap();
        assert_eq!(
            show(&config, false).unwrap(),
            "Product A (2 шт.)  300 руб.  [A]\nTotal: 300"
        );
    }

    #[test]
    fn test_show_html_regions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        add(&config, add_args("A", Some(150), None)).unwrap();

        let html = show(&config, true).unwrap();
        assert!(html.contains(r#"<div id="cart-items">"#));
        assert!(html.contains("Product A (1 шт.)"));
        assert!(html.ends_with(r#"<div id="cart-total">150</div>"#));
    }
}
