//! Integration tests for cart mutation sequences.
//!
//! These drive a [`CartStore`] the way a page does: add buttons that supply
//! scraped price text, removal controls keyed by product ID, and a redraw of
//! the cart regions after each change.

#![allow(clippy::unwrap_used)]

use shopcart_core::{LineItem, NewLineItem, Price};
use shopcart_storefront::{CartError, CartStore, CartView, HtmlPresenter, KeyValueStore, Presenter};

fn fold_total<S: KeyValueStore, P: Presenter>(cart: &CartStore<S, P>) -> Price {
    cart.items().map(LineItem::extended_price).sum()
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn test_same_product_twice_then_removed() {
    let mut cart = CartStore::in_memory();

    cart.add_from_text("A", "Product A", None, "200 руб.").unwrap();
    cart.add_from_text("A", "Product A", None, "999 руб.").unwrap();

    assert_eq!(cart.len(), 1);
    let line = cart.get("A").unwrap();
    assert_eq!(line.quantity.get(), 2);
    assert_eq!(line.unit_price, Price::from_units(200));
    assert_eq!(cart.total(), Price::from_units(400));

    assert!(cart.remove("A").unwrap());
    assert_eq!(cart.total(), Price::ZERO);
    assert!(cart.render().is_empty());
}

#[test]
fn test_price_text_extraction() {
    let mut cart = CartStore::in_memory();

    cart.add_from_text("tea", "Tea", None, "Price: 150 руб.").unwrap();
    assert_eq!(cart.get("tea").unwrap().unit_price, Price::from_units(150));

    let err = cart.add_from_text("gift", "Gift", None, "Free item").unwrap_err();
    assert!(matches!(err, CartError::UnparsablePrice(_)));
    assert_eq!(cart.len(), 1);
    assert!(cart.get("gift").is_none());
    assert_eq!(cart.total(), Price::from_units(150));
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_total_tracks_items_through_mixed_sequence() {
    let mut cart = CartStore::in_memory();

    let steps: &[(&str, &str)] = &[
        ("add", "x:120 руб."),
        ("add", "y:15"),
        ("add", "x:1"),
        ("remove", "z"),
        ("add", "z:no price"),
        ("add", "w:0 руб."),
        ("remove", "y"),
        ("add", "y:30"),
        ("remove", "x"),
    ];

    for (op, arg) in steps {
        match *op {
            "add" => {
                let (id, text) = arg.split_once(':').unwrap();
                // Unparsable text is expected to fail for "z".
                let _ = cart.add_from_text(id, id, None, text);
            }
            _ => {
                cart.remove(arg).unwrap();
            }
        }
        assert_eq!(cart.total(), fold_total(&cart), "after {op} {arg}");
        assert!(cart.items().all(|item| item.quantity.get() >= 1));
    }

    let ids: Vec<&str> = cart.items().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["w", "y"]);
    assert_eq!(cart.total(), Price::from_units(30));
}

#[test]
fn test_remove_missing_is_noop() {
    let mut cart = CartStore::in_memory();
    cart.add(NewLineItem::new("a", "A", None, Price::from_units(5)))
        .unwrap();
    let before = cart.snapshot();

    assert!(!cart.remove("nope").unwrap());
    assert_eq!(cart.snapshot(), before);
    assert_eq!(cart.total(), Price::from_units(5));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_empty_cart_renders_marker_and_zero_total() {
    let mut cart = CartStore::in_memory().with_presenter(HtmlPresenter::new());

    assert_eq!(cart.render(), CartView::Empty);
    assert_eq!(cart.total(), Price::ZERO);
    assert_eq!(cart.presenter().total_text(), Some("0"));
    assert_eq!(
        cart.presenter().items_html().map(str::trim),
        Some("Корзина пуста.")
    );
}

#[test]
fn test_render_records_per_item() {
    let mut cart = CartStore::in_memory();
    cart.add(NewLineItem::new(
        "a",
        "Apple",
        Some("img/apple.png".to_owned()),
        Price::from_units(3),
    ))
    .unwrap();
    cart.add(NewLineItem::new("b", "Bread", None, Price::from_units(40)))
        .unwrap();
    cart.add(NewLineItem::new("a", "Apple", None, Price::from_units(3)))
        .unwrap();

    let view = cart.render();
    let rows: Vec<(&str, &str, u32, Price)> = view
        .items()
        .iter()
        .map(|v| (v.id.as_str(), v.image.as_str(), v.quantity, v.line_price))
        .collect();

    assert_eq!(
        rows,
        [
            ("a", "img/apple.png", 2, Price::from_units(6)),
            ("b", "images/default_image.png", 1, Price::from_units(40)),
        ]
    );
    assert_eq!(view.item_count(), 3);
    assert_eq!(view.subtotal(), Price::from_units(46));
}

#[test]
fn test_page_without_cart_regions_still_mutates() {
    let mut cart = CartStore::in_memory().with_presenter(
        HtmlPresenter::new()
            .without_items_region()
            .without_total_region(),
    );

    cart.add_from_text("a", "A", None, "10").unwrap();
    cart.add_from_text("b", "B", None, "20").unwrap();
    cart.remove("a").unwrap();

    assert_eq!(cart.total(), Price::from_units(20));
    assert_eq!(cart.presenter().items_html(), None);
    assert_eq!(cart.presenter().total_text(), None);
}
