//! Core types for Shopcart.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::ProductId;
pub use line_item::{LineItem, NewLineItem};
pub use price::{Price, PriceError};
