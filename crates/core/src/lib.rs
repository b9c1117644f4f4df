//! Shopcart Core - Shared cart domain types.
//!
//! This crate provides the types every Shopcart component agrees on:
//! - `storefront` - Cart store, persistence backends and presentation
//! - `cli` - Command-line driver for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types and their validation - no I/O, no
//! storage access, no rendering. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
