//! Shopcart Storefront library.
//!
//! The cart store and everything it talks to: the key/value store that keeps
//! the cart across restarts and the presenter that draws it.
//!
//! # Modules
//!
//! - [`cart`] - [`CartStore`]: load, add, remove, total, render
//! - [`storage`] - Key/value persistence backends
//! - [`view`] - Display records produced by rendering
//! - [`presenter`] - Drawing display records (HTML via askama)
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod presenter;
pub mod storage;
pub mod view;

pub use cart::CartStore;
pub use config::CartConfig;
pub use error::{CartError, Result};
pub use presenter::{DisplayError, HtmlPresenter, Presenter};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use view::{CartItemView, CartView};
