//! Server-rendered HTML for the public storefront.
//!
//! Renderers are pure functions of already-fetched data; they never touch
//! the backend or the site store.

pub mod catalog_modal;
pub mod html;
pub mod manager;
