//! Domain layer for the Vitrine storefront.
//!
//! Holds the content model and its row mapper, the external catalog model,
//! the storage seam ([`backend::ContentBackend`]), the content service and
//! the site content store consumed by the page renderers.

pub mod backend;
pub mod catalog;
pub mod content;
pub mod defaults;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
