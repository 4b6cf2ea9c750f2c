//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod content_repo;

pub use catalog_repo::CatalogRepo;
pub use content_repo::ContentRepo;
