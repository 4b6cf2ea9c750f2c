//! Row structs for the storefront tables.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and its conversion into the shared `vitrine-core` type.

pub mod catalog;
pub mod content;
