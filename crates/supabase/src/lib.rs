//! Supabase (PostgREST) transport for Vitrine content.
//!
//! [`client::SupabaseClient`] speaks the REST table API;
//! [`backend::SupabaseBackend`] adapts it to the
//! [`vitrine_core::backend::ContentBackend`] seam.

pub mod backend;
pub mod client;

pub use backend::SupabaseBackend;
pub use client::{SupabaseClient, SupabaseConfig, SupabaseError};
