//! Route definitions for catalogs, mounted at `/catalogs`.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET /          -> list_catalogs
/// GET /{id}      -> get_catalog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_catalogs))
        .route("/{id}", get(catalog::get_catalog))
}
