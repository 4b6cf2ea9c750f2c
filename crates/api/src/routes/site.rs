//! Public storefront pages (root level, NOT under `/api/v1`).

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// ```text
/// GET /                -> home
/// GET /catalogs/{id}   -> catalog_modal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::home))
        .route("/catalogs/{id}", get(site::catalog_modal))
}
