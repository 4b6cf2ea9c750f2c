pub mod catalog;
pub mod content;
pub mod health;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /content                  list (?section=), create
/// /content/batch            persist a batch (POST)
/// /content/seed             seed default content (POST)
/// /content/refresh          reload the site snapshot (POST)
/// /content/{id}             get, upsert, delete
///
/// /catalogs                 list
/// /catalogs/{id}            get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content::router())
        .nest("/catalogs", catalog::router())
}
