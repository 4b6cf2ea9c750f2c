//! Route definitions for admin content management, mounted at `/content`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// ```text
/// GET    /           -> list_content
/// POST   /           -> create_content
/// POST   /batch      -> persist_batch
/// POST   /seed       -> seed_defaults
/// POST   /refresh    -> refresh_site
/// GET    /{id}       -> get_content
/// PUT    /{id}       -> put_content
/// DELETE /{id}       -> delete_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(content::list_content).post(content::create_content),
        )
        .route("/batch", post(content::persist_batch))
        .route("/seed", post(content::seed_defaults))
        .route("/refresh", post(content::refresh_site))
        .route(
            "/{id}",
            get(content::get_content)
                .put(content::put_content)
                .delete(content::delete_content),
        )
}
