//! Admin handlers for external URL catalogs (read-only).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalogs
pub async fn list_catalogs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let catalogs = state.content.list_catalogs().await?;

    Ok(Json(DataResponse { data: catalogs }))
}

/// GET /api/v1/catalogs/{id}
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.content.fetch_catalog(&id).await?;

    Ok(Json(DataResponse { data: catalog }))
}
