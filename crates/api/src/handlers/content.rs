//! Admin handlers for site content.
//!
//! Every successful write reloads the site snapshot so the public pages
//! reflect it on the next request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vitrine_core::content::{has_section, validate_item, ContentItem};

use crate::error::{AppError, AppResult};
use crate::response::{CountResponse, DataResponse};
use crate::state::AppState;

/// Query parameters for `GET /content`.
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub section: Option<String>,
}

/// GET /api/v1/content?section=
///
/// List items in `section`, or every item when the parameter is omitted.
/// Zero rows is an empty list, never an error. A blank `section` is 400.
pub async fn list_content(
    State(state): State<AppState>,
    Query(params): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    if params.section.as_deref().is_some_and(|s| !has_section(s)) {
        return Err(AppError::BadRequest("section must not be empty".to_string()));
    }

    let items = match params.section.as_deref() {
        Some(section) => state.content.try_fetch_content(section).await?,
        None => state.content.try_fetch_all_content().await?,
    };

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/content/{id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state.content.try_fetch_content_by_id(&id).await?;

    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/content
///
/// Upsert an item. An empty `id` gets a freshly generated UUID.
pub async fn create_content(
    State(state): State<AppState>,
    Json(mut input): Json<ContentItem>,
) -> AppResult<impl IntoResponse> {
    if input.id.trim().is_empty() {
        input.id = uuid::Uuid::new_v4().to_string();
    }

    let saved = save(&state, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// PUT /api/v1/content/{id}
///
/// Upsert an item; the path id wins over any id in the body.
pub async fn put_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<ContentItem>,
) -> AppResult<impl IntoResponse> {
    input.id = id;

    let saved = save(&state, &input).await?;

    Ok(Json(DataResponse { data: saved }))
}

/// DELETE /api/v1/content/{id}
///
/// Idempotent: deleting an unknown id is still 204.
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.content.try_delete_content(&id).await?;
    state.refresh_site().await;

    tracing::info!(id = %id, "Content item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/content/batch
///
/// Persist a list of items. Items without a section are skipped; the first
/// backend failure aborts the batch.
pub async fn persist_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<ContentItem>>,
) -> AppResult<impl IntoResponse> {
    if let Some(bad) = items
        .iter()
        .filter(|i| i.has_section())
        .find_map(|i| validate_item(i).err())
    {
        return Err(AppError::Core(bad));
    }

    state.content.persist_content_batch(&items).await?;
    state.refresh_site().await;

    tracing::info!(count = items.len(), "Content batch persisted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/content/seed
///
/// Upsert the default content. Per-item failures are logged and skipped.
pub async fn seed_defaults(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let defaults = vitrine_core::defaults::default_content();
    let count = state.content.seed_content(&defaults).await;
    state.refresh_site().await;

    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// POST /api/v1/content/refresh
///
/// Reload the site snapshot from the backend.
pub async fn refresh_site(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = state.site.refresh(&state.content).await?;

    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

async fn save(state: &AppState, input: &ContentItem) -> AppResult<ContentItem> {
    validate_item(input)?;

    let saved = state.content.try_save_content(input).await?;
    state.refresh_site().await;

    tracing::info!(id = %saved.id, section = %saved.section, "Content item saved");

    Ok(saved)
}
