//! Public storefront pages.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::catalog_modal::{self, ModalProps};
use crate::views::{html, manager};

/// Document title of the storefront.
pub const SITE_TITLE: &str = "Móveis e Decoração";

/// GET /
///
/// Render the home page from the site snapshot.
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.site.snapshot().await;

    let sections: Vec<String> = manager::render(&content).into_iter().collect();

    Html(html::page(SITE_TITLE, &sections))
}

/// Query parameters for the catalog modal fragment.
#[derive(Debug, Deserialize)]
pub struct CatalogModalQuery {
    /// `false` renders nothing (default `true`).
    pub open: Option<bool>,
    /// Where the close control navigates to (default `/`).
    pub close: Option<String>,
}

/// GET /catalogs/{id}
///
/// Render the catalog viewer modal as an HTML fragment.
pub async fn catalog_modal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CatalogModalQuery>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.content.fetch_catalog(&id).await?;

    let props = ModalProps {
        is_open: params.open.unwrap_or(true),
        close_href: params
            .close
            .filter(|href| is_local_path(href))
            .unwrap_or_else(|| "/".to_string()),
    };

    Ok(Html(catalog_modal::render(&catalog, &props).unwrap_or_default()))
}

/// Only same-site absolute paths are accepted as close targets.
///
/// Browsers drop tabs and newlines while parsing a URL, so any control
/// character could turn `/\t/host` into a protocol-relative link.
fn is_local_path(href: &str) -> bool {
    href.starts_with('/')
        && !href.starts_with("//")
        && !href.contains('\\')
        && !href.chars().any(char::is_control)
}
