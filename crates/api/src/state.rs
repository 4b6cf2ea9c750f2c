use std::sync::Arc;

use vitrine_core::service::ContentService;
use vitrine_core::store::SiteContent;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Content operations over the configured backend.
    pub content: ContentService,
    /// Snapshot the public pages render from.
    pub site: SiteContent,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Reload the site snapshot after a successful write.
    ///
    /// A failed reload leaves the old snapshot in place; the write itself
    /// already succeeded, so the failure is only logged.
    pub async fn refresh_site(&self) {
        if let Err(e) = self.site.refresh(&self.content).await {
            tracing::warn!(error = %e, "Site content refresh after write failed");
        }
    }
}
