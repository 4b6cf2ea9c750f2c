//! Site content store.
//!
//! Holds the snapshot of every content item that the public pages render
//! from. It is loaded once at startup and refreshed explicitly after admin
//! mutations; renderers only ever see clones of the snapshot.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::content::{find_section, ContentItem};
use crate::service::{ContentService, ServiceError};
use crate::types::Timestamp;

#[derive(Debug, Default)]
struct Snapshot {
    items: Vec<ContentItem>,
    refreshed_at: Option<Timestamp>,
}

/// Shared, explicitly refreshed view of the `content` table.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    inner: Arc<RwLock<Snapshot>>,
    /// Held from fetch to swap so refreshes land in the order they read.
    refresh_lock: Arc<Mutex<()>>,
}

impl SiteContent {
    /// An empty store that has never been loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load at startup.
    pub async fn initialize(&self, service: &ContentService) -> Result<usize, ServiceError> {
        let count = self.refresh(service).await?;
        tracing::info!(count, "Site content loaded");
        Ok(count)
    }

    /// Reload every item from the backend.
    ///
    /// On failure the previous snapshot stays in place. Concurrent calls
    /// run one at a time, so a slow refresh never replaces the result of
    /// one that read the table after it.
    pub async fn refresh(&self, service: &ContentService) -> Result<usize, ServiceError> {
        let _guard = self.refresh_lock.lock().await;

        let items = match service.try_fetch_all_content().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Site content refresh failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let count = items.len();
        let mut snapshot = self.inner.write().await;
        snapshot.items = items;
        snapshot.refreshed_at = Some(chrono::Utc::now());
        tracing::debug!(count, "Site content refreshed");
        Ok(count)
    }

    /// Clone of the current items.
    pub async fn snapshot(&self) -> Vec<ContentItem> {
        self.inner.read().await.items.clone()
    }

    /// First item in `section`, if any.
    pub async fn find_section(&self, section: &str) -> Option<ContentItem> {
        let snapshot = self.inner.read().await;
        find_section(&snapshot.items, section).cloned()
    }

    /// When the snapshot was last replaced; `None` before the first load.
    pub async fn refreshed_at(&self) -> Option<Timestamp> {
        self.inner.read().await.refreshed_at
    }
}
