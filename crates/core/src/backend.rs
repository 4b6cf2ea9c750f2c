//! Storage seam for the `content` and `external_url_catalogs` tables.
//!
//! [`ContentBackend`] exposes the primitives the content service needs.
//! Implementations live next to their transport (PostgREST in
//! `vitrine-supabase`, PostgreSQL in `vitrine-db`); [`InMemoryBackend`] is
//! for tests and local development.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::ExternalUrlCatalog;
use crate::content::ContentRecord;

/// Errors surfaced by a storage backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (network, DNS, TLS, pool).
    #[error("Backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("Backend API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The database rejected the statement.
    #[error("Database error: {0}")]
    Database(String),

    /// The response could not be decoded into rows.
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

/// Row-level operations against the content store.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Rows whose `section` equals `section` exactly.
    async fn select_by_section(&self, section: &str) -> Result<Vec<ContentRecord>, BackendError>;

    /// The row with primary key `id`, if any.
    async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError>;

    /// Every row of the table.
    async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError>;

    /// Insert or replace one row keyed by `id`, returning the stored rows.
    async fn upsert(&self, record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError>;

    /// Insert or replace many rows in one call.
    ///
    /// The default issues one [`upsert`](Self::upsert) per record and stops
    /// at the first failure. Backends with a native bulk write override it.
    async fn upsert_many(
        &self,
        records: &[ContentRecord],
    ) -> Result<Vec<ContentRecord>, BackendError> {
        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            stored.extend(self.upsert(record).await?);
        }
        Ok(stored)
    }

    /// Delete the row with primary key `id`. Missing rows are not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError>;

    /// The catalog with primary key `id`, if any.
    async fn select_catalog(&self, id: &str) -> Result<Option<ExternalUrlCatalog>, BackendError>;

    /// Every catalog, ordered by title.
    async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), BackendError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Process-local backend keyed by row id.
#[derive(Default)]
pub struct InMemoryBackend {
    rows: RwLock<BTreeMap<String, ContentRecord>>,
    catalogs: RwLock<BTreeMap<String, ExternalUrlCatalog>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `catalogs`.
    pub fn with_catalogs(catalogs: impl IntoIterator<Item = ExternalUrlCatalog>) -> Self {
        let catalogs = catalogs.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            rows: RwLock::default(),
            catalogs: RwLock::new(catalogs),
        }
    }

    /// Add or replace a catalog.
    pub async fn put_catalog(&self, catalog: ExternalUrlCatalog) {
        self.catalogs
            .write()
            .await
            .insert(catalog.id.clone(), catalog);
    }

    /// Number of stored content rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ContentBackend for InMemoryBackend {
    async fn select_by_section(&self, section: &str) -> Result<Vec<ContentRecord>, BackendError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|r| r.section == section)
            .cloned()
            .collect())
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
        let now = chrono::Utc::now();
        let mut rows = self.rows.write().await;

        let mut stored = record.clone();
        stored.created_at = rows
            .get(&record.id)
            .and_then(|existing| existing.created_at)
            .or(Some(now));
        stored.updated_at = Some(now);

        rows.insert(stored.id.clone(), stored.clone());
        Ok(vec![stored])
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
        self.rows.write().await.remove(id);
        Ok(())
    }

    async fn select_catalog(&self, id: &str) -> Result<Option<ExternalUrlCatalog>, BackendError> {
        Ok(self.catalogs.read().await.get(id).cloned())
    }

    async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
        let mut catalogs: Vec<_> = self.catalogs.read().await.values().cloned().collect();
        catalogs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(catalogs)
    }

    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{map_item_to_record, ContentItem};

    fn record(id: &str, section: &str) -> ContentRecord {
        map_item_to_record(&ContentItem::new(id, section, "t", "d", "i.jpg"))
    }

    #[tokio::test]
    async fn upsert_replaces_by_id_and_keeps_created_at() {
        let backend = InMemoryBackend::new();
        let first = backend.upsert(&record("a", "hero")).await.unwrap();

        let mut changed = record("a", "hero");
        changed.title = "novo".into();
        let second = backend.upsert(&changed).await.unwrap();

        assert_eq!(backend.len().await, 1);
        assert_eq!(second[0].title, "novo");
        assert_eq!(second[0].created_at, first[0].created_at);
    }

    #[tokio::test]
    async fn select_by_section_filters_exactly() {
        let backend = InMemoryBackend::new();
        backend.upsert(&record("a", "hero")).await.unwrap();
        backend.upsert(&record("b", "heroes")).await.unwrap();

        let rows = backend.select_by_section("hero").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a");
    }

    #[tokio::test]
    async fn delete_of_missing_row_succeeds() {
        let backend = InMemoryBackend::new();
        assert!(backend.delete_by_id("nope").await.is_ok());
    }

    #[tokio::test]
    async fn default_upsert_many_writes_every_record() {
        let backend = InMemoryBackend::new();
        let stored = backend
            .upsert_many(&[record("a", "hero"), record("b", "about")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(backend.len().await, 2);
    }

    #[tokio::test]
    async fn catalogs_are_listed_by_title() {
        let mk = |id: &str, title: &str| ExternalUrlCatalog {
            id: id.into(),
            title: title.into(),
            description: None,
            external_content_image_urls: vec![],
        };
        let backend = InMemoryBackend::with_catalogs([mk("1", "Quarto"), mk("2", "Cozinha")]);

        let titles: Vec<_> = backend
            .select_catalogs()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, ["Cozinha", "Quarto"]);
        assert!(backend.select_catalog("2").await.unwrap().is_some());
    }
}
