//! Content service: fetch, save and delete site content.
//!
//! Two layers of API are exposed:
//!
//! - `try_*` methods return [`ServiceError`] so callers can tell "not
//!   found", "empty" and "backend failure" apart.
//! - The plain methods keep the storefront's sentinel contract: failures
//!   are logged and collapsed into a neutral value (`Vec::new()`, `None`,
//!   `false`). [`ContentService::persist_content_batch`] is the one plain
//!   method that still returns its error.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{BackendError, ContentBackend};
use crate::catalog::ExternalUrlCatalog;
use crate::content::{
    is_valid_scale, map_item_to_record, map_record_to_item, ContentItem, ContentRecord,
};
use crate::defaults::default_content;
use crate::error::CoreError;

/// Errors from the typed content service API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// The item has no section and was not written.
    #[error("Content item '{id}' has no section")]
    MissingSection { id: String },

    /// The item's scale hint is zero, negative or not finite.
    #[error("Content item '{id}' has invalid scale {scale}")]
    InvalidScale { id: String, scale: f64 },

    /// No row with the requested id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The upsert succeeded but returned no rows.
    #[error("Upsert of content item '{id}' returned no rows")]
    EmptyResponse { id: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<ServiceError> for CoreError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingSection { id } => CoreError::Validation(format!(
                "Content item '{id}' must have a non-empty section"
            )),
            ServiceError::InvalidScale { id, scale } => CoreError::Validation(format!(
                "Content item '{id}' has invalid scale {scale}; must be a positive number"
            )),
            ServiceError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            ServiceError::EmptyResponse { id } => {
                CoreError::Internal(format!("Upsert of content item '{id}' returned no rows"))
            }
            ServiceError::Backend(e) => CoreError::Upstream(e.to_string()),
        }
    }
}

/// Content operations over a shared [`ContentBackend`].
///
/// Cheap to clone; every clone talks to the same backend.
#[derive(Clone)]
pub struct ContentService {
    backend: Arc<dyn ContentBackend>,
}

impl ContentService {
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// The backend this service writes to.
    pub fn backend(&self) -> &Arc<dyn ContentBackend> {
        &self.backend
    }

    // -----------------------------------------------------------------------
    // Typed API
    // -----------------------------------------------------------------------

    /// Items whose section equals `section`. Zero rows is `Ok(vec![])`.
    pub async fn try_fetch_content(&self, section: &str) -> Result<Vec<ContentItem>, ServiceError> {
        let rows = self.backend.select_by_section(section).await?;
        Ok(rows.into_iter().map(map_record_to_item).collect())
    }

    /// The item with primary key `id`.
    pub async fn try_fetch_content_by_id(&self, id: &str) -> Result<ContentItem, ServiceError> {
        self.backend
            .select_by_id(id)
            .await?
            .map(map_record_to_item)
            .ok_or_else(|| ServiceError::NotFound {
                entity: "ContentItem",
                id: id.to_string(),
            })
    }

    /// Upsert `item` and return the stored row in application shape.
    pub async fn try_save_content(&self, item: &ContentItem) -> Result<ContentItem, ServiceError> {
        let record = map_item_to_record(item);
        if !record.has_section() {
            return Err(ServiceError::MissingSection {
                id: item.id.clone(),
            });
        }
        if let Some(scale) = record.scale.filter(|s| !is_valid_scale(*s)) {
            return Err(ServiceError::InvalidScale {
                id: item.id.clone(),
                scale,
            });
        }

        let stored = self.backend.upsert(&record).await?;
        let first = stored
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::EmptyResponse {
                id: item.id.clone(),
            })?;

        tracing::debug!(id = %first.id, section = %first.section, "Content item saved");
        Ok(map_record_to_item(first))
    }

    /// Delete by id. Deleting a missing row succeeds.
    pub async fn try_delete_content(&self, id: &str) -> Result<(), ServiceError> {
        self.backend.delete_by_id(id).await?;
        tracing::debug!(id, "Content item deleted");
        Ok(())
    }

    /// Every item. Unlike [`fetch_all_content`](Self::fetch_all_content),
    /// an empty table is `Ok(vec![])`.
    pub async fn try_fetch_all_content(&self) -> Result<Vec<ContentItem>, ServiceError> {
        let rows = self.backend.select_all().await?;
        Ok(rows.into_iter().map(map_record_to_item).collect())
    }

    /// The catalog with primary key `id`.
    pub async fn fetch_catalog(&self, id: &str) -> Result<ExternalUrlCatalog, ServiceError> {
        self.backend
            .select_catalog(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "ExternalUrlCatalog",
                id: id.to_string(),
            })
    }

    /// Every catalog.
    pub async fn list_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, ServiceError> {
        Ok(self.backend.select_catalogs().await?)
    }

    // -----------------------------------------------------------------------
    // Sentinel API
    // -----------------------------------------------------------------------

    /// Items for `section`; an empty list on any failure.
    pub async fn fetch_content(&self, section: &str) -> Vec<ContentItem> {
        match self.try_fetch_content(section).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(section, error = %e, "Error fetching content");
                Vec::new()
            }
        }
    }

    /// Upsert `item`; `None` on failure or when the backend returned no row.
    pub async fn save_content(&self, item: &ContentItem) -> Option<ContentItem> {
        match self.try_save_content(item).await {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::error!(id = %item.id, error = %e, "Error saving content");
                None
            }
        }
    }

    /// Delete by id; `true` when the call completed without error.
    pub async fn delete_content(&self, id: &str) -> bool {
        match self.try_delete_content(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(id, error = %e, "Error deleting content");
                false
            }
        }
    }

    /// Every item, or `None`.
    ///
    /// `None` means either the fetch failed or the table is empty; callers
    /// that need to tell these apart use
    /// [`try_fetch_all_content`](Self::try_fetch_all_content).
    pub async fn fetch_all_content(&self) -> Option<Vec<ContentItem>> {
        match self.try_fetch_all_content().await {
            Ok(items) if items.is_empty() => None,
            Ok(items) => Some(items),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching all content");
                None
            }
        }
    }

    /// Upsert the static default content, item by item.
    ///
    /// Items without a section are skipped. A failed item is logged and the
    /// remaining items are still written. Never fails.
    pub async fn seed_default_content(&self) {
        self.seed_content(&default_content()).await;
    }

    /// Seed an arbitrary list with the same per-item semantics as
    /// [`seed_default_content`](Self::seed_default_content).
    ///
    /// Returns the number of items written.
    pub async fn seed_content(&self, items: &[ContentItem]) -> usize {
        let mut written = 0;
        for item in items {
            let record = map_item_to_record(item);
            if !record.has_section() {
                tracing::debug!(id = %item.id, "Skipping default content without section");
                continue;
            }
            match self.backend.upsert(&record).await {
                Ok(_) => written += 1,
                Err(e) => {
                    tracing::error!(id = %item.id, error = %e, "Error seeding default content");
                }
            }
        }
        tracing::info!(written, total = items.len(), "Default content seeded");
        written
    }

    /// Upsert every item that has a section in a single batched write.
    ///
    /// Items without a section are skipped. When an id repeats, the last
    /// occurrence wins. The first backend failure aborts the batch and is
    /// returned.
    pub async fn persist_content_batch(&self, items: &[ContentItem]) -> Result<(), ServiceError> {
        let records = last_write_wins(
            items
                .iter()
                .map(map_item_to_record)
                .filter(ContentRecord::has_section),
        );

        if records.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.backend.upsert_many(&records).await {
            tracing::error!(count = records.len(), error = %e, "Error saving content batch");
            return Err(e.into());
        }

        tracing::info!(count = records.len(), "Content batch saved");
        Ok(())
    }
}

/// Collapse records sharing an id into the last one, keeping the position
/// of the first. A single bulk upsert may not touch the same row twice.
fn last_write_wins(records: impl Iterator<Item = ContentRecord>) -> Vec<ContentRecord> {
    let mut out: Vec<ContentRecord> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    for record in records {
        match position.get(&record.id) {
            Some(&i) => out[i] = record,
            None => {
                position.insert(record.id.clone(), out.len());
                out.push(record);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::content::SECTION_MANAGER;

    /// Wraps the in-memory backend, failing every call when `down` is set
    /// and failing upserts of the ids in `reject`.
    #[derive(Default)]
    struct FlakyBackend {
        inner: InMemoryBackend,
        down: bool,
        reject: HashSet<String>,
        upsert_calls: AtomicUsize,
    }

    impl FlakyBackend {
        fn down() -> Self {
            Self {
                down: true,
                ..Self::default()
            }
        }

        fn rejecting(ids: &[&str]) -> Self {
            Self {
                reject: ids.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), BackendError> {
            if self.down {
                Err(BackendError::Request("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ContentBackend for FlakyBackend {
        async fn select_by_section(
            &self,
            section: &str,
        ) -> Result<Vec<ContentRecord>, BackendError> {
            self.check()?;
            self.inner.select_by_section(section).await
        }

        async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError> {
            self.check()?;
            self.inner.select_by_id(id).await
        }

        async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
            self.check()?;
            self.inner.select_all().await
        }

        async fn upsert(&self, record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
            self.check()?;
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            if self.reject.contains(&record.id) {
                return Err(BackendError::Api {
                    status: 409,
                    body: "duplicate key".into(),
                });
            }
            self.inner.upsert(record).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
            self.check()?;
            self.inner.delete_by_id(id).await
        }

        async fn select_catalog(
            &self,
            id: &str,
        ) -> Result<Option<ExternalUrlCatalog>, BackendError> {
            self.check()?;
            self.inner.select_catalog(id).await
        }

        async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
            self.check()?;
            self.inner.select_catalogs().await
        }

        async fn ping(&self) -> Result<(), BackendError> {
            self.check()
        }
    }

    /// Backend whose upsert reports success but returns no rows.
    struct SilentBackend(InMemoryBackend);

    #[async_trait]
    impl ContentBackend for SilentBackend {
        async fn select_by_section(&self, s: &str) -> Result<Vec<ContentRecord>, BackendError> {
            self.0.select_by_section(s).await
        }
        async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError> {
            self.0.select_by_id(id).await
        }
        async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
            self.0.select_all().await
        }
        async fn upsert(&self, r: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
            self.0.upsert(r).await?;
            Ok(vec![])
        }
        async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
            self.0.delete_by_id(id).await
        }
        async fn select_catalog(
            &self,
            id: &str,
        ) -> Result<Option<ExternalUrlCatalog>, BackendError> {
            self.0.select_catalog(id).await
        }
        async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
            self.0.select_catalogs().await
        }
        async fn ping(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn service() -> ContentService {
        ContentService::new(Arc::new(InMemoryBackend::new()))
    }

    fn jane() -> ContentItem {
        ContentItem::new(
            "m1",
            SECTION_MANAGER,
            "Jane Doe",
            "Gerente desde 2015.",
            "https://x/y.jpg",
        )
    }

    // -- fetch --------------------------------------------------------------

    #[tokio::test]
    async fn fetch_content_for_unknown_section_is_empty() {
        assert!(service().fetch_content("nothing-here").await.is_empty());
    }

    #[tokio::test]
    async fn fetch_content_returns_saved_manager() {
        let svc = service();
        svc.save_content(&jane()).await.unwrap();

        let found = svc.fetch_content(SECTION_MANAGER).await;
        assert_eq!(found, vec![jane()]);
    }

    #[tokio::test]
    async fn fetch_content_swallows_backend_errors() {
        let svc = ContentService::new(Arc::new(FlakyBackend::down()));
        assert!(svc.fetch_content(SECTION_MANAGER).await.is_empty());
        assert_matches!(
            svc.try_fetch_content(SECTION_MANAGER).await,
            Err(ServiceError::Backend(BackendError::Request(_)))
        );
    }

    #[tokio::test]
    async fn fetch_by_id_reports_not_found() {
        assert_matches!(
            service().try_fetch_content_by_id("ghost").await,
            Err(ServiceError::NotFound { entity: "ContentItem", .. })
        );
    }

    // -- save ---------------------------------------------------------------

    #[tokio::test]
    async fn save_then_fetch_by_id_round_trips() {
        let svc = service();
        let mut item = jane();
        item.scale = Some(1.1);

        let saved = svc.save_content(&item).await.unwrap();
        assert_eq!(saved, item);
        assert_eq!(svc.try_fetch_content_by_id("m1").await.unwrap(), item);
    }

    #[tokio::test]
    async fn save_without_section_writes_nothing() {
        let backend = Arc::new(InMemoryBackend::new());
        let svc = ContentService::new(backend.clone());
        let mut item = jane();
        item.section = " ".into();

        assert!(svc.save_content(&item).await.is_none());
        assert_matches!(
            svc.try_save_content(&item).await,
            Err(ServiceError::MissingSection { .. })
        );
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn save_with_non_positive_scale_is_rejected_before_write() {
        let backend = Arc::new(FlakyBackend::default());
        let svc = ContentService::new(backend.clone());

        for scale in [0.0, -1.0, f64::NAN] {
            let mut item = jane();
            item.scale = Some(scale);
            assert_matches!(
                svc.try_save_content(&item).await,
                Err(ServiceError::InvalidScale { ref id, .. }) if id == "m1"
            );
        }

        assert_eq!(backend.upsert_calls.load(Ordering::SeqCst), 0);
        let err: CoreError = ServiceError::InvalidScale {
            id: "m1".into(),
            scale: 0.0,
        }
        .into();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[tokio::test]
    async fn save_with_empty_response_is_none() {
        let svc = ContentService::new(Arc::new(SilentBackend(InMemoryBackend::new())));
        assert!(svc.save_content(&jane()).await.is_none());
        assert_matches!(
            svc.try_save_content(&jane()).await,
            Err(ServiceError::EmptyResponse { .. })
        );
    }

    #[tokio::test]
    async fn save_on_failing_backend_is_none() {
        let svc = ContentService::new(Arc::new(FlakyBackend::down()));
        assert!(svc.save_content(&jane()).await.is_none());
    }

    // -- delete -------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_item_from_section_fetch() {
        let svc = service();
        svc.save_content(&jane()).await.unwrap();

        assert!(svc.delete_content("m1").await);
        assert!(svc.fetch_content(SECTION_MANAGER).await.is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_true() {
        assert!(service().delete_content("never-existed").await);
    }

    #[tokio::test]
    async fn delete_on_failing_backend_is_false() {
        let svc = ContentService::new(Arc::new(FlakyBackend::down()));
        assert!(!svc.delete_content("m1").await);
    }

    // -- fetch all ----------------------------------------------------------

    #[tokio::test]
    async fn fetch_all_conflates_empty_and_failure() {
        assert_eq!(service().fetch_all_content().await, None);

        let down = ContentService::new(Arc::new(FlakyBackend::down()));
        assert_eq!(down.fetch_all_content().await, None);
    }

    #[tokio::test]
    async fn try_fetch_all_distinguishes_empty_from_failure() {
        assert_eq!(service().try_fetch_all_content().await, Ok(vec![]));

        let down = ContentService::new(Arc::new(FlakyBackend::down()));
        assert!(down.try_fetch_all_content().await.is_err());
    }

    #[tokio::test]
    async fn fetch_all_returns_rows_when_present() {
        let svc = service();
        svc.save_content(&jane()).await.unwrap();
        assert_eq!(svc.fetch_all_content().await.unwrap().len(), 1);
    }

    // -- seeding ------------------------------------------------------------

    #[tokio::test]
    async fn seeding_twice_produces_no_duplicates() {
        let svc = service();

        svc.seed_default_content().await;
        let first = svc.try_fetch_all_content().await.unwrap();
        svc.seed_default_content().await;
        let second = svc.try_fetch_all_content().await.unwrap();

        assert_eq!(first.len(), default_content().len());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn seeding_skips_items_without_section() {
        let svc = service();
        let mut blank = jane();
        blank.id = "blank".into();
        blank.section = String::new();

        let written = svc.seed_content(&[blank, jane()]).await;

        assert_eq!(written, 1);
        assert_matches!(
            svc.try_fetch_content_by_id("blank").await,
            Err(ServiceError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn seeding_continues_past_failed_items() {
        let backend = Arc::new(FlakyBackend::rejecting(&["hero-1"]));
        let svc = ContentService::new(backend.clone());

        svc.seed_default_content().await;

        let stored = svc.try_fetch_all_content().await.unwrap();
        assert_eq!(stored.len(), default_content().len() - 1);
        assert!(stored.iter().all(|i| i.id != "hero-1"));
    }

    // -- batch --------------------------------------------------------------

    #[tokio::test]
    async fn batch_aborts_on_first_failure() {
        let backend = Arc::new(FlakyBackend::rejecting(&["b"]));
        let svc = ContentService::new(backend.clone());
        let items: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| ContentItem::new(*id, "catalog", "t", "d", "i.jpg"))
            .collect();

        let result = svc.persist_content_batch(&items).await;

        assert_matches!(
            result,
            Err(ServiceError::Backend(BackendError::Api { status: 409, .. }))
        );
        assert_eq!(backend.upsert_calls.load(Ordering::SeqCst), 2);
        assert!(svc.try_fetch_content_by_id("c").await.is_err());
    }

    #[tokio::test]
    async fn batch_with_repeated_id_keeps_last_item() {
        let backend = Arc::new(FlakyBackend::default());
        let svc = ContentService::new(backend.clone());
        let first = ContentItem::new("a", "catalog", "x", "", "a.jpg");
        let last = ContentItem::new("a", "catalog", "y", "", "a.jpg");
        let other = ContentItem::new("b", "catalog", "z", "", "b.jpg");

        svc.persist_content_batch(&[first, other, last]).await.unwrap();

        assert_eq!(backend.upsert_calls.load(Ordering::SeqCst), 2);
        assert_eq!(svc.try_fetch_content_by_id("a").await.unwrap().title, "y");
    }

    #[test]
    fn last_write_wins_keeps_first_position() {
        let records = ["a", "b", "a"]
            .iter()
            .enumerate()
            .map(|(n, id)| {
                map_item_to_record(&ContentItem::new(*id, "catalog", n.to_string(), "", ""))
            });

        let kept = last_write_wins(records);

        let pairs: Vec<_> = kept.iter().map(|r| (r.id.as_str(), r.title.as_str())).collect();
        assert_eq!(pairs, [("a", "2"), ("b", "1")]);
    }

    #[tokio::test]
    async fn batch_skips_items_without_section() {
        let svc = service();
        let mut blank = jane();
        blank.id = "blank".into();
        blank.section = String::new();

        svc.persist_content_batch(&[blank, jane()]).await.unwrap();

        let all = svc.try_fetch_all_content().await.unwrap();
        assert_eq!(all, vec![jane()]);
    }

    #[tokio::test]
    async fn empty_batch_is_ok() {
        assert!(service().persist_content_batch(&[]).await.is_ok());
    }

    // -- catalogs -----------------------------------------------------------

    #[tokio::test]
    async fn missing_catalog_is_not_found() {
        assert_matches!(
            service().fetch_catalog("c1").await,
            Err(ServiceError::NotFound { entity: "ExternalUrlCatalog", .. })
        );
    }

    #[test]
    fn service_errors_map_to_core_errors() {
        let err: CoreError = ServiceError::MissingSection { id: "x".into() }.into();
        assert_matches!(err, CoreError::Validation(_));

        let err: CoreError = ServiceError::Backend(BackendError::Request("boom".into())).into();
        assert_matches!(err, CoreError::Upstream(_));
    }
}
