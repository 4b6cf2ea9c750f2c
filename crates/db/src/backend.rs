//! [`ContentBackend`] over a PostgreSQL pool.

use async_trait::async_trait;
use vitrine_core::backend::{BackendError, ContentBackend};
use vitrine_core::catalog::ExternalUrlCatalog;
use vitrine_core::content::ContentRecord;

use crate::repositories::{CatalogRepo, ContentRepo};
use crate::DbPool;

/// Content backend talking to PostgreSQL directly.
#[derive(Debug, Clone)]
pub struct PgContentBackend {
    pool: DbPool,
}

impl PgContentBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Classify a sqlx error for the service layer.
fn backend_error(err: sqlx::Error) -> BackendError {
    match err {
        sqlx::Error::Database(db_err) => BackendError::Database(db_err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_) => BackendError::Decode(err.to_string()),
        other => BackendError::Request(other.to_string()),
    }
}

#[async_trait]
impl ContentBackend for PgContentBackend {
    async fn select_by_section(&self, section: &str) -> Result<Vec<ContentRecord>, BackendError> {
        let rows = ContentRepo::list_by_section(&self.pool, section)
            .await
            .map_err(backend_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError> {
        let row = ContentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend_error)?;
        Ok(row.map(Into::into))
    }

    async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
        let rows = ContentRepo::list_all(&self.pool)
            .await
            .map_err(backend_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
        let row = ContentRepo::upsert(&self.pool, record)
            .await
            .map_err(backend_error)?;
        Ok(vec![row.into()])
    }

    /// One transaction for the whole batch.
    async fn upsert_many(
        &self,
        records: &[ContentRecord],
    ) -> Result<Vec<ContentRecord>, BackendError> {
        let rows = ContentRepo::upsert_many(&self.pool, records)
            .await
            .map_err(backend_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
        let deleted = ContentRepo::delete(&self.pool, id)
            .await
            .map_err(backend_error)?;
        if !deleted {
            tracing::debug!(id, "Delete matched no content row");
        }
        Ok(())
    }

    async fn select_catalog(&self, id: &str) -> Result<Option<ExternalUrlCatalog>, BackendError> {
        let row = CatalogRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend_error)?;
        Ok(row.map(Into::into))
    }

    async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
        let rows = CatalogRepo::list(&self.pool).await.map_err(backend_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        crate::health_check(&self.pool).await.map_err(backend_error)
    }
}
