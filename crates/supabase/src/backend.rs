//! [`ContentBackend`] over the Supabase REST table API.

use async_trait::async_trait;
use vitrine_core::backend::{BackendError, ContentBackend};
use vitrine_core::catalog::ExternalUrlCatalog;
use vitrine_core::content::ContentRecord;

use crate::client::{Filter, SupabaseClient, SupabaseError};

/// Table holding site content rows.
pub const CONTENT_TABLE: &str = "content";

/// Table holding external URL catalogs.
pub const CATALOG_TABLE: &str = "external_url_catalogs";

impl From<SupabaseError> for BackendError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Request(e) => BackendError::Request(e.to_string()),
            SupabaseError::ApiError { status, body } => BackendError::Api { status, body },
            SupabaseError::Decode(e) => BackendError::Decode(e.to_string()),
        }
    }
}

/// Content backend backed by a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    client: SupabaseClient,
}

impl SupabaseBackend {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentBackend for SupabaseBackend {
    async fn select_by_section(&self, section: &str) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self
            .client
            .select(CONTENT_TABLE, &[Filter::eq("section", section)], None)
            .await?)
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<ContentRecord>, BackendError> {
        let rows: Vec<ContentRecord> = self
            .client
            .select(CONTENT_TABLE, &[Filter::eq("id", id)], None)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn select_all(&self) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self.client.select(CONTENT_TABLE, &[], None).await?)
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self.client.upsert(CONTENT_TABLE, record).await?)
    }

    /// One bulk POST; PostgREST applies the array in a single transaction.
    async fn upsert_many(
        &self,
        records: &[ContentRecord],
    ) -> Result<Vec<ContentRecord>, BackendError> {
        Ok(self.client.upsert(CONTENT_TABLE, records).await?)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
        Ok(self
            .client
            .delete(CONTENT_TABLE, &[Filter::eq("id", id)])
            .await?)
    }

    async fn select_catalog(&self, id: &str) -> Result<Option<ExternalUrlCatalog>, BackendError> {
        let rows: Vec<ExternalUrlCatalog> = self
            .client
            .select(CATALOG_TABLE, &[Filter::eq("id", id)], None)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn select_catalogs(&self) -> Result<Vec<ExternalUrlCatalog>, BackendError> {
        Ok(self
            .client
            .select(CATALOG_TABLE, &[], Some("title.asc"))
            .await?)
    }

    async fn ping(&self) -> Result<(), BackendError> {
        let _: Vec<serde_json::Value> = self
            .client
            .select(CONTENT_TABLE, &[Filter::eq("id", "__ping__")], None)
            .await?;
        Ok(())
    }
}
