//! `external_url_catalogs` table row.

use sqlx::FromRow;
use vitrine_core::catalog::ExternalUrlCatalog;
use vitrine_core::types::Timestamp;

/// A row from the `external_url_catalogs` table.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub external_content_image_urls: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CatalogRow> for ExternalUrlCatalog {
    fn from(row: CatalogRow) -> Self {
        ExternalUrlCatalog {
            id: row.id,
            title: row.title,
            description: row.description,
            external_content_image_urls: row.external_content_image_urls,
        }
    }
}
