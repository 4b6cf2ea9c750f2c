//! Repository for the `external_url_catalogs` table (read-only).

use sqlx::PgPool;

use crate::models::catalog::CatalogRow;

/// Column list for `external_url_catalogs` queries.
const COLUMNS: &str = "\
    id, title, description, external_content_image_urls, created_at, updated_at";

/// Provides data access for external URL catalogs.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Find a catalog by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<CatalogRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM external_url_catalogs WHERE id = $1");
        sqlx::query_as::<_, CatalogRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every catalog ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<CatalogRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM external_url_catalogs ORDER BY title, id");
        sqlx::query_as::<_, CatalogRow>(&query)
            .fetch_all(pool)
            .await
    }
}
