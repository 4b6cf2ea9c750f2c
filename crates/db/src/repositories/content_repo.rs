//! Repository for the `content` table.

use sqlx::{PgExecutor, PgPool};
use vitrine_core::content::ContentRecord;

use crate::models::content::ContentRow;

/// Column list for `content` queries.
const COLUMNS: &str = "\
    id, section, title, description, image_url, object_position, \
    scale, extra, created_at, updated_at";

/// Provides data access for site content.
pub struct ContentRepo;

impl ContentRepo {
    /// List rows in `section`, oldest first.
    pub async fn list_by_section(
        pool: &PgPool,
        section: &str,
    ) -> Result<Vec<ContentRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM content WHERE section = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(section)
            .fetch_all(pool)
            .await
    }

    /// Find a row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content WHERE id = $1");
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every row, grouped by section.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content ORDER BY section, created_at, id");
        sqlx::query_as::<_, ContentRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace a row keyed by `id`.
    ///
    /// Uses `ON CONFLICT (id) DO UPDATE`; `created_at` survives the update.
    pub async fn upsert(pool: &PgPool, record: &ContentRecord) -> Result<ContentRow, sqlx::Error> {
        Self::upsert_with(pool, record).await
    }

    /// Upsert every record inside one transaction.
    ///
    /// Either all rows are written or, on the first failure, none are.
    pub async fn upsert_many(
        pool: &PgPool,
        records: &[ContentRecord],
    ) -> Result<Vec<ContentRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(Self::upsert_with(&mut *tx, record).await?);
        }
        tx.commit().await?;
        Ok(rows)
    }

    /// Delete a row by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        record: &ContentRecord,
    ) -> Result<ContentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO content \
                 (id, section, title, description, image_url, object_position, scale, extra) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                 section = EXCLUDED.section, \
                 title = EXCLUDED.title, \
                 description = EXCLUDED.description, \
                 image_url = EXCLUDED.image_url, \
                 object_position = EXCLUDED.object_position, \
                 scale = EXCLUDED.scale, \
                 extra = EXCLUDED.extra \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(&record.id)
            .bind(&record.section)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(&record.object_position)
            .bind(record.scale)
            .bind(&record.extra)
            .fetch_one(executor)
            .await
    }
}
