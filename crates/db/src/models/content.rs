//! `content` table row.

use sqlx::FromRow;
use vitrine_core::content::ContentRecord;
use vitrine_core::types::Timestamp;

/// A row from the `content` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: String,
    pub section: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub object_position: Option<String>,
    pub scale: Option<f64>,
    pub extra: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ContentRow> for ContentRecord {
    fn from(row: ContentRow) -> Self {
        ContentRecord {
            id: row.id,
            section: row.section,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            object_position: row.object_position,
            scale: row.scale,
            extra: row.extra,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
