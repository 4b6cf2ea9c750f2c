//! Content items and the mapping to and from the `content` table row shape.
//!
//! [`ContentItem`] is what handlers and page renderers work with (camelCase
//! on the wire). [`ContentRecord`] mirrors the persisted row (snake_case
//! columns). The two `map_*` functions are the only place that knows how
//! one translates into the other.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ContentId, Timestamp};

// ---------------------------------------------------------------------------
// Well-known sections
// ---------------------------------------------------------------------------

/// Landing banner.
pub const SECTION_HERO: &str = "hero";

/// "About us" block.
pub const SECTION_ABOUT: &str = "about";

/// Store manager bio.
pub const SECTION_MANAGER: &str = "manager";

/// Catalog highlights.
pub const SECTION_CATALOG: &str = "catalog";

/// Showroom gallery.
pub const SECTION_SHOWROOM: &str = "showroom";

/// Display hint applied when an item carries no `objectPosition`.
pub const DEFAULT_OBJECT_POSITION: &str = "center";

/// Display hint applied when an item carries no `scale`.
pub const DEFAULT_SCALE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Application shape
// ---------------------------------------------------------------------------

/// A piece of site content as the application sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub id: ContentId,
    pub section: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Free-form per-section fields, flattened into the item on the wire.
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentItem {
    /// Build an item with the required fields and no display hints.
    pub fn new(
        id: impl Into<ContentId>,
        section: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            section: section.into(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
            object_position: None,
            scale: None,
            extra: serde_json::Map::new(),
        }
    }

    /// `objectPosition` hint, falling back to [`DEFAULT_OBJECT_POSITION`].
    pub fn object_position_or_default(&self) -> &str {
        self.object_position
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_OBJECT_POSITION)
    }

    /// `scale` hint, falling back to [`DEFAULT_SCALE`].
    pub fn scale_or_default(&self) -> f64 {
        self.scale.unwrap_or(DEFAULT_SCALE)
    }

    /// Whether the item may be written to the `content` table.
    pub fn has_section(&self) -> bool {
        has_section(&self.section)
    }
}

// ---------------------------------------------------------------------------
// Row shape
// ---------------------------------------------------------------------------

/// A row of the `content` table.
///
/// Timestamps are owned by the database and never sent on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub section: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub object_position: Option<String>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default = "empty_object")]
    pub extra: serde_json::Value,
    #[serde(default, skip_serializing)]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<Timestamp>,
}

impl ContentRecord {
    /// Whether the row may be written to the `content` table.
    pub fn has_section(&self) -> bool {
        has_section(&self.section)
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Translate an application item into the row written to storage.
pub fn map_item_to_record(item: &ContentItem) -> ContentRecord {
    ContentRecord {
        id: item.id.clone(),
        section: item.section.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        image_url: item.image.clone(),
        object_position: item.object_position.clone(),
        scale: item.scale,
        extra: serde_json::Value::Object(item.extra.clone()),
        created_at: None,
        updated_at: None,
    }
}

/// Translate a stored row back into the application shape.
///
/// A non-object `extra` column (legacy rows) is dropped rather than failing
/// the whole read.
pub fn map_record_to_item(record: ContentRecord) -> ContentItem {
    let extra = match record.extra {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    ContentItem {
        id: record.id,
        section: record.section,
        title: record.title,
        description: record.description,
        image: record.image_url,
        object_position: record.object_position,
        scale: record.scale,
        extra,
    }
}

// ---------------------------------------------------------------------------
// Lookup and validation
// ---------------------------------------------------------------------------

/// `true` when `section` is non-empty after trimming.
pub fn has_section(section: &str) -> bool {
    !section.trim().is_empty()
}

/// A scale hint must be a finite positive number.
pub fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}

/// Validate an item before it is written.
pub fn validate_item(item: &ContentItem) -> Result<(), CoreError> {
    if !item.has_section() {
        return Err(CoreError::Validation(format!(
            "Content item '{}' must have a non-empty section",
            item.id
        )));
    }
    if let Some(scale) = item.scale {
        if !is_valid_scale(scale) {
            return Err(CoreError::Validation(format!(
                "Content item '{}' has invalid scale {scale}; must be a positive number",
                item.id
            )));
        }
    }
    Ok(())
}

/// First item of `items` whose section is exactly `section`.
pub fn find_section<'a>(items: &'a [ContentItem], section: &str) -> Option<&'a ContentItem> {
    items.iter().find(|item| item.section == section)
}
