//! External URL catalogs.
//!
//! A catalog is a read-only, ordered list of page image URLs hosted
//! elsewhere. For display each URL becomes a [`CatalogImage`] with a
//! synthetic id and a positional title; the derived form is never stored.

use serde::{Deserialize, Serialize};

use crate::types::ContentId;

/// A row of the `external_url_catalogs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrlCatalog {
    pub id: ContentId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_content_image_urls: Vec<String>,
}

/// One catalog page prepared for the image carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogImage {
    pub id: String,
    pub image_url: String,
    pub title: String,
    pub description: String,
}

impl ExternalUrlCatalog {
    /// Derive the carousel images, one per URL, in URL order.
    pub fn display_images(&self) -> Vec<CatalogImage> {
        self.external_content_image_urls
            .iter()
            .enumerate()
            .map(|(index, url)| CatalogImage {
                id: catalog_image_id(&self.id, index),
                image_url: url.clone(),
                title: page_title(index),
                description: String::new(),
            })
            .collect()
    }

    /// Description, treating an empty string as absent.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Synthetic image id: `<catalog id>-<zero-based index>`.
pub fn catalog_image_id(catalog_id: &str, index: usize) -> String {
    format!("{catalog_id}-{index}")
}

/// Positional page title, one-based.
pub fn page_title(index: usize) -> String {
    format!("Página {}", index + 1)
}
