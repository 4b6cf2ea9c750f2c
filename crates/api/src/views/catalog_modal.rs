//! External catalog viewer modal.
//!
//! The modal is a fragment the page swaps in when a catalog is opened. The
//! close control links to a caller-supplied URL, which is how the caller's
//! dismissal handler is reached without client-side state.

use vitrine_core::catalog::ExternalUrlCatalog;

use super::html::escape;

/// Shown instead of the carousel when a catalog has no page images.
pub const EMPTY_STATE: &str = "Nenhuma imagem de conteúdo encontrada para este catálogo.";

/// Open state and dismissal target for the modal.
#[derive(Debug, Clone)]
pub struct ModalProps {
    pub is_open: bool,
    /// Where the close control navigates to.
    pub close_href: String,
}

impl Default for ModalProps {
    fn default() -> Self {
        Self {
            is_open: true,
            close_href: "/".to_string(),
        }
    }
}

/// Render the modal, or `None` while it is closed.
pub fn render(catalog: &ExternalUrlCatalog, props: &ModalProps) -> Option<String> {
    if !props.is_open {
        return None;
    }

    let description = catalog
        .description_text()
        .map(|d| format!("\n      <p class=\"catalog-modal__description\">{}</p>", escape(d)))
        .unwrap_or_default();

    let images = catalog.display_images();
    let body = if images.is_empty() {
        format!("<div class=\"catalog-modal__empty\"><p>{EMPTY_STATE}</p></div>")
    } else {
        let slides: String = images
            .iter()
            .map(|image| {
                format!(
                    "\n        <li class=\"catalog-carousel__slide\" data-image-id=\"{id}\">\
                     <img src=\"{src}\" alt=\"{title}\" loading=\"lazy\"></li>",
                    id = escape(&image.id),
                    src = escape(&image.image_url),
                    title = escape(&image.title),
                )
            })
            .collect();
        format!("<ul class=\"catalog-carousel\">{slides}\n      </ul>")
    };

    Some(format!(
        r#"<div class="catalog-modal" role="dialog" aria-modal="true" aria-labelledby="catalog-modal-title">
  <div class="catalog-modal__content">
    <div class="catalog-modal__header">
      <h2 id="catalog-modal-title">{title}</h2>
      <a class="catalog-modal__close" href="{close}" aria-label="Fechar">&times;</a>
    </div>
    <div class="catalog-modal__body">{description}
      {body}
    </div>
  </div>
</div>"#,
        title = escape(&catalog.title),
        close = escape(&props.close_href),
    ))
}
