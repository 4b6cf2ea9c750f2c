//! "Meet our manager" section.

use vitrine_core::content::{find_section, ContentItem, SECTION_MANAGER};

use super::html::escape;

/// Section heading.
pub const HEADING: &str = "Conheça Nossa Gerente";

/// Caption under the manager's name; also the image alt text.
pub const ROLE_LABEL: &str = "Gerente da Loja";

/// Render the manager section from the site content, or `None` when no
/// item belongs to the `manager` section.
pub fn render(content: &[ContentItem]) -> Option<String> {
    let manager = find_section(content, SECTION_MANAGER)?;
    Some(render_item(manager))
}

/// Render one manager item, applying its display hints.
pub fn render_item(manager: &ContentItem) -> String {
    let style = format!(
        "object-position: {}; transform: scale({})",
        manager.object_position_or_default(),
        manager.scale_or_default()
    );

    format!(
        r#"<section id="team" class="manager">
  <div class="manager__header">
    <h2>{heading}</h2>
  </div>
  <div class="manager__card">
    <div class="manager__photo">
      <img src="{image}" alt="{role}" class="manager__image" style="{style}">
    </div>
    <div class="manager__bio">
      <h3>{title}</h3>
      <p class="manager__role">{role}</p>
      <p class="manager__description">{description}</p>
    </div>
  </div>
</section>"#,
        heading = HEADING,
        image = escape(&manager.image),
        role = ROLE_LABEL,
        style = escape(&style),
        title = escape(&manager.title),
        description = escape(&manager.description),
    )
}
