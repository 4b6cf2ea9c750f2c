//! Default site content written on first run.
//!
//! Ids are stable so re-seeding upserts over the same rows instead of
//! duplicating them.

use crate::content::{
    ContentItem, SECTION_ABOUT, SECTION_CATALOG, SECTION_HERO, SECTION_MANAGER, SECTION_SHOWROOM,
};

/// The static default content list, one or more items per section.
pub fn default_content() -> Vec<ContentItem> {
    let mut manager = ContentItem::new(
        "manager-1",
        SECTION_MANAGER,
        "Maria Silva",
        "Com mais de 15 anos de experiência no setor moveleiro, Maria ajuda cada cliente \
         a encontrar a peça certa para sua casa.",
        "/images/manager.jpg",
    );
    manager.object_position = Some("center top".into());

    vec![
        ContentItem::new(
            "hero-1",
            SECTION_HERO,
            "Móveis que transformam sua casa",
            "Qualidade, conforto e design para todos os ambientes.",
            "/images/hero-living-room.jpg",
        ),
        ContentItem::new(
            "about-1",
            SECTION_ABOUT,
            "Sobre a loja",
            "Uma loja de móveis familiar, atendendo a região com carinho e bons preços.",
            "/images/store-front.jpg",
        ),
        manager,
        ContentItem::new(
            "catalog-1",
            SECTION_CATALOG,
            "Sala de estar",
            "Sofás, racks e poltronas.",
            "/images/catalog-living.jpg",
        ),
        ContentItem::new(
            "catalog-2",
            SECTION_CATALOG,
            "Quarto",
            "Camas, guarda-roupas e cômodas.",
            "/images/catalog-bedroom.jpg",
        ),
        ContentItem::new(
            "catalog-3",
            SECTION_CATALOG,
            "Cozinha",
            "Armários, mesas e cadeiras.",
            "/images/catalog-kitchen.jpg",
        ),
        ContentItem::new(
            "showroom-1",
            SECTION_SHOWROOM,
            "Nosso showroom",
            "Venha conhecer nossas peças pessoalmente.",
            "/images/showroom.jpg",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_default_item_has_a_section() {
        assert!(default_content().iter().all(ContentItem::has_section));
    }

    #[test]
    fn default_ids_are_unique() {
        let items = default_content();
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn defaults_include_a_manager() {
        assert!(default_content()
            .iter()
            .any(|i| i.section == SECTION_MANAGER));
    }
}
