//! Data models for gallery records received from the species API

mod image_field;
mod species;

pub use image_field::{ImageField, DETAIL_CHAIN, THUMBNAIL_CHAIN};
pub use species::{Species, SpeciesId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_list_parse() {
        let json = r#"[
            {"id": 1, "common_name": "Clownfish", "sprite": "clown.png"},
            {"id": "manta-2", "name": "Manta Ray", "s_image": "species_images/manta.jpg"}
        ]"#;
        let list: Vec<Species> = serde_json::from_str(json).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, Some(SpeciesId::Number(1)));
        assert_eq!(list[0].image(ImageField::Sprite), Some("clown.png"));
        assert_eq!(list[1].id, Some(SpeciesId::Text("manta-2".to_string())));
        assert_eq!(list[1].title(), "Manta Ray");
    }

    #[test]
    fn test_chain_heads() {
        assert_eq!(THUMBNAIL_CHAIN[0], ImageField::Sprite);
        assert_eq!(DETAIL_CHAIN[0], ImageField::SImage);
        assert!(!DETAIL_CHAIN.contains(&ImageField::Sprite));
    }
}
