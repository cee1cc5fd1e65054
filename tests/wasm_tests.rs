//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome -- --features wasm

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlImageElement};

// Configure tests to run in browser environment
wasm_bindgen_test_configure!(run_in_browser);

use seagallery::config::{DomConfig, GalleryConfig};
use seagallery::dom::{DomError, DomView, GRID_ERROR_CLASS, THUMBNAIL_CLASS};
use seagallery::models::Species;
use seagallery::placeholder::{SvgPlaceholder, SVG_DATA_URI_PREFIX};
use seagallery::resolve::ImageResolver;
use seagallery::view::{Detail, GalleryView, Thumbnail};
use seagallery::wasm::{detail_src, placeholder_data_uri, thumbnail_src};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Build the gallery markup with the given ID prefix so tests don't collide.
fn mount_page(prefix: &str) -> DomConfig {
    mount_page_with_close(prefix, "button")
}

fn mount_page_with_close(prefix: &str, close_tag: &str) -> DomConfig {
    let doc = document();
    let body = doc.body().unwrap();
    let dom = DomConfig {
        grid: format!("{}Grid", prefix),
        overlay: format!("{}Modal", prefix),
        close: format!("{}Close", prefix),
        title: format!("{}Title", prefix),
        description: format!("{}Description", prefix),
        habitat: format!("{}Habitat", prefix),
        fun_fact: format!("{}FunFact", prefix),
        image: format!("{}Image", prefix),
    };

    for (key, id) in dom.entries() {
        let tag = match key {
            "image" => "img",
            "close" => close_tag,
            _ => "div",
        };
        let el = doc.create_element(tag).unwrap();
        el.set_id(id);
        body.append_child(&el).unwrap();
    }
    dom
}

fn resolver() -> ImageResolver {
    let config = GalleryConfig::default();
    ImageResolver::new(&config.assets, &SvgPlaceholder::from(&config.placeholder))
}

fn species(json: &str) -> Species {
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// Exported helpers
// ============================================================================

#[wasm_bindgen_test]
fn test_thumbnail_src() {
    assert_eq!(thumbnail_src(r#"{"id": 1, "sprite": "fish.png"}"#), "images/fish.png");
    assert_eq!(thumbnail_src(r#"{"id": 2}"#), "images/placeholder.png");
}

#[wasm_bindgen_test]
fn test_detail_src() {
    assert_eq!(detail_src(r#"{"photo": "species_images/ray.jpg"}"#), "images/species_images/ray.jpg");
    assert!(detail_src(r#"{"id": 3}"#).starts_with(SVG_DATA_URI_PREFIX));
}

#[wasm_bindgen_test]
fn test_placeholder_data_uri() {
    assert!(placeholder_data_uri().starts_with(SVG_DATA_URI_PREFIX));
}

// ============================================================================
// DomView
// ============================================================================

#[wasm_bindgen_test]
fn test_bind_missing_element() {
    let dom = DomConfig { grid: "noSuchGrid".to_string(), ..Default::default() };
    match DomView::bind(&web_sys::window().unwrap(), &dom) {
        Err(DomError::MissingElement { key, id }) => {
            assert_eq!(key, "grid");
            assert_eq!(id, "noSuchGrid");
        }
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("binding should fail"),
    }
}

#[wasm_bindgen_test]
fn test_bind_image_must_be_img() {
    let dom = mount_page("wrongType");
    let doc = document();
    let old = doc.get_element_by_id(&dom.image).unwrap();
    old.remove();
    let div = doc.create_element("div").unwrap();
    div.set_id(&dom.image);
    doc.body().unwrap().append_child(&div).unwrap();

    let result = DomView::bind(&web_sys::window().unwrap(), &dom);
    assert!(matches!(result, Err(DomError::WrongElementType { expected: "img", .. })));
}

#[wasm_bindgen_test]
fn test_thumbnails_appended_in_order() {
    let dom = mount_page("order");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    let resolver = resolver();

    view.clear_grid();
    let records = [r#"{"id": 1, "common_name": "Clownfish", "sprite": "fish.png"}"#, r#"{"id": 2, "name": "Tang"}"#];
    for (i, json) in records.iter().enumerate() {
        view.append_thumbnail(&Thumbnail::new(i, &species(json), &resolver));
    }

    let grid = document().get_element_by_id(&dom.grid).unwrap();
    assert_eq!(grid.child_element_count(), 2);

    let first: HtmlImageElement = grid.first_element_child().unwrap().dyn_into().unwrap();
    assert_eq!(first.class_name(), THUMBNAIL_CLASS);
    assert_eq!(first.alt(), "Clownfish");
    assert!(first.src().ends_with("images/fish.png"));

    let second: HtmlImageElement = grid.last_element_child().unwrap().dyn_into().unwrap();
    assert!(second.src().ends_with("images/placeholder.png"));
}

#[wasm_bindgen_test]
fn test_grid_error_replaces_content() {
    let dom = mount_page("gridError");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    view.append_thumbnail(&Thumbnail::new(0, &species(r#"{"id": 1}"#), &resolver()));

    view.show_grid_error("Unable to load species");

    let grid = document().get_element_by_id(&dom.grid).unwrap();
    assert_eq!(grid.child_element_count(), 1);
    let p = grid.first_element_child().unwrap();
    assert_eq!(p.class_name(), GRID_ERROR_CLASS);
    assert_eq!(p.text_content().unwrap(), "Unable to load species");
}

#[wasm_bindgen_test]
fn test_set_detail_uses_text_not_markup() {
    let dom = mount_page("detail");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    let record = species(r#"{"id": 5, "common_name": "<b>Eel</b>", "habitat": "Caves"}"#);

    view.set_detail(&Detail::new(&record, &resolver()));

    let doc = document();
    let title = doc.get_element_by_id(&dom.title).unwrap();
    assert_eq!(title.text_content().unwrap(), "<b>Eel</b>");
    assert_eq!(title.child_element_count(), 0);
    assert_eq!(doc.get_element_by_id(&dom.habitat).unwrap().text_content().unwrap(), "Caves");

    let image: HtmlImageElement = doc.get_element_by_id(&dom.image).unwrap().dyn_into().unwrap();
    assert!(image.src().starts_with(SVG_DATA_URI_PREFIX));
    assert_eq!(image.alt(), "<b>Eel</b>");
}

#[wasm_bindgen_test]
fn test_overlay_visibility() {
    let dom = mount_page("overlay");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();

    view.set_overlay_visible(true);
    assert!(view.is_overlay_visible());
    assert_eq!(view.overlay().get_attribute("aria-hidden").as_deref(), Some("false"));

    view.set_overlay_visible(false);
    view.set_overlay_visible(false);
    assert!(!view.is_overlay_visible());
    assert_eq!(view.overlay().get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn test_overlay_starts_hidden() {
    // The page's overlay has no hidden attribute at all
    let dom = mount_page("startHidden");
    assert!(!document().get_element_by_id(&dom.overlay).unwrap().has_attribute("hidden"));

    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    assert!(!view.is_overlay_visible());
    assert_eq!(view.overlay().get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn test_close_control_made_focusable() {
    let dom = mount_page_with_close("spanClose", "span");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    assert_eq!(view.close_control().get_attribute("tabindex").as_deref(), Some("-1"));

    // Natively focusable controls are left alone
    let dom = mount_page("buttonClose");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    assert!(!view.close_control().has_attribute("tabindex"));
}

// ============================================================================
// One-shot image fallback
// ============================================================================

fn fire_error(img: &HtmlImageElement) {
    img.dispatch_event(&Event::new("error").unwrap()).unwrap();
}

#[wasm_bindgen_test]
fn test_detail_image_falls_back_once() {
    let dom = mount_page("detailFallback");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    view.set_detail(&Detail::new(&species(r#"{"id": 8, "photo": "missing-ray.jpg"}"#), &resolver()));

    let image: HtmlImageElement = document().get_element_by_id(&dom.image).unwrap().dyn_into().unwrap();
    assert!(image.src().ends_with("images/species_images/missing-ray.jpg"));
    assert!(image.onerror().is_some());

    fire_error(&image);
    assert!(image.src().starts_with(SVG_DATA_URI_PREFIX));
    assert!(image.onerror().is_none());

    // A second failure changes nothing
    let after_first = image.src();
    fire_error(&image);
    assert_eq!(image.src(), after_first);
}

#[wasm_bindgen_test]
fn test_inline_detail_has_no_error_handler() {
    let dom = mount_page("detailInline");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    let image: HtmlImageElement = document().get_element_by_id(&dom.image).unwrap().dyn_into().unwrap();

    // A handler left over from a previous detail is cleared too
    view.set_detail(&Detail::new(&species(r#"{"id": 1, "photo": "orca.jpg"}"#), &resolver()));
    assert!(image.onerror().is_some());

    view.set_detail(&Detail::new(&species(r#"{"id": 2}"#), &resolver()));
    assert!(image.src().starts_with(SVG_DATA_URI_PREFIX));
    assert!(image.onerror().is_none());
}

#[wasm_bindgen_test]
fn test_thumbnail_falls_back_once() {
    let dom = mount_page("thumbFallback");
    let view = DomView::bind(&web_sys::window().unwrap(), &dom).unwrap();
    view.append_thumbnail(&Thumbnail::new(0, &species(r#"{"id": 4, "sprite": "missing.png"}"#), &resolver()));

    let grid = document().get_element_by_id(&dom.grid).unwrap();
    let img: HtmlImageElement = grid.first_element_child().unwrap().dyn_into().unwrap();
    assert!(img.onerror().is_some());

    fire_error(&img);
    assert!(img.src().starts_with(SVG_DATA_URI_PREFIX));
    assert!(img.onerror().is_none());
}
