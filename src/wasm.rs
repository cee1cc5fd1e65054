//! WASM API module for the browser front end
//!
//! `start_gallery` binds the controller to the host page, wires the overlay
//! close triggers and loads the grid. The remaining exports are small pure
//! helpers for page scripts.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{KeyboardEvent, MouseEvent};

use crate::api::HttpSpeciesApi;
use crate::config::{parse_config, GalleryConfig};
use crate::controller::GalleryController;
use crate::dom::DomView;
use crate::models::Species;
use crate::placeholder::{PlaceholderProvider, SvgPlaceholder};
use crate::resolve::ImageResolver;
use crate::view::ClickTarget;

type BrowserController = GalleryController<HttpSpeciesApi, DomView>;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Start the gallery on the current page.
///
/// # Arguments
/// * `config_toml` - optional `gallery.toml` contents; defaults apply when absent
///
/// # Returns
/// An error if the configuration is invalid or a required element is missing
#[wasm_bindgen]
pub fn start_gallery(config_toml: Option<String>) -> Result<(), JsValue> {
    let config = match config_toml {
        Some(text) => parse_config(&text).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GalleryConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let view = DomView::bind(&window, &config.dom).map_err(|e| {
        console_error(&e.to_string());
        JsValue::from(e)
    })?;

    let mut resolver = ImageResolver::new(&config.assets, &SvgPlaceholder::from(&config.placeholder));
    if let Ok(Some(base)) = view.document().base_uri() {
        resolver = resolver.with_page_base(base);
    }

    let api = HttpSpeciesApi::new(&config.api).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let controller: Rc<BrowserController> =
        Rc::new(GalleryController::from_config(api, view, &config).with_resolver(resolver));

    wire_thumbnails(&controller);
    wire_close_triggers(&controller)?;

    spawn_local(async move {
        if let Err(e) = controller.load_grid().await {
            console_error(&format!("Failed to load species: {}", e));
        }
    });

    Ok(())
}

fn wire_thumbnails(controller: &Rc<BrowserController>) {
    // Weak: the view owns this handler and the controller owns the view
    let weak = Rc::downgrade(controller);
    controller.view().set_thumbnail_handler(Rc::new(move |id| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = controller.load_info(&id).await {
                console_error(&format!("Failed to load species {}: {}", id, e));
            }
        });
    }));
}

fn wire_close_triggers(controller: &Rc<BrowserController>) -> Result<(), JsValue> {
    let view = controller.view();

    let c = Rc::clone(controller);
    let on_close = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
        c.handle_overlay_click(ClickTarget::CloseControl);
    });
    view.close_control()
        .add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
    on_close.forget();

    let c = Rc::clone(controller);
    let on_overlay = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let target = c.view().click_target(&event);
        c.handle_overlay_click(target);
    });
    view.overlay()
        .add_event_listener_with_callback("click", on_overlay.as_ref().unchecked_ref())?;
    on_overlay.forget();

    let c = Rc::clone(controller);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        c.handle_key(&event.key());
    });
    view.document()
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    Ok(())
}

/// Inline placeholder graphic with the default look, as a `data:` URI.
#[wasm_bindgen]
pub fn placeholder_data_uri() -> String {
    SvgPlaceholder::default().data_uri()
}

fn default_resolver() -> ImageResolver {
    let config = GalleryConfig::default();
    ImageResolver::new(&config.assets, &SvgPlaceholder::from(&config.placeholder))
}

/// Thumbnail source for a species JSON object, using the default layout.
///
/// Malformed JSON resolves like a record without images.
#[wasm_bindgen]
pub fn thumbnail_src(species_json: &str) -> String {
    let species: Species = serde_json::from_str(species_json).unwrap_or_default();
    default_resolver().thumbnail(&species).src
}

/// Detail image source for a species JSON object, using the default layout.
#[wasm_bindgen]
pub fn detail_src(species_json: &str) -> String {
    let species: Species = serde_json::from_str(species_json).unwrap_or_default();
    default_resolver().detail(&species).src
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::SVG_DATA_URI_PREFIX;

    #[test]
    fn test_thumbnail_src() {
        assert_eq!(thumbnail_src(r#"{"id": 1, "sprite": "fish.png"}"#), "images/fish.png");
        assert_eq!(thumbnail_src("{}"), "images/placeholder.png");
        assert_eq!(thumbnail_src("not json"), "images/placeholder.png");
    }

    #[test]
    fn test_detail_src() {
        assert_eq!(
            detail_src(r#"{"s_image": "big.png", "sprite": "small.png"}"#),
            "images/species_images/big.png"
        );
        assert!(detail_src("{}").starts_with(SVG_DATA_URI_PREFIX));
    }

    #[test]
    fn test_placeholder_data_uri() {
        assert!(placeholder_data_uri().starts_with(SVG_DATA_URI_PREFIX));
    }
}
