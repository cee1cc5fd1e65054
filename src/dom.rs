//! Browser DOM implementation of [`GalleryView`]
//!
//! Binds to the elements of the host page by ID. The page owns the
//! elements; this module only fills and toggles them.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, MouseEvent, Window};

use crate::config::DomConfig;
use crate::models::SpeciesId;
use crate::resolve::ResolvedImage;
use crate::view::{ClickTarget, Detail, GalleryView, Thumbnail};

/// CSS class given to grid thumbnails
pub const THUMBNAIL_CLASS: &str = "thumbnail";

/// CSS class of the paragraph that replaces the grid on failure
pub const GRID_ERROR_CLASS: &str = "grid-error";

/// Error raised while binding to the host page
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DomError {
    /// No element with the configured ID
    #[error("Missing element #{id} (dom.{key})")]
    MissingElement { key: &'static str, id: String },
    /// The element exists but is not of the expected kind
    #[error("Element #{id} is not a <{expected}>")]
    WrongElementType { id: String, expected: &'static str },
    /// Any other JavaScript exception
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DomError> for JsValue {
    fn from(e: DomError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

type ThumbnailHandler = Rc<dyn Fn(SpeciesId)>;

/// The gallery's elements on the host page.
pub struct DomView {
    window: Window,
    document: Document,
    grid: Element,
    overlay: HtmlElement,
    close: HtmlElement,
    title: Element,
    description: Element,
    habitat: Element,
    fun_fact: Element,
    image: HtmlImageElement,
    on_thumbnail: RefCell<Option<ThumbnailHandler>>,
    // Error handler of the modal image, replaced on every detail load
    image_error: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl DomView {
    /// Look up every configured element and hide the overlay. Fails on the
    /// first missing element.
    pub fn bind(window: &Window, dom: &DomConfig) -> Result<Self, DomError> {
        let document = window.document().ok_or_else(|| DomError::Js("window has no document".to_string()))?;
        let find = |key: &'static str, id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| DomError::MissingElement { key, id: id.to_string() })
        };
        let html = |key: &'static str, id: &str| -> Result<HtmlElement, DomError> {
            find(key, id)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DomError::WrongElementType { id: id.to_string(), expected: "html element" })
        };

        let image = find("image", &dom.image)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| DomError::WrongElementType { id: dom.image.clone(), expected: "img" })?;

        let view = Self {
            window: window.clone(),
            grid: find("grid", &dom.grid)?,
            overlay: html("overlay", &dom.overlay)?,
            close: html("close", &dom.close)?,
            title: find("title", &dom.title)?,
            description: find("description", &dom.description)?,
            habitat: find("habitat", &dom.habitat)?,
            fun_fact: find("fun_fact", &dom.fun_fact)?,
            image,
            document,
            on_thumbnail: RefCell::new(None),
            image_error: RefCell::new(None),
        };

        // Programmatic focus needs a tabindex on elements like <span>
        if view.close.tab_index() < 0 && !view.close.has_attribute("tabindex") {
            view.close.set_tab_index(-1);
        }
        // Whatever the page's markup says, the overlay starts hidden
        view.set_overlay_visible(false);

        Ok(view)
    }

    /// Called with the bound identifier when a thumbnail is activated.
    pub fn set_thumbnail_handler(&self, handler: ThumbnailHandler) {
        *self.on_thumbnail.borrow_mut() = Some(handler);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn overlay(&self) -> &HtmlElement {
        &self.overlay
    }

    pub fn close_control(&self) -> &HtmlElement {
        &self.close
    }

    /// Classify a click received by the overlay element.
    ///
    /// Only a click whose target is the overlay itself counts as a backdrop
    /// click; anything bubbling up from inside the modal is content.
    pub fn click_target(&self, event: &MouseEvent) -> ClickTarget {
        let target: Option<JsValue> = event.target().map(Into::into);
        let overlay: &JsValue = self.overlay.as_ref();
        if target.as_ref() == Some(overlay) {
            ClickTarget::Backdrop
        } else {
            ClickTarget::Content
        }
    }

    fn create_thumbnail(&self, thumbnail: &Thumbnail) -> Result<HtmlImageElement, DomError> {
        let img = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| DomError::Js("created element is not an <img>".to_string()))?;
        img.set_class_name(THUMBNAIL_CLASS);
        img.set_alt(&thumbnail.alt);
        if let Some(on_error) = attach_fallback(&img, &thumbnail.image) {
            on_error.forget();
        }
        img.set_src(&thumbnail.image.src);

        if let Some(id) = thumbnail.species_id.clone() {
            let handler = self.on_thumbnail.borrow().clone();
            if let Some(handler) = handler {
                let on_click = Closure::<dyn FnMut()>::new(move || handler(id.clone()));
                img.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                on_click.forget();
            }
        }

        Ok(img)
    }
}

/// Install a load-error handler that swaps in the fallback once and then
/// removes itself. The returned closure must outlive the element's handler.
fn attach_fallback(img: &HtmlImageElement, image: &ResolvedImage) -> Option<Closure<dyn FnMut()>> {
    img.set_onerror(None);

    let mut fallback = image.arm();
    if !fallback.is_armed() {
        return None;
    }

    let target = img.clone();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        target.set_onerror(None);
        if let Some(src) = fallback.fire() {
            target.set_src(&src);
        }
    });
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    Some(on_error)
}

impl GalleryView for DomView {
    fn clear_grid(&self) {
        self.grid.set_text_content(None);
    }

    fn append_thumbnail(&self, thumbnail: &Thumbnail) {
        let appended = self
            .create_thumbnail(thumbnail)
            .and_then(|img| self.grid.append_child(&img).map_err(DomError::from));
        if let Err(e) = appended {
            tracing::error!(index = thumbnail.index, error = %e, "failed to add thumbnail");
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }
    }

    fn show_grid_error(&self, message: &str) {
        self.grid.set_text_content(None);
        match self.document.create_element("p") {
            Ok(p) => {
                p.set_class_name(GRID_ERROR_CLASS);
                p.set_text_content(Some(message));
                self.grid.append_child(&p).ok();
            }
            Err(_) => self.grid.set_text_content(Some(message)),
        }
    }

    fn set_detail(&self, detail: &Detail) {
        self.title.set_text_content(Some(&detail.title));
        self.description.set_text_content(Some(&detail.description));
        self.habitat.set_text_content(Some(&detail.habitat));
        self.fun_fact.set_text_content(Some(&detail.fun_fact));
        self.image.set_alt(&detail.title);
        *self.image_error.borrow_mut() = attach_fallback(&self.image, &detail.image);
        self.image.set_src(&detail.image.src);
    }

    fn set_overlay_visible(&self, visible: bool) {
        self.overlay.set_hidden(!visible);
        self.overlay.set_attribute("aria-hidden", if visible { "false" } else { "true" }).ok();
    }

    fn is_overlay_visible(&self) -> bool {
        !self.overlay.hidden()
    }

    fn focus_close(&self) {
        self.close.focus().ok();
    }

    fn alert(&self, message: &str) {
        if self.window.alert_with_message(message).is_err() {
            web_sys::console::error_1(&JsValue::from_str(message));
        }
    }
}
