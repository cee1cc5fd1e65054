//! Terminal rendering of the gallery
//!
//! [`TerminalView`] implements [`GalleryView`] by printing the grid as a
//! table and the overlay as a text panel. Inline placeholder images are
//! shown as a short marker instead of their full `data:` URI.

use std::cell::{Cell, RefCell};
use std::io::Write;

use crate::resolve::ResolvedImage;
use crate::view::{Detail, GalleryView, Thumbnail};

/// Marker printed instead of an inline placeholder URI
pub const INLINE_MARKER: &str = "<inline placeholder>";

/// Image source as shown in the terminal.
pub fn display_src(image: &ResolvedImage) -> &str {
    if image.is_inline() {
        INLINE_MARKER
    } else {
        image.src.as_str()
    }
}

/// One grid row: 1-based position, id, title and image source.
pub fn format_thumbnail(thumbnail: &Thumbnail) -> String {
    let id = thumbnail.species_id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let title = if thumbnail.alt.is_empty() { "(untitled)" } else { thumbnail.alt.as_str() };
    format!("{:>3}  {:<8}  {:<24}  {}", thumbnail.index + 1, id, title, display_src(&thumbnail.image))
}

/// The overlay as a block of text.
pub fn format_detail(detail: &Detail) -> String {
    let title = if detail.title.is_empty() { "(untitled)" } else { detail.title.as_str() };
    let rule = "=".repeat(title.chars().count() + 6);
    let mut out = String::new();
    out.push_str(&format!("{}\n== {} ==\n{}\n", rule, title, rule));
    if !detail.description.is_empty() {
        out.push_str(&format!("{}\n", detail.description));
    }
    out.push_str(&format!("Habitat:  {}\n", detail.habitat));
    out.push_str(&format!("Fun fact: {}\n", detail.fun_fact));
    out.push_str(&format!("Image:    {}\n", display_src(&detail.image)));
    out
}

/// `GalleryView` printing to a pair of writers (normally stdout and stderr).
pub struct TerminalView<W: Write, E: Write> {
    out: RefCell<W>,
    err: RefCell<E>,
    detail: RefCell<Option<Detail>>,
    visible: Cell<bool>,
    rows: Cell<usize>,
}

impl<W: Write, E: Write> TerminalView<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out: RefCell::new(out),
            err: RefCell::new(err),
            detail: RefCell::new(None),
            visible: Cell::new(false),
            rows: Cell::new(0),
        }
    }

    /// Number of grid rows printed since the last clear.
    pub fn rows(&self) -> usize {
        self.rows.get()
    }

    pub fn into_writers(self) -> (W, E) {
        (self.out.into_inner(), self.err.into_inner())
    }

    fn print(&self, text: &str) {
        // Output errors (e.g. a closed pipe) are not the gallery's concern
        writeln!(self.out.borrow_mut(), "{}", text).ok();
    }

    fn print_err(&self, text: &str) {
        writeln!(self.err.borrow_mut(), "{}", text).ok();
    }
}

impl<W: Write, E: Write> GalleryView for TerminalView<W, E> {
    fn clear_grid(&self) {
        self.rows.set(0);
    }

    fn append_thumbnail(&self, thumbnail: &Thumbnail) {
        self.print(&format_thumbnail(thumbnail));
        self.rows.set(self.rows.get() + 1);
    }

    fn show_grid_error(&self, message: &str) {
        self.rows.set(0);
        self.print_err(&format!("Error: {}", message));
    }

    fn set_detail(&self, detail: &Detail) {
        *self.detail.borrow_mut() = Some(detail.clone());
        if self.visible.get() {
            self.print(&format_detail(detail));
        }
    }

    fn set_overlay_visible(&self, visible: bool) {
        let was_visible = self.visible.replace(visible);
        if visible && !was_visible {
            if let Some(detail) = self.detail.borrow().as_ref() {
                self.print(&format_detail(detail));
            }
        }
    }

    fn is_overlay_visible(&self) -> bool {
        self.visible.get()
    }

    fn focus_close(&self) {}

    fn alert(&self, message: &str) {
        self.print_err(&format!("Alert: {}", message));
    }
}
