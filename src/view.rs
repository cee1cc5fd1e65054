//! The surfaces the gallery controller draws on.
//!
//! A [`GalleryView`] stands for the host page's grid, overlay and detail
//! elements. Methods take `&self` because the real surface (the DOM) is
//! shared and mutated from event callbacks.

use crate::models::{Species, SpeciesId};
use crate::resolve::{ImageResolver, ResolvedImage};

/// One grid entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Position in the API response
    pub index: usize,
    /// Identifier bound to the thumbnail's activation, if the record has one
    pub species_id: Option<SpeciesId>,
    /// Alternative text (the display title)
    pub alt: String,
    pub image: ResolvedImage,
}

impl Thumbnail {
    pub fn new(index: usize, species: &Species, resolver: &ImageResolver) -> Self {
        Self {
            index,
            species_id: species.id.clone(),
            alt: species.title().to_string(),
            image: resolver.thumbnail(species),
        }
    }
}

/// Content of the detail overlay. All fields are plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub title: String,
    pub description: String,
    pub habitat: String,
    pub fun_fact: String,
    pub image: ResolvedImage,
}

impl Detail {
    pub fn new(species: &Species, resolver: &ImageResolver) -> Self {
        Self {
            title: species.title().to_string(),
            description: species.description().to_string(),
            habitat: species.habitat().to_string(),
            fun_fact: species.fun_fact().to_string(),
            image: resolver.detail(species),
        }
    }
}

/// What a click on the overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The explicit close control
    CloseControl,
    /// The overlay background outside the modal content
    Backdrop,
    /// Anywhere inside the modal content
    Content,
}

/// UI surface populated by the controller.
pub trait GalleryView {
    /// Remove every grid entry.
    fn clear_grid(&self);

    /// Append one thumbnail at the end of the grid.
    fn append_thumbnail(&self, thumbnail: &Thumbnail);

    /// Replace the grid content with a static error message.
    fn show_grid_error(&self, message: &str);

    /// Fill the overlay's text fields and image.
    fn set_detail(&self, detail: &Detail);

    fn set_overlay_visible(&self, visible: bool);

    fn is_overlay_visible(&self) -> bool;

    /// Move keyboard focus to the overlay's close control.
    fn focus_close(&self);

    /// Blocking, user-facing error notice.
    fn alert(&self, message: &str);
}
