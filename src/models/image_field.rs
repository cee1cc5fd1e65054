//! Image reference fields and their priority chains.

use std::fmt;

/// One of the image reference fields a species record may carry.
///
/// The API has used different names for its images over time, so the
/// gallery looks them up through ordered chains instead of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageField {
    /// Small grid sprite (`sprite`)
    Sprite,
    /// Species image, usually the large detail picture (`s_image`)
    SImage,
    /// Generic image reference from the oldest API revision (`image`)
    Image,
    /// Photo image (`p_image`)
    PImage,
    /// Photo (`photo`)
    Photo,
}

impl ImageField {
    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            ImageField::Sprite => "sprite",
            ImageField::SImage => "s_image",
            ImageField::Image => "image",
            ImageField::PImage => "p_image",
            ImageField::Photo => "photo",
        }
    }
}

impl fmt::Display for ImageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Priority order for grid thumbnails.
pub const THUMBNAIL_CHAIN: &[ImageField] = &[ImageField::Sprite, ImageField::SImage, ImageField::Image];

/// Priority order for the detail image. The sprite is not part of it; the
/// detail view falls back to the thumbnail resolution separately.
pub const DETAIL_CHAIN: &[ImageField] =
    &[ImageField::SImage, ImageField::Image, ImageField::PImage, ImageField::Photo];
