//! Image source resolution
//!
//! Turns the loosely named image fields of a [`Species`] into a concrete
//! image URL. Resolution walks an ordered field chain, normalizes the
//! reference against the asset layout, composes it relative to the page,
//! and arms a one-shot fallback to the inline placeholder for load errors.

use reqwest::Url;

use crate::config::AssetsConfig;
use crate::models::{ImageField, Species, DETAIL_CHAIN, THUMBNAIL_CHAIN};
use crate::placeholder::PlaceholderProvider;

/// Where a resolved image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// A field of the species record
    Field(ImageField),
    /// The placeholder file in the asset tree
    PlaceholderFile,
    /// The inline placeholder graphic
    Inline,
}

/// A resolved image source plus the replacement to use if it fails to load.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub src: String,
    pub origin: ImageOrigin,
    fallback: Option<String>,
}

impl ResolvedImage {
    /// Whether the source is the inline placeholder itself.
    pub fn is_inline(&self) -> bool {
        self.origin == ImageOrigin::Inline
    }

    /// Replacement used when `src` fails to load (never set for inline sources).
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Fresh one-shot fallback handle for one image element.
    pub fn arm(&self) -> OneShotFallback {
        OneShotFallback { replacement: self.fallback.clone() }
    }
}

/// Load-error handler state for a single image element.
///
/// Yields the replacement at most once, so a replacement that itself fails
/// cannot trigger another swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotFallback {
    replacement: Option<String>,
}

impl OneShotFallback {
    /// Replacement source for the first failure, `None` afterwards.
    pub fn fire(&mut self) -> Option<String> {
        self.replacement.take()
    }

    pub fn is_armed(&self) -> bool {
        self.replacement.is_some()
    }
}

/// First non-blank field of `chain`, in chain order.
pub fn first_present<'a>(species: &'a Species, chain: &[ImageField]) -> Option<(ImageField, &'a str)> {
    chain.iter().find_map(|&field| {
        species
            .image(field)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| (field, value))
    })
}

/// Whether a reference is already a complete URL and must not be rewritten.
pub fn is_absolute_url(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
        || lower.starts_with("blob:")
}

/// Strip the asset root and, if present, one known subfolder from the front
/// of a relative reference.
///
/// `images/species_images/orca.jpg` with root `images` and known subfolder
/// `species_images` becomes `orca.jpg`.
pub fn strip_asset_prefix<'a>(reference: &'a str, root: &str, known_subfolders: &[String]) -> &'a str {
    let mut path = reference;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path = path.trim_start_matches('/');

    let root = root.trim_matches('/');
    if !root.is_empty() {
        if let Some(rest) = path.strip_prefix(root).and_then(|r| r.strip_prefix('/')) {
            path = rest;
        }
    }

    if let Some((first, rest)) = path.split_once('/') {
        if known_subfolders.iter().any(|known| known.trim_matches('/') == first) {
            path = rest;
        }
    }

    path
}

/// Stand-in origin for page-relative results; it is stripped again before
/// the path is returned.
const LOCAL_ORIGIN: &str = "http://localhost/";

/// Resolve path segments against the directory of the page URL, the way a
/// browser resolves a relative `src` against the document location.
///
/// Each segment is percent-encoded on its own, so spaces, `#` and `?` in a
/// file name cannot leak into the query or fragment. An empty or relative
/// `page_base` yields a page-relative path. Returns `None` when the base
/// cannot carry a path (`data:`, `mailto:` and the like).
pub fn join_page_relative(page_base: &str, segments: &[&str]) -> Option<String> {
    let (base, absolute) = match Url::parse(page_base) {
        Ok(url) => (url, true),
        Err(_) => (Url::parse(LOCAL_ORIGIN).ok()?.join(page_base).ok()?, false),
    };

    // "./" drops the document name, query and fragment
    let mut url = base.join("./").ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);

    if absolute {
        Some(url.into())
    } else if page_base.starts_with('/') {
        Some(url.path().to_string())
    } else {
        Some(url.path().trim_start_matches('/').to_string())
    }
}

/// Resolves image sources for thumbnails and the detail view.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    root: String,
    thumbnail_dir: Option<String>,
    detail_dir: Option<String>,
    placeholder_file: String,
    known_subfolders: Vec<String>,
    page_base: Option<String>,
    inline: String,
}

impl ImageResolver {
    pub fn new(assets: &AssetsConfig, placeholder: &dyn PlaceholderProvider) -> Self {
        let dir = |d: &Option<String>| {
            d.as_deref().map(|s| s.trim_matches('/').to_string()).filter(|s| !s.is_empty())
        };
        Self {
            root: assets.root.trim_matches('/').to_string(),
            thumbnail_dir: dir(&assets.thumbnail_dir),
            detail_dir: dir(&assets.detail_dir),
            placeholder_file: assets.placeholder.clone(),
            known_subfolders: assets.known_subfolders.clone(),
            page_base: None,
            inline: placeholder.data_uri(),
        }
    }

    /// Compose relative paths against this page URL instead of leaving them
    /// page-relative.
    pub fn with_page_base(mut self, page_base: impl Into<String>) -> Self {
        self.page_base = Some(page_base.into());
        self
    }

    /// The inline placeholder `data:` URI.
    pub fn inline_placeholder(&self) -> &str {
        &self.inline
    }

    /// Grid thumbnail: `[sprite, s_image, image]`, then the placeholder file.
    pub fn thumbnail(&self, species: &Species) -> ResolvedImage {
        match first_present(species, THUMBNAIL_CHAIN) {
            Some((field, reference)) => self.from_reference(
                reference,
                self.thumbnail_dir.as_deref(),
                ImageOrigin::Field(field),
            ),
            None => self.from_reference(&self.placeholder_file, None, ImageOrigin::PlaceholderFile),
        }
    }

    /// Detail image: `[s_image, image, p_image, photo]`, then the sprite as
    /// the thumbnail would show it, then the inline placeholder.
    pub fn detail(&self, species: &Species) -> ResolvedImage {
        if let Some((field, reference)) = first_present(species, DETAIL_CHAIN) {
            return self.from_reference(reference, self.detail_dir.as_deref(), ImageOrigin::Field(field));
        }

        if first_present(species, &[ImageField::Sprite]).is_some() {
            return self.thumbnail(species);
        }

        self.inline_image()
    }

    fn from_reference(&self, reference: &str, dir: Option<&str>, origin: ImageOrigin) -> ResolvedImage {
        let src = if is_absolute_url(reference) {
            Some(reference.to_string())
        } else {
            let segments = self.segments(reference, dir);
            self.page_base
                .as_deref()
                .and_then(|base| join_page_relative(base, &segments))
                .or_else(|| join_page_relative("", &segments))
        };

        match src {
            Some(src) => ResolvedImage { src, origin, fallback: Some(self.inline.clone()) },
            None => {
                tracing::warn!(reference, "image reference could not be composed into a URL");
                self.inline_image()
            }
        }
    }

    fn inline_image(&self) -> ResolvedImage {
        ResolvedImage { src: self.inline.clone(), origin: ImageOrigin::Inline, fallback: None }
    }

    /// Unencoded path segments: root, slot folder, then the reference's own
    /// segments.
    fn segments<'a>(&'a self, reference: &'a str, dir: Option<&'a str>) -> Vec<&'a str> {
        let file = match dir {
            Some(_) => strip_asset_prefix(reference, &self.root, &self.known_subfolders),
            // Without a slot folder the reference keeps its own subfolder
            None => strip_asset_prefix(reference, &self.root, &[]),
        };

        self.root
            .split('/')
            .chain(dir.into_iter().flat_map(|d| d.split('/')))
            .chain(file.split('/'))
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}
