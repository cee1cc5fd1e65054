//! Configuration schema types for `gallery.toml`
//!
//! Defines the structure and validation rules for the gallery configuration.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Default API base URL (local development server)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Collection endpoint served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// `/species` and `/species/{id}`
    #[default]
    Species,
    /// Legacy `/creatures` and `/creatures/{id}`
    Creatures,
}

impl Collection {
    /// URL path segment of the collection
    pub fn path(self) -> &'static str {
        match self {
            Collection::Species => "species",
            Collection::Creatures => "creatures",
        }
    }
}

/// Remote API section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without the collection path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Which collection endpoint to use
    #[serde(default)]
    pub collection: Collection,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), collection: Collection::default() }
    }
}

/// Static asset layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Asset root, relative to the page
    #[serde(default = "default_asset_root")]
    pub root: String,
    /// Subfolder for thumbnails (none: directly under the root)
    #[serde(default)]
    pub thumbnail_dir: Option<String>,
    /// Subfolder for detail images (empty string: directly under the root)
    #[serde(default = "default_detail_dir")]
    pub detail_dir: Option<String>,
    /// Placeholder file used for thumbnails without any image field
    #[serde(default = "default_placeholder_file")]
    pub placeholder: String,
    /// Subfolder names stripped from image references before composing
    #[serde(default = "default_known_subfolders")]
    pub known_subfolders: Vec<String>,
}

fn default_asset_root() -> String {
    "images".to_string()
}

fn default_detail_dir() -> Option<String> {
    Some("species_images".to_string())
}

fn default_placeholder_file() -> String {
    "placeholder.png".to_string()
}

fn default_known_subfolders() -> Vec<String> {
    vec!["species_images".to_string(), "sprites".to_string()]
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
            thumbnail_dir: None,
            detail_dir: default_detail_dir(),
            placeholder: default_placeholder_file(),
            known_subfolders: default_known_subfolders(),
        }
    }
}

/// Inline placeholder graphic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    #[serde(default = "default_placeholder_width")]
    pub width: u32,
    #[serde(default = "default_placeholder_height")]
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_placeholder_width() -> u32 {
    300
}

fn default_placeholder_height() -> u32 {
    200
}

fn default_background() -> String {
    "#0B3D5C".to_string()
}

fn default_foreground() -> String {
    "#FFFFFF".to_string()
}

fn default_label() -> String {
    "No image".to_string()
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            width: default_placeholder_width(),
            height: default_placeholder_height(),
            background: default_background(),
            foreground: default_foreground(),
            label: default_label(),
        }
    }
}

/// Element IDs the host page must provide
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub grid: String,
    pub overlay: String,
    pub close: String,
    pub title: String,
    pub description: String,
    pub habitat: String,
    pub fun_fact: String,
    pub image: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            grid: "seaGrid".to_string(),
            overlay: "modal".to_string(),
            close: "closeModal".to_string(),
            title: "modalTitle".to_string(),
            description: "modalDescription".to_string(),
            habitat: "modalHabitat".to_string(),
            fun_fact: "modalFunFact".to_string(),
            image: "modalImage".to_string(),
        }
    }
}

impl DomConfig {
    /// All IDs paired with their config key
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("grid", &self.grid),
            ("overlay", &self.overlay),
            ("close", &self.close),
            ("title", &self.title),
            ("description", &self.description),
            ("habitat", &self.habitat),
            ("fun_fact", &self.fun_fact),
            ("image", &self.image),
        ]
    }
}

/// Runtime behavior switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Drop detail responses superseded by a newer request
    #[serde(default = "default_true")]
    pub discard_stale_details: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self { discard_stale_details: true }
    }
}

/// Complete gallery.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
    #[serde(default)]
    pub dom: DomConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "api.base_url")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gallery.toml: '{}' {}", self.field, self.message)
    }
}

impl GalleryConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            errors.push(ConfigValidationError {
                field: "api.base_url".to_string(),
                message: "must be a non-empty URL".to_string(),
            });
        } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            errors.push(ConfigValidationError {
                field: "api.base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }

        if self.assets.root.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "assets.root".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.assets.placeholder.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "assets.placeholder".to_string(),
                message: "must be a non-empty file name".to_string(),
            });
        }

        if self.placeholder.width == 0 || self.placeholder.height == 0 {
            errors.push(ConfigValidationError {
                field: "placeholder".to_string(),
                message: "dimensions must be positive".to_string(),
            });
        }

        let colors = [
            ("placeholder.background", &self.placeholder.background),
            ("placeholder.foreground", &self.placeholder.foreground),
        ];
        for (field, value) in colors {
            if !is_hex_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("'{}' is not a #RGB or #RRGGBB color", value),
                });
            }
        }

        for (key, id) in self.dom.entries() {
            if id.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("dom.{}", key),
                    message: "must be a non-empty element id".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
