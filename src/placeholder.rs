//! Inline placeholder graphics
//!
//! Produces self-contained SVG images encoded as `data:` URIs, so a
//! placeholder can always be shown without touching the asset tree.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::PlaceholderConfig;

/// Prefix of every URI produced by [`SvgPlaceholder`].
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Capability that yields an inline image to stand in for a missing one.
pub trait PlaceholderProvider {
    /// A `data:` URI that renders without any network or file access.
    fn data_uri(&self) -> String;
}

/// Flat rectangle with a centered caption, rendered as SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPlaceholder {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub foreground: String,
    pub label: String,
}

impl Default for SvgPlaceholder {
    fn default() -> Self {
        Self::from(&PlaceholderConfig::default())
    }
}

impl From<&PlaceholderConfig> for SvgPlaceholder {
    fn from(config: &PlaceholderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            background: config.background.clone(),
            foreground: config.foreground.clone(),
            label: config.label.clone(),
        }
    }
}

impl SvgPlaceholder {
    /// SVG markup of the placeholder.
    pub fn to_svg(&self) -> String {
        let font_size = (self.height / 10).max(8);
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<rect width="100%" height="100%" fill="{bg}"/>"#,
                r#"<text x="50%" y="50%" fill="{fg}" font-family="sans-serif" font-size="{fs}" "#,
                r#"text-anchor="middle" dominant-baseline="middle">{label}</text>"#,
                "</svg>"
            ),
            w = self.width,
            h = self.height,
            bg = escape_xml(&self.background),
            fg = escape_xml(&self.foreground),
            fs = font_size,
            label = escape_xml(&self.label),
        )
    }
}

impl PlaceholderProvider for SvgPlaceholder {
    fn data_uri(&self) -> String {
        format!("{}{}", SVG_DATA_URI_PREFIX, STANDARD.encode(self.to_svg()))
    }
}

/// Escape text for use inside SVG content and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
