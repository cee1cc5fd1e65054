//! Species record as served by the remote API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::image_field::ImageField;

/// Identifier of a species.
///
/// The API has served both numeric and string identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeciesId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesId::Number(n) => write!(f, "{}", n),
            SpeciesId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for SpeciesId {
    fn from(n: i64) -> Self {
        SpeciesId::Number(n)
    }
}

impl From<&str> for SpeciesId {
    fn from(s: &str) -> Self {
        // CLI arguments arrive as text; keep numeric ids numeric
        match s.parse::<i64>() {
            Ok(n) => SpeciesId::Number(n),
            Err(_) => SpeciesId::Text(s.to_string()),
        }
    }
}

/// A species (or creature, in the legacy API) record.
///
/// Every field is optional. Values of an unexpected JSON type are treated
/// as absent rather than failing the whole record: numbers and booleans are
/// stringified, anything else is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Species {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<SpeciesId>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub habitat_info: Option<String>,
    /// Older records name the habitat field `habitat`
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub s_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub p_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Fields the gallery does not use, kept as received
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Species {
    /// Raw value of an image field, if present.
    pub fn image(&self, field: ImageField) -> Option<&str> {
        let value = match field {
            ImageField::Sprite => &self.sprite,
            ImageField::SImage => &self.s_image,
            ImageField::Image => &self.image,
            ImageField::PImage => &self.p_image,
            ImageField::Photo => &self.photo,
        };
        value.as_deref()
    }

    /// Display title: `common_name`, then `name`, then empty.
    pub fn title(&self) -> &str {
        non_empty(&self.common_name).or_else(|| non_empty(&self.name)).unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// `habitat_info`, then `habitat`, then empty.
    pub fn habitat(&self) -> &str {
        non_empty(&self.habitat_info).or_else(|| non_empty(&self.habitat)).unwrap_or("")
    }

    pub fn fun_fact(&self) -> &str {
        self.fun_fact.as_deref().unwrap_or("")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<SpeciesId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(SpeciesId::Number(i)),
            None => Some(SpeciesId::Text(n.to_string())),
        },
        Value::String(s) if !s.is_empty() => Some(SpeciesId::Text(s)),
        _ => None,
    })
}
