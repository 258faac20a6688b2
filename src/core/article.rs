//! Article records as supplied by the catalog document

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Article identifier, either a JSON number or a JSON string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(serde_json::Number),
    Text(String),
}

impl ArticleId {
    /// Loose comparison against an identifier taken from a location string.
    ///
    /// Text identifiers must match exactly. Numeric identifiers match any
    /// parameter whose trimmed text is the same finite number, so `"2"`,
    /// `" 2 "` and `"2.0"` all select the article stored as `2`.
    pub fn matches_param(&self, param: &str) -> bool {
        match self {
            ArticleId::Text(text) => text == param,
            ArticleId::Number(number) => {
                let Some(value) = number.as_f64() else {
                    return false;
                };
                coerce_number(param).is_some_and(|parsed| parsed == value)
            }
        }
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(number) => write!(f, "{number}"),
            ArticleId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        ArticleId::Number(value.into())
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        ArticleId::Text(value.to_string())
    }
}

/// Numeric coercion of a query parameter; blank text counts as zero
fn coerce_number(param: &str) -> Option<f64> {
    let trimmed = param.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    // Rust accepts "inf"/"nan" spellings that never name an article
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// A single article. Never mutated after loading.
///
/// Decoding never rejects a record: absent or null fields are empty, and
/// scalars of the wrong type are taken as their JSON text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ArticleId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    /// Image base path, without extension
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    /// Trusted markup body
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Only numbers and strings can name an article; anything else has no id
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ArticleId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => Some(ArticleId::Number(number)),
        Value::String(text) => Some(ArticleId::Text(text)),
        _ => None,
    })
}

/// Extension appended to every article image base path
pub const IMAGE_EXTENSION: &str = "png";

impl Article {
    /// Decode one catalog record. A record that is not an object becomes an
    /// empty article rather than failing the catalog.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!("Catalog record is not an object: {}", value);
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Unreadable catalog record: {}", e);
            Self::default()
        })
    }

    /// Whether this article is selected by the given location identifier
    pub fn matches_id(&self, param: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.matches_param(param))
    }

    /// Identifier as it appears in a location string; `None` when the
    /// article has no identifier and so cannot be linked to
    pub fn id_param(&self) -> Option<String> {
        self.id.as_ref().map(ToString::to_string)
    }

    /// Image asset path: the base path with the fixed extension appended
    pub fn image_path(&self) -> String {
        format!("{}.{}", self.image, IMAGE_EXTENSION)
    }

    /// Publication date, if the date string is recognised
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }

    /// Case-insensitive substring match against title or author.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a calendar date in any of the formats catalog documents use
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
