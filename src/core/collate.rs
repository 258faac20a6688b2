//! Locale-aware string ordering for titles
//!
//! Strings are compared in three passes, the way common collation tables do:
//! base letters first (accents and case ignored), then accents, then case
//! with lowercase ordered before uppercase.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed sort key. Field order is comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    /// Base letters only
    primary: String,
    /// Base letters plus accents
    secondary: String,
    /// Case of each character, lowercase first
    tertiary: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let decomposed: String = s.nfd().collect();
        Self {
            primary: decomposed
                .chars()
                .filter(|c| !is_combining_mark(*c))
                .collect::<String>()
                .to_lowercase(),
            secondary: decomposed.to_lowercase(),
            tertiary: decomposed.chars().map(char::is_uppercase).collect(),
            raw: s.to_string(),
        }
    }
}
