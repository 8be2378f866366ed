//! Language entries: one column of the translation table.
//!
//! A language is addressed by its position in the table. Index 0 is the
//! default language that every other language falls back to.

use serde::{Deserialize, Serialize};

/// Index of the default (fallback) language.
pub const DEFAULT_LANGUAGE: usize = 0;

/// A single language column of the translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Human-readable name shown in language pickers (e.g., "Français")
    pub display_name: String,

    /// Locale code matched against the platform locale (e.g., "fr", "en-US")
    pub code: String,

    /// Optional JSON object text with per-key overrides for this language
    pub overlay: Option<String>,
}

impl LanguageEntry {
    /// Create a language entry without an overlay document.
    pub fn new(display_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            code: code.into(),
            overlay: None,
        }
    }

    /// Attach an overlay document (JSON object text).
    pub fn with_overlay(mut self, overlay: impl Into<String>) -> Self {
        self.overlay = Some(overlay.into());
        self
    }

    /// Base language part of the code (`"en"` for `"en-US"`).
    ///
    /// Returns `None` when the code has no region separator.
    pub fn base_code(&self) -> Option<&str> {
        base_code(&self.code)
    }
}

/// Part of a locale code before the first `-` separator.
///
/// Returns `None` when the code contains no separator.
pub fn base_code(code: &str) -> Option<&str> {
    code.split_once('-').map(|(base, _)| base)
}
