//! Authored translation table: the static key x language value matrix.
//!
//! The table is authoring data. It is loaded once (from a JSON file or built
//! in code) and handed to a [`TranslationStore`](crate::i18n::TranslationStore),
//! which derives the lookup dictionaries from it.

use crate::i18n::LanguageEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading an authored table from disk.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read translation table {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse translation table {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk layout of the authored table: parallel sequences plus the flat matrix.
///
/// `language_json` entries are overlay file paths relative to the table file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFile {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub language_json: Vec<Option<String>>,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Key x language value matrix with per-language metadata.
///
/// The value for `(key i, language j)` lives at `i * N + j` where `N` is the
/// number of languages. An empty string marks an unset cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    languages: Vec<LanguageEntry>,
    keys: Vec<String>,
    values: Vec<String>,
}

impl TranslationTable {
    /// Create a table from already-flattened parts.
    ///
    /// The matrix is kept as given; [`cell`](Self::cell) treats any position
    /// past the end of `values` as unset.
    pub fn new(languages: Vec<LanguageEntry>, keys: Vec<String>, values: Vec<String>) -> Self {
        let expected = languages.len() * keys.len();
        if values.len() != expected {
            warn!(
                "Translation matrix has {} cells, expected {} ({} keys x {} languages)",
                values.len(),
                expected,
                keys.len(),
                languages.len()
            );
        }

        Self {
            languages,
            keys,
            values,
        }
    }

    /// Load a table from a JSON file, reading overlay documents it references.
    ///
    /// Overlay paths are resolved relative to the table file's directory. An
    /// overlay file that cannot be read is logged and treated as absent.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: TableFile =
            serde_json::from_str(&content).map_err(|source| TableError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_table_file(file, base_dir))
    }

    /// Convert the parallel-sequence layout into a table.
    ///
    /// The language count is taken from `languages`; shorter code or overlay
    /// sequences are padded with empty codes and missing overlays.
    pub fn from_table_file(file: TableFile, base_dir: &Path) -> Self {
        let TableFile {
            languages,
            language_codes,
            language_json,
            keys,
            values,
        } = file;

        if language_codes.len() != languages.len() {
            warn!(
                "Table lists {} languages but {} language codes",
                languages.len(),
                language_codes.len()
            );
        }

        let mut codes = language_codes.into_iter();
        let mut overlays = language_json.into_iter();
        let entries = languages
            .into_iter()
            .map(|display_name| {
                let code = codes.next().unwrap_or_default();
                let overlay = overlays
                    .next()
                    .flatten()
                    .and_then(|reference| read_overlay(&base_dir.join(reference)));
                LanguageEntry {
                    display_name,
                    code,
                    overlay,
                }
            })
            .collect();

        Self::new(entries, keys, values)
    }

    /// Number of languages (N).
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// Number of keys (M).
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn languages(&self) -> &[LanguageEntry] {
        &self.languages
    }

    pub fn language(&self, index: usize) -> Option<&LanguageEntry> {
        self.languages.get(index)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Matrix cell for `(key_index, lang_index)`, or `""` when out of bounds.
    pub fn cell(&self, key_index: usize, lang_index: usize) -> &str {
        if lang_index >= self.languages.len() {
            return "";
        }

        self.values
            .get(key_index * self.languages.len() + lang_index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read an overlay file, logging and dropping it on failure.
fn read_overlay(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!("Loaded overlay document {}", path.display());
            Some(text)
        }
        Err(e) => {
            warn!("Failed to read overlay document {}: {}", path.display(), e);
            None
        }
    }
}

/// Incremental builder for tables authored in code.
///
/// Rows shorter than the final language count are padded with unset cells;
/// longer rows are truncated.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    languages: Vec<LanguageEntry>,
    rows: Vec<(String, Vec<String>)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a language column.
    pub fn language(mut self, entry: LanguageEntry) -> Self {
        self.languages.push(entry);
        self
    }

    /// Append a key row; `values[j]` is the text for language `j`.
    pub fn key<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn build(self) -> TranslationTable {
        let width = self.languages.len();
        let mut keys = Vec::with_capacity(self.rows.len());
        let mut values = Vec::with_capacity(self.rows.len() * width);

        for (key, mut row) in self.rows {
            row.resize(width, String::new());
            keys.push(key);
            values.extend(row);
        }

        TranslationTable::new(self.languages, keys, values)
    }
}
