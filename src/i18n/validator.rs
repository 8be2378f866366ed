//! Translation table validation.
//!
//! Runtime lookups never fail, so authoring mistakes show up as missing or
//! wrong text instead of errors. This module reports those mistakes up front:
//! inconsistent matrix sizes, duplicate codes and keys, broken overlays,
//! untranslated default-language cells, and `{placeholder}` tokens that a
//! translation dropped or invented.

use crate::i18n::language::DEFAULT_LANGUAGE;
use crate::i18n::overlay::try_parse_overlay;
use crate::i18n::TranslationTable;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make parts of the table unreachable or misaligned
    pub errors: Vec<String>,

    /// Problems that degrade to fallback or surprising text
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for authored translation tables.
pub struct TableValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Validate a table.
    ///
    /// Errors:
    /// - the table has no languages
    /// - the matrix size is not `keys x languages`
    ///
    /// Warnings:
    /// - duplicate or empty language codes
    /// - duplicate or empty keys
    /// - overlays that are not a JSON object
    /// - keys with no default-language text
    /// - placeholder sets that differ from the default language
    pub fn validate(table: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        if table.language_count() == 0 {
            report.errors.push("Table has no languages".to_string());
        }

        let expected = table.language_count() * table.key_count();
        if table.values().len() != expected {
            report.errors.push(format!(
                "Matrix size mismatch: {} values for {} keys x {} languages (expected {})",
                table.values().len(),
                table.key_count(),
                table.language_count(),
                expected
            ));
        }

        Self::check_codes(table, &mut report);
        Self::check_keys(table, &mut report);
        Self::check_overlays(table, &mut report);
        Self::check_cells(table, &mut report);

        report
    }

    fn check_codes(table: &TranslationTable, report: &mut ValidationReport) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, language) in table.languages().iter().enumerate() {
            if language.code.is_empty() {
                report.warnings.push(format!(
                    "Language {} ({}) has no code",
                    index, language.display_name
                ));
                continue;
            }

            if let Some(&first) = seen.get(language.code.as_str()) {
                report.warnings.push(format!(
                    "Duplicate language code '{}' at {} and {}; {} is used for locale matching",
                    language.code, first, index, first
                ));
            } else {
                seen.insert(&language.code, index);
            }
        }
    }

    fn check_keys(table: &TranslationTable, report: &mut ValidationReport) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (index, key) in table.keys().iter().enumerate() {
            if key.is_empty() {
                report.warnings.push(format!("Key {} is empty", index));
                continue;
            }

            if let Some(&first) = seen.get(key.as_str()) {
                report.warnings.push(format!(
                    "Duplicate key '{}' at {} and {}",
                    key, first, index
                ));
            } else {
                seen.insert(key, index);
            }
        }
    }

    fn check_overlays(table: &TranslationTable, report: &mut ValidationReport) {
        for (index, language) in table.languages().iter().enumerate() {
            if let Some(Err(e)) = language.overlay.as_deref().map(try_parse_overlay) {
                report.warnings.push(format!(
                    "Overlay for language {} ({}) is ignored: {}",
                    index, language.code, e
                ));
            }
        }
    }

    fn check_cells(table: &TranslationTable, report: &mut ValidationReport) {
        for (key_index, key) in table.keys().iter().enumerate() {
            let default_text = table.cell(key_index, DEFAULT_LANGUAGE);
            if default_text.is_empty() {
                report.warnings.push(format!(
                    "Key '{}' has no default-language text",
                    key
                ));
                continue;
            }

            let expected = Self::extract_placeholders(default_text);
            for lang_index in 1..table.language_count() {
                let text = table.cell(key_index, lang_index);
                if text.is_empty() {
                    continue;
                }

                let found = Self::extract_placeholders(text);
                if found != expected {
                    report.warnings.push(format!(
                        "Placeholder mismatch for '{}' in language {}: {:?} vs default {:?}",
                        key, lang_index, found, expected
                    ));
                }
            }
        }
    }

    /// Extract the set of `{name}` placeholders from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
        });

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
