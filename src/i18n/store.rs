//! Translation store: per-language lookup dictionaries built from a table.
//!
//! The store is built lazily on first use and is read-only afterwards, so it
//! can be shared by every session in a tree without locking.

use crate::i18n::language::{base_code, DEFAULT_LANGUAGE};
use crate::i18n::overlay::parse_overlay;
use crate::i18n::{LanguageEntry, LocaleSource, LookupMetrics, SystemLocale, TranslationTable};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Dictionaries derived from the table at initialization.
#[derive(Debug, Default)]
struct Dictionaries {
    /// One key -> text map per language, indexed like the table's languages
    by_language: Vec<HashMap<String, String>>,

    /// Per language, keys whose text was copied from the default language's cell
    borrowed: Vec<HashSet<String>>,

    /// Language code -> language index (first occurrence of a code wins)
    codes: HashMap<String, usize>,
}

impl Dictionaries {
    fn is_borrowed(&self, lang_index: usize, key: &str) -> bool {
        self.borrowed
            .get(lang_index)
            .is_some_and(|keys| keys.contains(key))
    }
}

/// Owns the authored table and answers lookups with default-language fallback.
#[derive(Debug)]
pub struct TranslationStore {
    table: TranslationTable,
    locale: Box<dyn LocaleSource>,
    dictionaries: OnceLock<Dictionaries>,
    metrics: LookupMetrics,
}

impl TranslationStore {
    /// Create a store that detects the platform locale through the OS.
    pub fn new(table: TranslationTable) -> Self {
        Self {
            table,
            locale: Box::new(SystemLocale),
            dictionaries: OnceLock::new(),
            metrics: LookupMetrics::new(),
        }
    }

    /// Replace the source used by [`resolve_system_language`](Self::resolve_system_language).
    pub fn with_locale_source(mut self, source: impl LocaleSource + 'static) -> Self {
        self.locale = Box::new(source);
        self
    }

    /// Build the lookup dictionaries if they have not been built yet.
    ///
    /// Calling this more than once is a no-op. Every lookup calls it, so an
    /// explicit call only moves the build cost to a convenient moment.
    pub fn ensure_init(&self) {
        self.dictionaries();
    }

    pub fn is_initialized(&self) -> bool {
        self.dictionaries.get().is_some()
    }

    fn dictionaries(&self) -> &Dictionaries {
        self.dictionaries.get_or_init(|| self.build())
    }

    fn build(&self) -> Dictionaries {
        let table = &self.table;
        let mut dictionaries = Dictionaries {
            by_language: Vec::with_capacity(table.language_count()),
            borrowed: Vec::with_capacity(table.language_count()),
            codes: HashMap::new(),
        };

        for (lang_index, language) in table.languages().iter().enumerate() {
            // Overlay entries seed the dictionary and take precedence over cells.
            let mut dictionary = language
                .overlay
                .as_deref()
                .map(parse_overlay)
                .unwrap_or_default();

            let mut borrowed = HashSet::new();
            for (key_index, key) in table.keys().iter().enumerate() {
                let Entry::Vacant(slot) = dictionary.entry(key.clone()) else {
                    continue;
                };

                let own = table.cell(key_index, lang_index);
                if !own.is_empty() || lang_index == DEFAULT_LANGUAGE {
                    slot.insert(own.to_string());
                    continue;
                }

                let default = table.cell(key_index, DEFAULT_LANGUAGE);
                if !default.is_empty() {
                    borrowed.insert(key.clone());
                }
                slot.insert(default.to_string());
            }

            if !borrowed.is_empty() {
                debug!(
                    "Language {} ({}) borrows {} untranslated keys from the default language",
                    lang_index,
                    language.code,
                    borrowed.len()
                );
            }

            dictionaries.by_language.push(dictionary);
            dictionaries.borrowed.push(borrowed);
            register_code(&mut dictionaries.codes, language, lang_index);
        }

        info!(
            "Built translation store: {} languages, {} keys",
            table.language_count(),
            table.key_count()
        );

        dictionaries
    }

    /// Resolve `key` for language `lang_index`.
    ///
    /// Returns the language's text if it is non-empty, otherwise the default
    /// language's text, otherwise `""`. An out-of-range index is looked up as
    /// the default language. Never fails.
    pub fn get_value(&self, lang_index: usize, key: &str) -> &str {
        let dictionaries = self.dictionaries();
        self.metrics.record_lookup();

        let lang_index = if lang_index < dictionaries.by_language.len() {
            lang_index
        } else {
            debug!(
                "Language index {} out of range, using default language",
                lang_index
            );
            DEFAULT_LANGUAGE
        };

        let find = |index: usize| {
            dictionaries
                .by_language
                .get(index)
                .and_then(|dictionary| dictionary.get(key))
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = find(lang_index) {
            if dictionaries.is_borrowed(lang_index, key) {
                self.metrics.record_fallback();
            }
            return value;
        }

        if lang_index != DEFAULT_LANGUAGE {
            if let Some(value) = find(DEFAULT_LANGUAGE) {
                self.metrics.record_fallback();
                return value;
            }
        }

        self.metrics.record_miss();
        ""
    }

    /// Pick the language matching the platform locale.
    ///
    /// Returns `None` when the platform reports no locale or nothing matches.
    pub fn resolve_system_language(&self) -> Option<usize> {
        let Some(locale) = self.locale.current_locale() else {
            debug!("Platform reported no locale");
            return None;
        };

        let resolved = self.resolve_language_code(&locale);
        debug!("Platform locale '{}' resolved to {:?}", locale, resolved);
        resolved
    }

    /// Match a locale code against the table's language codes.
    ///
    /// Tries the exact code first, then the part before the first `-`
    /// (so `"en-US"` matches an `"en"` entry).
    pub fn resolve_language_code(&self, code: &str) -> Option<usize> {
        let codes = &self.dictionaries().codes;
        codes
            .get(code)
            .or_else(|| base_code(code).and_then(|base| codes.get(base)))
            .copied()
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Number of selectable languages.
    pub fn language_count(&self) -> usize {
        self.table.language_count()
    }

    pub fn language(&self, index: usize) -> Option<&LanguageEntry> {
        self.table.language(index)
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }
}

fn register_code(codes: &mut HashMap<String, usize>, language: &LanguageEntry, index: usize) {
    if language.code.is_empty() {
        debug!("Language {} has no code, skipping code index", index);
        return;
    }

    match codes.entry(language.code.clone()) {
        Entry::Vacant(slot) => {
            slot.insert(index);
        }
        Entry::Occupied(existing) => {
            warn!(
                "Language code '{}' used by languages {} and {}; keeping {}",
                language.code,
                existing.get(),
                index,
                existing.get()
            );
        }
    }
}
