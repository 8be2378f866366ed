//! Translation preview - loads a table and shows what a scene would display
//!
//! Usage:
//!   cargo run                  # Show strings for the detected language
//!   cargo run -- fr            # Also switch to the language matching "fr"
//!
//! Required environment variables:
//! - TRANSLATION_TABLE
//!
//! Optional:
//! - APP_LOCALE (overrides the platform locale)
//! - LOAD_LANGUAGE_FROM_SYSTEM (defaults to true)

use anyhow::{Context, Result};
use scene_translate::config::Config;
use scene_translate::i18n::{
    FixedLocale, SessionOptions, TableValidator, TextLabel, TranslationSession, TranslationStore,
    TranslationTable,
};
use std::rc::Rc;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored if missing)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scene_translate=info".parse()?),
        )
        .init();

    info!("Starting translation preview");

    let config = Config::from_env()?;

    let table = TranslationTable::from_json_file(&config.table_path).with_context(|| {
        format!(
            "Failed to load translation table {}",
            config.table_path.display()
        )
    })?;

    let report = TableValidator::validate(&table);
    for error in &report.errors {
        warn!("Table error: {}", error);
    }
    for warning in &report.warnings {
        warn!("Table warning: {}", warning);
    }
    if report.is_clean() {
        info!("✓ Table passed validation");
    }

    let keys = table.keys().to_vec();
    let mut store = TranslationStore::new(table);
    if let Some(locale) = &config.locale_override {
        info!("Using locale override {}", locale);
        store = store.with_locale_source(FixedLocale::new(locale.clone()));
    }
    let store = Rc::new(store);

    let options = SessionOptions {
        load_from_system: config.load_from_system,
    };
    let root = TranslationSession::new_root("root", Rc::clone(&store), options);
    let preview = TranslationSession::new_child("preview", &root, options);

    let labels: Vec<(String, Rc<TextLabel>)> = keys
        .into_iter()
        .map(|key| {
            let label = Rc::new(TextLabel::new());
            preview.bind_text(&label, key.clone());
            (key, label)
        })
        .collect();

    preview.ensure_init();
    show_labels(&store, &preview, &labels);

    if let Some(code) = std::env::args().nth(1) {
        match store.resolve_language_code(&code) {
            Some(index) => {
                preview.request_language(index);
                show_labels(&store, &preview, &labels);
            }
            None => warn!("No language matches '{}'", code),
        }
    }

    let metrics = store.metrics().report();
    info!("Lookup metrics: {}", serde_json::to_string(&metrics)?);

    Ok(())
}

fn show_labels(
    store: &TranslationStore,
    session: &TranslationSession,
    labels: &[(String, Rc<TextLabel>)],
) {
    let selected = session.selected_language();
    let name = store
        .language(selected)
        .map(|lang| lang.display_name.as_str())
        .unwrap_or("?");

    info!("Language {} ({}):", selected, name);
    for (key, label) in labels {
        info!("  {} = {:?}", key, label.text());
    }
}
