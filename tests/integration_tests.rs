//! Integration tests for table loading, lookup and the session tree
//!
//! These tests exercise the public API the way a scene would: load or build a
//! table, share one store through a root session, and watch bound targets
//! follow language changes requested anywhere in the tree.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tempfile::TempDir;

use scene_translate::i18n::{
    FixedLocale, InteractionHint, LanguageEntry, PickupHints, SessionOptions, TableBuilder,
    TableValidator, TextLabel, TextTarget, TranslationSession, TranslationStore, TranslationTable,
};

// ==================== Test Helpers ====================

/// English / French / Spanish table used by most scenarios
fn scene_table() -> TranslationTable {
    TableBuilder::new()
        .language(LanguageEntry::new("English", "en"))
        .language(LanguageEntry::new("Français", "fr").with_overlay(r#"{"hello":"Salut"}"#))
        .language(LanguageEntry::new("Español", "es"))
        .key("hello", ["Hello", "Bonjour", "Hola"])
        .key("bye", ["Goodbye", "", "Adiós"])
        .key("grab", ["Grab", "Prendre", "Agarrar"])
        .key("use", ["Use", "Utiliser", "Usar"])
        .build()
}

fn scene_store(locale: &str) -> Rc<TranslationStore> {
    Rc::new(TranslationStore::new(scene_table()).with_locale_source(FixedLocale::new(locale)))
}

fn manual() -> SessionOptions {
    SessionOptions {
        load_from_system: false,
    }
}

// ==================== Lookup Scenarios ====================

#[test]
fn test_overlay_precedence() {
    let store = scene_store("en");
    assert_eq!(store.get_value(1, "hello"), "Salut");
}

#[test]
fn test_fallback_to_default_language() {
    let store = scene_store("en");
    assert_eq!(store.get_value(1, "bye"), "Goodbye");
}

#[test]
fn test_unknown_key_is_empty() {
    let store = scene_store("en");
    assert_eq!(store.get_value(2, "missing"), "");
}

// ==================== Locale Resolution ====================

#[test]
fn test_system_locale_exact_match() {
    assert_eq!(scene_store("en").resolve_system_language(), Some(0));
}

#[test]
fn test_system_locale_region_falls_back_to_base() {
    assert_eq!(scene_store("en-US").resolve_system_language(), Some(0));
    assert_eq!(scene_store("es-MX").resolve_system_language(), Some(2));
}

#[test]
fn test_system_locale_no_match() {
    assert_eq!(scene_store("zz-ZZ").resolve_system_language(), None);
}

// ==================== Session Tree ====================

#[test]
fn test_change_propagates_to_all_children() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let left = TranslationSession::new_child("left", &root, manual());
    let right = TranslationSession::new_child("right", &root, manual());

    let left_label = Rc::new(TextLabel::new());
    let right_label = Rc::new(TextLabel::new());
    left.bind_text(&left_label, "hello");
    right.bind_text(&right_label, "hello");
    left.ensure_init();
    right.ensure_init();

    left.request_language(2);
    assert_eq!(root.selected_language(), 2);
    assert_eq!(left_label.text(), "Hola");
    assert_eq!(right_label.text(), "Hola");

    right.request_language(1);
    assert_eq!(root.selected_language(), 1);
    assert_eq!(left_label.text(), "Salut");
    assert_eq!(right_label.text(), "Salut");
}

#[test]
fn test_invalid_request_changes_nothing() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let child = TranslationSession::new_child("child", &root, manual());
    let label = Rc::new(TextLabel::new());
    child.bind_text(&label, "hello");
    child.request_language(2);

    child.request_language(3);
    child.request_language(42);

    assert_eq!(root.selected_language(), 2);
    assert_eq!(child.selected_language(), 2);
    assert_eq!(label.text(), "Hola");
}

/// Text target that counts renders
#[derive(Default)]
struct CountingLabel {
    renders: Cell<usize>,
}

impl TextTarget for CountingLabel {
    fn set_text(&self, _text: &str) {
        self.renders.set(self.renders.get() + 1);
    }
}

#[test]
fn test_invalid_request_renders_nothing() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let left = TranslationSession::new_child("left", &root, manual());
    let right = TranslationSession::new_child("right", &root, manual());
    let left_label = Rc::new(CountingLabel::default());
    let right_label = Rc::new(CountingLabel::default());
    left.bind_text(&left_label, "hello");
    right.bind_text(&right_label, "hello");
    right.ensure_init();
    left.request_language(1);

    let before = (left_label.renders.get(), right_label.renders.get());
    root.request_language(3);
    left.request_language(usize::MAX);
    right.request_language(4);

    assert_eq!((left_label.renders.get(), right_label.renders.get()), before);
    assert_eq!(root.selected_language(), 1);
}

#[test]
fn test_start_language_from_system_locale() {
    let options = SessionOptions::default();
    let root = TranslationSession::new_root("root", scene_store("fr-BE"), options);
    let child = TranslationSession::new_child("child", &root, options);
    let label = Rc::new(TextLabel::new());
    child.bind_text(&label, "hello");

    child.ensure_init();

    assert_eq!(root.selected_language(), 1);
    assert_eq!(label.text(), "Salut");
}

#[test]
fn test_render_is_idempotent() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let label = Rc::new(TextLabel::new());
    let pickup = Rc::new(PickupHints::new());
    root.bind_text(&label, "bye");
    root.bind_pickup(&pickup, "grab", "use");
    root.request_language(1);

    let before = (label.text(), pickup.interaction_text(), pickup.use_text());
    root.update_language();
    root.update_language();
    let after = (label.text(), pickup.interaction_text(), pickup.use_text());

    assert_eq!(before, after);
    assert_eq!(after.0, "Goodbye");
}

#[test]
fn test_all_target_kinds_follow_selection() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let child = TranslationSession::new_child("child", &root, manual());

    let label = Rc::new(TextLabel::new());
    let pickup = Rc::new(PickupHints::new());
    let hint = Rc::new(InteractionHint::new());
    child.bind_text(&label, "hello");
    child.bind_pickup(&pickup, "grab", "use");
    child.bind_behavior(&hint, "grab");

    child.request_language(2);

    assert_eq!(label.text(), "Hola");
    assert_eq!(pickup.interaction_text(), "Agarrar");
    assert_eq!(pickup.use_text(), "Usar");
    assert_eq!(hint.text(), "Agarrar");
}

#[test]
fn test_destroyed_target_does_not_stop_rendering() {
    let root = TranslationSession::new_root("root", scene_store("en"), manual());
    let destroyed = Rc::new(TextLabel::new());
    let alive = Rc::new(TextLabel::new());
    root.bind_text(&destroyed, "hello");
    root.bind_text(&alive, "hello");
    drop(destroyed);

    root.request_language(2);
    assert_eq!(alive.text(), "Hola");
}

// ==================== Table Files ====================

#[test]
fn test_load_table_with_overlays_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("fr.json"), r#"{"hello": "Salut", "new": "Nouveau"}"#)
        .expect("write overlay");
    std::fs::write(dir.path().join("es.json"), "not json").expect("write overlay");

    let table_path = dir.path().join("table.json");
    std::fs::write(
        &table_path,
        r#"{
            "languages": ["English", "Français", "Español"],
            "language_codes": ["en", "fr", "es"],
            "language_json": [null, "fr.json", "es.json"],
            "keys": ["hello", "bye"],
            "values": ["Hello", "Bonjour", "Hola", "Goodbye", "", "Adiós"]
        }"#,
    )
    .expect("write table");

    let table = TranslationTable::from_json_file(&table_path).expect("load table");
    let report = TableValidator::validate(&table);
    assert!(!report.has_errors());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("Overlay for language 2 (es) is ignored")));

    let store = TranslationStore::new(table).with_locale_source(FixedLocale::new("es-AR"));
    let store = Rc::new(store);
    let root = TranslationSession::new_root("root", Rc::clone(&store), SessionOptions::default());
    let label = Rc::new(TextLabel::new());
    root.bind_text(&label, "hello");
    root.ensure_init();

    assert_eq!(root.selected_language(), 2);
    assert_eq!(label.text(), "Hola");
    assert_eq!(store.get_value(1, "hello"), "Salut");
    assert_eq!(store.get_value(1, "new"), "Nouveau");
    assert_eq!(store.get_value(1, "bye"), "Goodbye");
}

// ==================== Property Tests ====================

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,6}"]
}

/// Languages, keys, flat values, and per-language overlays (one slot per key)
type Fixture = (usize, usize, Vec<String>, Vec<Option<Vec<Option<String>>>>);

fn fixture() -> impl Strategy<Value = Fixture> {
    (1usize..4, 1usize..5).prop_flat_map(|(langs, keys)| {
        (
            Just(langs),
            Just(keys),
            vec(cell(), langs * keys),
            vec(option::of(vec(option::of(cell()), keys)), langs),
        )
    })
}

proptest! {
    #[test]
    fn prop_lookup_follows_fallback_chain((langs, keys, values, overlays) in fixture()) {
        let key_name = |i: usize| format!("k{}", i);

        let mut builder = TableBuilder::new();
        for (j, overlay) in overlays.iter().enumerate() {
            let mut entry = LanguageEntry::new(format!("Lang {}", j), format!("l{}", j));
            if let Some(slots) = overlay {
                let named: BTreeMap<String, &String> = slots
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.as_ref().map(|v| (key_name(i), v)))
                    .collect();
                entry = entry.with_overlay(serde_json::to_string(&named).unwrap());
            }
            builder = builder.language(entry);
        }
        for i in 0..keys {
            builder = builder.key(key_name(i), values[i * langs..(i + 1) * langs].to_vec());
        }
        let store = TranslationStore::new(builder.build());

        // Dictionary entry: overlay, then own cell, then default cell.
        let dictionary = |j: usize, i: usize| -> String {
            if let Some(v) = overlays[j].as_ref().and_then(|slots| slots[i].as_ref()) {
                return v.clone();
            }
            let own = &values[i * langs + j];
            if own.is_empty() { values[i * langs].clone() } else { own.clone() }
        };

        for j in 0..langs {
            for i in 0..keys {
                let own = dictionary(j, i);
                let expected = if !own.is_empty() || j == 0 { own } else { dictionary(0, i) };
                prop_assert_eq!(store.get_value(j, &key_name(i)), expected.as_str());
            }
        }
    }
}
