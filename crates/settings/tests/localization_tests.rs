use std::fs;

use parserbot_settings::{LocalizationError, LocalizationStore};
use tempfile::tempdir;

#[test]
fn empty_store_returns_key() {
    let store = LocalizationStore::empty();
    assert_eq!(store.text("top_bar_File"), "top_bar_File");
}

#[test]
fn loads_from_file_and_switches_language() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("localization.json");
    fs::write(
        &path,
        r#"{
            "ru": { "top_bar_File": "Файл", "menu_no_recent_projects": "Нет недавних проектов" },
            "en": { "top_bar_File": "File" }
        }"#,
    )
    .expect("write locale");

    let mut store = LocalizationStore::load(&path, "ru").expect("load");
    assert_eq!(store.text("top_bar_File"), "Файл");
    assert!(store.set_active_language("en"));
    assert_eq!(store.text("top_bar_File"), "File");
    assert_eq!(
        store.text("menu_no_recent_projects"),
        "Нет недавних проектов"
    );

    let translate = store.translator();
    assert_eq!(translate("top_bar_File"), "File");
    assert_eq!(translate("unknown"), "unknown");
}

#[test]
fn missing_file_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let error = LocalizationStore::load(temp.path().join("nope.json"), "ru").unwrap_err();
    assert!(matches!(error, LocalizationError::ReadFile(..)));
}

#[test]
fn non_string_values_are_rejected() {
    let error = LocalizationStore::from_json_str(r#"{ "ru": { "a": 1 } }"#, "ru").unwrap_err();
    assert!(matches!(error, LocalizationError::Parse(_)));
}
