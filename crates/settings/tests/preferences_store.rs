use parserbot_settings::{AppSettings, SettingsStore, KEY_AUTO_SAVE, KEY_SHOW_GRID};
use serde_json::{json, Map, Value};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_missing_file_returns_defaults() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("app_settings.json");

    let store = SettingsStore::load(&path).expect("load defaults");
    let settings = store.settings();
    assert_eq!(settings.language(), "ru");
    assert_eq!(settings.theme(), "dark");
    assert!(settings.flag("auto_save"));
    assert!(settings.flag("show_grid"));
    assert!(settings.flag("snap_to_grid"));
}

#[test]
fn persisted_keys_override_defaults_and_others_are_kept() {
    let mut overrides = Map::new();
    overrides.insert(KEY_SHOW_GRID.to_string(), Value::from(false));
    let merged = AppSettings::merged(overrides);

    assert!(merged.flag(KEY_AUTO_SAVE));
    assert!(!merged.flag(KEY_SHOW_GRID));
}

#[test]
fn unknown_keys_survive_a_reload() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("app_settings.json");
    fs::write(&path, r#"{ "window_width": 1280, "theme": "light" }"#).expect("write");

    let store = SettingsStore::load(&path).expect("load");
    assert_eq!(store.settings().theme(), "light");
    store.save().expect("save");

    let reloaded: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(reloaded["window_width"], json!(1280));
    assert_eq!(reloaded["language"], json!("ru"));
}

#[test]
fn save_and_reload_roundtrip() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("app_settings.json");

    let mut store = SettingsStore::new(path.clone(), AppSettings::default());
    store.set_flag(KEY_AUTO_SAVE, false);
    store.set("language", "en");
    store.save().expect("save");

    let reloaded = SettingsStore::load(&path).expect("reload");
    assert!(!reloaded.flag(KEY_AUTO_SAVE));
    assert_eq!(reloaded.settings().language(), "en");
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("app_settings.json");
    fs::write(&path, "[1, 2").expect("write");

    assert!(SettingsStore::load(&path).is_err());
    let store = SettingsStore::load_or_default(&path);
    assert_eq!(store.settings(), &AppSettings::default());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn non_object_file_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("app_settings.json");
    fs::write(&path, "[]").expect("write");

    let store = SettingsStore::load_or_default(&path);
    assert_eq!(store.settings().language(), "ru");
}

#[test]
fn blank_language_reads_as_default() {
    let mut settings = AppSettings::default();
    settings.set("language", "  ");
    settings.set("auto_save", "yes");
    assert_eq!(settings.language(), "ru");
    assert!(settings.flag("auto_save"));
    assert!(!settings.flag("no_such_flag"));
}
