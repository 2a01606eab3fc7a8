use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LANGUAGE: &str = "ru";

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("failed to read localization file {0}: {1}")]
    ReadFile(PathBuf, io::Error),
    #[error("failed to parse localization data: {0}")]
    Parse(#[from] serde_json::Error),
}

type Catalog = HashMap<String, String>;

/// Flat per-language string tables keyed by text id.
/// （依語言區分的平面字串表，以文字 ID 為鍵。）
#[derive(Debug, Clone)]
pub struct LocalizationStore {
    catalogs: BTreeMap<String, Catalog>,
    active: String,
    fallback: String,
}

impl LocalizationStore {
    /// An empty store; every lookup returns the key itself.
    pub fn empty() -> Self {
        Self {
            catalogs: BTreeMap::new(),
            active: DEFAULT_LANGUAGE.to_string(),
            fallback: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Parses `{language -> {key -> text}}`.
    /// （解析 `{語言 -> {鍵 -> 文字}}` 結構。）
    pub fn from_json_str(input: &str, default_language: &str) -> Result<Self, LocalizationError> {
        let catalogs: BTreeMap<String, Catalog> = serde_json::from_str(input)?;
        Ok(Self {
            catalogs,
            active: default_language.to_string(),
            fallback: default_language.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>, default_language: &str) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| LocalizationError::ReadFile(path.to_path_buf(), err))?;
        Self::from_json_str(&contents, default_language)
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Language codes present in the loaded resource, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.catalogs.keys().map(String::as_str).collect()
    }

    /// Switches the active language; unknown codes leave the store untouched.
    /// （切換目前語言；未知代碼不會變更狀態。）
    pub fn set_active_language(&mut self, code: &str) -> bool {
        if self.catalogs.contains_key(code) {
            self.active = code.to_string();
            true
        } else {
            false
        }
    }

    /// Looks up `key` in the active language, then the default one, then returns `key`.
    /// （依序查找目前語言、預設語言，最後回傳鍵本身。）
    pub fn text<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        self.lookup(&self.active, key)
            .or_else(|| self.lookup(&self.fallback, key))
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed(key))
    }

    /// Looks up `key` in one specific language without falling back.
    pub fn text_in<'a>(&'a self, key: &'a str, language: &str) -> Cow<'a, str> {
        self.lookup(language, key)
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed(key))
    }

    pub fn has_text(&self, key: &str, language: &str) -> bool {
        self.lookup(language, key).is_some()
    }

    /// Owned translation closure capturing a snapshot of the active language.
    pub fn translator(&self) -> impl Fn(&str) -> String + '_ {
        move |key| self.text(key).into_owned()
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(language)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
    }
}

impl Default for LocalizationStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ru": { "menu_file": "Файл", "only_ru": "Только" },
        "en": { "menu_file": "File" }
    }"#;

    #[test]
    fn missing_key_falls_back_to_default_language_then_key() {
        let mut store = LocalizationStore::from_json_str(SAMPLE, "ru").unwrap();
        assert!(store.set_active_language("en"));
        assert_eq!(store.text("menu_file"), "File");
        assert_eq!(store.text("only_ru"), "Только");
        assert_eq!(store.text("nowhere"), "nowhere");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut store = LocalizationStore::from_json_str(SAMPLE, "ru").unwrap();
        assert!(!store.set_active_language("de"));
        assert_eq!(store.active_language(), "ru");
        assert_eq!(store.languages(), vec!["en", "ru"]);
    }

    #[test]
    fn text_in_does_not_fall_back() {
        let store = LocalizationStore::from_json_str(SAMPLE, "ru").unwrap();
        assert_eq!(store.text_in("only_ru", "en"), "only_ru");
        assert!(store.has_text("only_ru", "ru"));
        assert!(!store.has_text("only_ru", "en"));
    }
}
