use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const KEY_LANGUAGE: &str = "language";
pub const KEY_THEME: &str = "theme";
pub const KEY_AUTO_SAVE: &str = "auto_save";
pub const KEY_SHOW_GRID: &str = "show_grid";
pub const KEY_SNAP_TO_GRID: &str = "snap_to_grid";

static DEFAULT_SETTINGS: Lazy<Map<String, Value>> = Lazy::new(|| {
    let mut map = Map::new();
    map.insert(KEY_LANGUAGE.into(), Value::from("ru"));
    map.insert(KEY_THEME.into(), Value::from("dark"));
    map.insert(KEY_AUTO_SAVE.into(), Value::from(true));
    map.insert(KEY_SHOW_GRID.into(), Value::from(true));
    map.insert(KEY_SNAP_TO_GRID.into(), Value::from(true));
    map
});

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
    #[error("failed to serialize settings {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flat key/value application settings.
/// （平面鍵值的應用程式設定。）
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    values: Map<String, Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            values: DEFAULT_SETTINGS.clone(),
        }
    }
}

impl AppSettings {
    /// Defaults overlaid with `overrides`; keys absent from `overrides` keep their default
    /// and unknown keys are carried along untouched.
    pub fn merged(overrides: Map<String, Value>) -> Self {
        let mut settings = Self::default();
        settings.values.extend(overrides);
        settings
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Boolean setting; non-boolean or absent values read as the built-in default.
    pub fn flag(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .or_else(|| DEFAULT_SETTINGS.get(key).and_then(Value::as_bool))
            .unwrap_or(false)
    }

    pub fn language(&self) -> &str {
        self.str_or_default(KEY_LANGUAGE)
    }

    pub fn theme(&self) -> &str {
        self.str_or_default(KEY_THEME)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    fn str_or_default(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| DEFAULT_SETTINGS.get(key).and_then(Value::as_str))
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    data: AppSettings,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>, settings: AppSettings) -> Self {
        Self {
            path: path.into(),
            data: settings,
        }
    }

    /// Missing files yield defaults; unreadable or malformed files are errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                data: AppSettings::default(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?;
        let Value::Object(overrides) = value else {
            return Err(SettingsError::NotAnObject(path));
        };
        Ok(Self {
            path,
            data: AppSettings::merged(overrides),
        })
    }

    /// Like [`SettingsStore::load`] but never fails: problems are logged and defaults used.
    /// （載入失敗時記錄警告並改用預設值。）
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(%err, "falling back to default settings");
                Self::new(path, AppSettings::default())
            }
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.data
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.set(key, value);
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.data.set(key, value);
    }

    pub fn flag(&self, key: &str) -> bool {
        self.data.flag(key)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(self.data.as_map()).map_err(|source| {
            SettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload.as_bytes()).map_err(|source| SettingsError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Saves and reports failure as `false` after logging it.
    pub fn save_logged(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, "failed to save settings");
                false
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
