use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const PROJECT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read project {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse project {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize project {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write project {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk project file. `data` belongs to whatever feature owns the project and is
/// carried through untouched.
/// 專案檔案內容；`data` 欄位原樣保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "empty_data")]
    pub data: Value,
}

fn default_version() -> String {
    PROJECT_FORMAT_VERSION.to_string()
}

fn empty_data() -> Value {
    Value::Object(Default::default())
}

impl ProjectDocument {
    /// A fresh document stamped with today's local date.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: chrono::Local::now().format("%Y-%m-%d").to_string(),
            version: default_version(),
            data: empty_data(),
        }
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ProjectError::NotFound(path));
        }
        let contents = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ProjectError::Parse { path, source })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref().to_path_buf();
        let payload =
            serde_json::to_string_pretty(self).map_err(|source| ProjectError::Serialize {
                path: path.clone(),
                source,
            })?;
        write_atomic(&path, payload.as_bytes()).map_err(|source| ProjectError::Write { path, source })
    }
}

/// Writes data atomically by using a temporary sibling file followed by rename.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)
}
