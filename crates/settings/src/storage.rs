use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::recent::{display_name_for, RecentProjectEntry, RecentProjects, MAX_RECENT_PROJECTS};

/// Accepts both the current `{name, path}` objects and legacy bare path strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Legacy(PathBuf),
    Entry {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl StoredEntry {
    fn normalize(self) -> Option<RecentProjectEntry> {
        match self {
            StoredEntry::Legacy(path) => Some(RecentProjectEntry::from_path(path)),
            StoredEntry::Entry { name, path } => {
                let path = path?;
                let name = name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| display_name_for(&path));
                Some(RecentProjectEntry { name, path })
            }
        }
    }
}

/// 管理最近專案清單的持久化儲存。 / Persists the recent-projects list as JSON.
///
/// Every failure is logged and degraded: reads yield an empty list and writes become no-ops.
#[derive(Debug, Clone)]
pub struct RecentProjectsStore {
    path: PathBuf,
    capacity: usize,
}

impl RecentProjectsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, MAX_RECENT_PROJECTS)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted entries whose files still exist, most recent first.
    /// （回傳仍存在於磁碟上的最近專案。）
    pub fn list(&self) -> Vec<RecentProjectEntry> {
        let mut history = self.load_history();
        history.retain_existing();
        history.to_vec()
    }

    /// Records `path` at the front of the list. Paths missing on disk are ignored.
    /// Returns whether the list changed.
    pub fn add(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "not recording missing project");
            return false;
        }
        let mut history = self.load_history();
        history.retain_existing();
        history.add(path);
        self.persist(&history)
    }

    pub fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), %err, "failed to clear recent projects");
            }
        }
    }

    fn load_history(&self) -> RecentProjects {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return RecentProjects::new(self.capacity)
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read recent projects");
                return RecentProjects::new(self.capacity);
            }
        };
        match serde_json::from_str::<Vec<StoredEntry>>(&contents) {
            Ok(stored) => {
                let entries = stored
                    .into_iter()
                    .filter_map(StoredEntry::normalize)
                    .collect();
                RecentProjects::with_entries(self.capacity, entries)
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring malformed recent projects");
                RecentProjects::new(self.capacity)
            }
        }
    }

    fn persist(&self, history: &RecentProjects) -> bool {
        let payload = match serde_json::to_string_pretty(&history.to_vec()) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(%err, "failed to serialize recent projects");
                return false;
            }
        };
        match write_atomic(&self.path, payload.as_bytes()) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(path = %self.path.display(), %err, "failed to save recent projects");
                false
            }
        }
    }
}

pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
