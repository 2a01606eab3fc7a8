use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Maximum number of projects remembered in the "Open recent" list.
pub const MAX_RECENT_PROJECTS: usize = 5;

/// 最近開啟的專案項目。 / One remembered project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProjectEntry {
    pub name: String,
    pub path: PathBuf,
}

impl RecentProjectEntry {
    /// Name is the file name without its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name_for(&path);
        Self { name, path }
    }
}

pub(crate) fn display_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// 管理最近開啟專案的清單。 / Maintains a bounded, most-recent-first project list.
#[derive(Debug, Clone)]
pub struct RecentProjects {
    capacity: usize,
    entries: VecDeque<RecentProjectEntry>,
}

impl RecentProjects {
    /// 建立指定容量的清單。 / Creates a history list with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// 依序列化資料還原清單。 / Reconstructs the list from persisted entries.
    pub fn with_entries(capacity: usize, entries: Vec<RecentProjectEntry>) -> Self {
        let mut recent = Self::new(capacity);
        for entry in entries {
            if recent.entries.iter().any(|existing| existing.path == entry.path) {
                continue;
            }
            recent.entries.push_back(entry);
        }
        recent.entries.truncate(recent.capacity);
        recent
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 加入或提升專案至清單頂端。 / Inserts or promotes a path to the front of the list.
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        let entry = RecentProjectEntry::from_path(path);
        self.entries.retain(|existing| existing.path != entry.path);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Drops entries whose file no longer exists.
    pub fn retain_existing(&mut self) {
        self.entries.retain(|entry| entry.path.exists());
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentProjectEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<RecentProjectEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for RecentProjects {
    fn default() -> Self {
        Self::new(MAX_RECENT_PROJECTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(recent: &RecentProjects) -> Vec<&str> {
        recent
            .iter()
            .map(|entry| entry.path.to_str().unwrap())
            .collect()
    }

    #[test]
    fn add_promotes_and_limits_capacity() {
        let mut recent = RecentProjects::new(3);
        recent.add("a.json");
        recent.add("b.json");
        recent.add("c.json");
        // Re-adding an existing path should promote it to the front.
        recent.add("b.json");
        assert_eq!(paths(&recent), vec!["b.json", "c.json", "a.json"]);

        recent.add("d.json");
        assert_eq!(paths(&recent), vec!["d.json", "b.json", "c.json"]);
    }

    #[test]
    fn entry_name_is_file_stem() {
        let entry = RecentProjectEntry::from_path("/home/u/demo.json");
        assert_eq!(entry.name, "demo");
        assert_eq!(entry.path, PathBuf::from("/home/u/demo.json"));
    }

    #[test]
    fn with_entries_drops_duplicates_and_trims() {
        let entries = ["a", "b", "a", "c"]
            .into_iter()
            .map(RecentProjectEntry::from_path)
            .collect();
        let recent = RecentProjects::with_entries(2, entries);
        assert_eq!(paths(&recent), vec!["a", "b"]);
    }

    #[test]
    fn default_uses_the_standard_capacity() {
        let mut recent = RecentProjects::default();
        assert!(recent.is_empty());
        recent.add("x");
        recent.add("y");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.capacity(), MAX_RECENT_PROJECTS);
    }
}
