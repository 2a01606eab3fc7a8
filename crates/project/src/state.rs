use std::path::{Path, PathBuf};

/// Name shown for a project that has never been saved.
pub const UNTITLED: &str = "untitled";

/// What the window title and the unsaved-changes prompt know about the current project.
/// 目前專案的名稱、路徑與是否有未儲存變更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub name: String,
    pub path: Option<PathBuf>,
    pub modified: bool,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new_untitled()
    }
}

impl ProjectState {
    /// A brand-new project: sentinel name, never saved, and counted as unsaved.
    pub fn new_untitled() -> Self {
        Self {
            name: UNTITLED.to_string(),
            path: None,
            modified: true,
        }
    }

    pub fn new_project(&mut self) {
        *self = Self::new_untitled();
    }

    pub fn open(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.name = name_from_path(&path);
        self.path = Some(path);
        self.modified = false;
    }

    /// Clears the modified flag; a given path also replaces the location and name.
    pub fn save(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.name = name_from_path(&path);
            self.path = Some(path);
        }
        self.modified = false;
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        let trimmed = name.trim();
        self.name = if trimmed.is_empty() {
            UNTITLED.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

pub(crate) fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_is_untitled_and_unsaved() {
        let mut state = ProjectState::default();
        state.open("/tmp/demo.json");
        state.new_project();
        assert_eq!(state, ProjectState::new_untitled());
        assert!(state.modified);
        assert!(state.path.is_none());
    }

    #[test]
    fn open_derives_name_and_clears_modified() {
        let mut state = ProjectState::new_untitled();
        state.open("/home/u/scraper.json");
        assert_eq!(state.name, "scraper");
        assert_eq!(state.path, Some(PathBuf::from("/home/u/scraper.json")));
        assert!(!state.modified);
    }

    #[test]
    fn save_without_path_keeps_location() {
        let mut state = ProjectState::new_untitled();
        state.open("/home/u/scraper.json");
        state.set_modified(true);
        state.save(None);
        assert_eq!(state.name, "scraper");
        assert!(!state.modified);

        state.save(Some(PathBuf::from("/srv/other.json")));
        assert_eq!(state.name, "other");
        assert_eq!(state.path, Some(PathBuf::from("/srv/other.json")));
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut state = ProjectState::new_untitled();
        state.rename("  Crawler  ");
        assert_eq!(state.name, "Crawler");
        state.rename("   ");
        assert_eq!(state.name, UNTITLED);
    }
}
