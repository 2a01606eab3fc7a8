use std::path::{Path, PathBuf};

use crate::state::ProjectState;

pub const UNSAVED_MARKER: &str = "*";
pub const TITLE_SEPARATOR: &str = "-";

/// `[*] name [- directory] - app`, joined by single spaces.
///
/// Only the containing directory of the project file is shown, never the file itself.
pub fn format_title(state: &ProjectState, app_name: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if state.modified {
        parts.push(UNSAVED_MARKER.to_string());
    }
    parts.push(state.name.clone());
    if let Some(path) = &state.path {
        parts.push(format!("{TITLE_SEPARATOR} {}", containing_directory(path).display()));
    }
    parts.push(format!("{TITLE_SEPARATOR} {app_name}"));
    parts.join(" ")
}

/// A bare file name lives in `.`; the root is its own parent.
fn containing_directory(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => path,
    }
}

/// Receives the window title whenever project state changes.
/// （專案狀態變更時接收新的視窗標題。）
pub trait TitleSink {
    fn set_title(&mut self, title: &str);
}

/// Owns the project state and pushes a fresh title after every mutation.
pub struct ProjectTracker {
    state: ProjectState,
    app_name: String,
    sink: Option<Box<dyn TitleSink>>,
}

impl std::fmt::Debug for ProjectTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectTracker")
            .field("state", &self.state)
            .field("app_name", &self.app_name)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl ProjectTracker {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            state: ProjectState::new_untitled(),
            app_name: app_name.into(),
            sink: None,
        }
    }

    /// Installs the window-chrome collaborator and pushes the current title to it.
    pub fn attach_sink(&mut self, sink: Box<dyn TitleSink>) {
        self.sink = Some(sink);
        self.push_title();
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn title(&self) -> String {
        format_title(&self.state, &self.app_name)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state.modified
    }

    pub fn new_project(&mut self) {
        self.state.new_project();
        self.push_title();
    }

    pub fn open(&mut self, path: impl Into<PathBuf>) {
        self.state.open(path);
        self.push_title();
    }

    pub fn save(&mut self, path: Option<PathBuf>) {
        self.state.save(path);
        self.push_title();
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.state.set_modified(modified);
        self.push_title();
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.state.rename(name);
        self.push_title();
    }

    fn push_title(&mut self) {
        let title = format_title(&self.state, &self.app_name);
        if let Some(sink) = self.sink.as_mut() {
            sink.set_title(&title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl TitleSink for Recorder {
        fn set_title(&mut self, title: &str) {
            self.0.borrow_mut().push(title.to_string());
        }
    }

    #[test]
    fn new_project_title_has_marker_and_no_path() {
        let state = ProjectState {
            name: "untitled".into(),
            path: None,
            modified: true,
        };
        assert_eq!(format_title(&state, "App"), "* untitled - App");
    }

    #[test]
    fn saved_project_title_shows_directory_only() {
        let mut state = ProjectState::new_untitled();
        state.save(Some(PathBuf::from("/home/u/demo.json")));
        assert_eq!(format_title(&state, "App"), "demo - /home/u - App");
    }

    #[test]
    fn bare_file_name_shows_current_directory() {
        let mut state = ProjectState::new_untitled();
        state.save(Some(PathBuf::from("demo.json")));
        assert_eq!(format_title(&state, "App"), "demo - . - App");
    }

    #[test]
    fn every_mutation_pushes_a_title() {
        let recorder = Recorder::default();
        let mut tracker = ProjectTracker::new("Parser Bot");
        tracker.attach_sink(Box::new(recorder.clone()));
        tracker.open("/data/site.json");
        tracker.set_modified(true);
        tracker.save(None);
        tracker.new_project();

        assert_eq!(
            recorder.0.borrow().as_slice(),
            [
                "* untitled - Parser Bot",
                "site - /data - Parser Bot",
                "* site - /data - Parser Bot",
                "site - /data - Parser Bot",
                "* untitled - Parser Bot",
            ]
        );
    }
}
