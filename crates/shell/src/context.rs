use std::path::{Path, PathBuf};

use parserbot_project::{ProjectDocument, ProjectTracker, UserChoice};
use parserbot_settings::{
    LocalizationStore, RecentProjectsStore, SettingsStore, ThemeKind, ThemeStore,
};

use crate::router::WindowHost;

const CONFIG_DIR_NAME: &str = "parser-bot";
const SETTINGS_FILE: &str = "app_settings.json";
const RECENT_FILE: &str = "recent_projects.json";

/// Per-user file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub recent_file: PathBuf,
    /// Where the open / save pickers start.
    pub projects_dir: PathBuf,
}

impl AppPaths {
    /// Settings and history under `config_dir`, projects in `projects_dir`.
    pub fn new(config_dir: &Path, projects_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_file: config_dir.join(SETTINGS_FILE),
            recent_file: config_dir.join(RECENT_FILE),
            projects_dir: projects_dir.into(),
        }
    }

    /// `<config dir>/parser-bot/` for state, the Downloads folder for projects.
    /// （使用者設定目錄與下載資料夾。）
    pub fn for_current_user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        let projects_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(&config_dir, projects_dir)
    }
}

/// Everything the GUI provides to the shell: pickers, the modal prompt, windows, exit.
pub trait ShellServices: WindowHost {
    /// Native "save as" picker. `None` when the user closes it.
    fn pick_save_path(&mut self, directory: &Path, file_name: &str) -> Option<PathBuf>;
    fn pick_open_path(&mut self, directory: &Path) -> Option<PathBuf>;
    /// Blocking Save / Discard / Cancel prompt.
    fn ask_unsaved_changes(&mut self) -> UserChoice;
    fn request_exit(&mut self);
    /// Called after the active theme changed so the host can restyle itself.
    fn theme_changed(&mut self) {}
}

/// 應用程式狀態。 / All application stores, owned in one place and passed explicitly.
#[derive(Debug)]
pub struct AppContext {
    pub settings: SettingsStore,
    pub localization: LocalizationStore,
    pub theme: ThemeStore,
    pub project: ProjectTracker,
    pub recent: RecentProjectsStore,
    /// Contents of the current project; written out on save.
    pub document: ProjectDocument,
    pub projects_dir: PathBuf,
}

impl AppContext {
    /// Wires the stores together and applies the persisted language and theme.
    pub fn new(
        settings: SettingsStore,
        mut localization: LocalizationStore,
        mut theme: ThemeStore,
        recent: RecentProjectsStore,
        projects_dir: impl Into<PathBuf>,
        app_name: &str,
    ) -> Self {
        let language = settings.settings().language();
        if !localization.set_active_language(language) {
            tracing::warn!(language, "unknown language in settings; keeping default");
        }
        match settings.settings().theme().parse::<ThemeKind>() {
            Ok(kind) => theme.set_kind(kind),
            Err(err) => tracing::warn!(%err, "ignoring theme from settings"),
        }
        let project = ProjectTracker::new(app_name);
        let document = ProjectDocument::new(project.state().name.clone());
        Self {
            settings,
            localization,
            theme,
            project,
            recent,
            document,
            projects_dir: projects_dir.into(),
        }
    }

    pub fn text(&self, key: &str) -> String {
        self.localization.text(key).into_owned()
    }

    /// Directory the pickers open in: the current project's folder, else the projects dir.
    pub fn picker_dir(&self) -> PathBuf {
        self.project
            .state()
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.projects_dir.clone())
    }
}
