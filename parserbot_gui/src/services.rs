use std::path::{Path, PathBuf};

use parserbot_project::{TitleSink, UserChoice};
use parserbot_shell::{ShellServices, WindowError, WindowHost, WindowKind, WindowRoute};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const PROJECT_EXTENSION: &str = "json";

/// Localized strings the native dialogs need. Refreshed whenever the language changes.
#[derive(Debug, Clone, Default)]
pub struct DialogTexts {
    pub unsaved_title: String,
    pub unsaved_description: String,
    pub project_filter: String,
    pub default_project_name: String,
}

/// An auxiliary window that is currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindow {
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Default)]
pub struct NewProjectForm {
    pub window: Option<OpenWindow>,
    pub name: String,
    pub description: String,
}

/// GUI side of the shell: native dialogs plus the requests the next frame acts on.
#[derive(Debug, Default)]
pub struct GuiServices {
    pub texts: DialogTexts,
    pub settings_window: Option<OpenWindow>,
    pub about_window: Option<OpenWindow>,
    pub new_project: NewProjectForm,
    exit_requested: bool,
    theme_changed: bool,
}

impl GuiServices {
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    pub fn take_theme_change(&mut self) -> bool {
        std::mem::take(&mut self.theme_changed)
    }
}

impl WindowHost for GuiServices {
    fn open_window(&mut self, route: WindowRoute) -> Result<(), WindowError> {
        let window = Some(OpenWindow { size: route.size });
        match route.kind {
            WindowKind::Settings => self.settings_window = window,
            WindowKind::About => self.about_window = window,
            WindowKind::NewProject => {
                self.new_project = NewProjectForm {
                    window,
                    name: self.texts.default_project_name.clone(),
                    description: String::new(),
                };
            }
        }
        Ok(())
    }
}

impl ShellServices for GuiServices {
    fn pick_save_path(&mut self, directory: &Path, file_name: &str) -> Option<PathBuf> {
        FileDialog::new()
            .set_directory(directory)
            .set_file_name(file_name)
            .add_filter(&self.texts.project_filter, &[PROJECT_EXTENSION])
            .save_file()
    }

    fn pick_open_path(&mut self, directory: &Path) -> Option<PathBuf> {
        FileDialog::new()
            .set_directory(directory)
            .add_filter(&self.texts.project_filter, &[PROJECT_EXTENSION])
            .pick_file()
    }

    /// Native modal: Yes saves, No discards, anything else cancels.
    fn ask_unsaved_changes(&mut self) -> UserChoice {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(&self.texts.unsaved_title)
            .set_description(&self.texts.unsaved_description)
            .set_buttons(MessageButtons::YesNoCancel)
            .show();
        match answer {
            MessageDialogResult::Yes => UserChoice::Save,
            MessageDialogResult::No => UserChoice::Discard,
            _ => UserChoice::Cancel,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn theme_changed(&mut self) {
        self.theme_changed = true;
    }
}

/// Pushes project titles into the native window title bar.
pub struct ViewportTitle(pub egui::Context);

impl TitleSink for ViewportTitle {
    fn set_title(&mut self, title: &str) {
        self.0
            .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }
}
