use parserbot_project::ProjectDocument;
use parserbot_settings::{
    IconLibrary, LocalizationError, LocalizationStore, RecentProjectsStore, ResourceError,
    ResourceLoader, SettingsStore, ThemeLoadError, ThemeStore, COLOR_SCHEMES_FILE,
    DEFAULT_LANGUAGE, KEY_LANGUAGE, LOCALIZATION_FILE, MENU_CONFIG_FILE,
};
use serde_json::Value;
use thiserror::Error;

use crate::actions;
use crate::builder;
use crate::context::{AppContext, AppPaths, ShellServices};
use crate::dispatch::{ActionHandler, ActionOutcome, ActionTable, Dispatch, MenuEvent};
use crate::ids;
use crate::live::{ElementId, LiveMenu};
use crate::model::{MenuConfigError, MenuTree};
use crate::router::{WindowKind, WindowRouter};
use crate::style::WindowStyle;
use crate::sync::{self, FlagChange, SettingsPanel, Surface};

/// Key of the optional project description inside the document's `data`.
const DESCRIPTION_KEY: &str = "description";

/// Mandatory assets that failed to load. Startup stops on any of these.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Localization(#[from] LocalizationError),
    #[error(transparent)]
    Theme(#[from] ThemeLoadError),
    #[error(transparent)]
    Menu(#[from] MenuConfigError),
}

/// 應用程式外殼。 / The menu-driven application core the GUI renders and feeds events into.
#[derive(Debug)]
pub struct Shell {
    context: AppContext,
    tree: MenuTree,
    icons: IconLibrary,
    menu: LiveMenu,
    actions: ActionTable,
    router: WindowRouter,
    panel: Option<SettingsPanel>,
    window_style: WindowStyle,
}

impl Shell {
    /// Loads the bundled assets (hard failures) and the per-user state (soft failures).
    pub fn start(
        resources: &ResourceLoader,
        icons: IconLibrary,
        paths: &AppPaths,
        app_name: &str,
    ) -> Result<Self, StartupError> {
        let tree = MenuTree::from_json_str(&resources.read(MENU_CONFIG_FILE)?)?;
        let localization =
            LocalizationStore::from_json_str(&resources.read(LOCALIZATION_FILE)?, DEFAULT_LANGUAGE)?;
        let theme = ThemeStore::from_json_str(&resources.read(COLOR_SCHEMES_FILE)?)?;
        let settings = SettingsStore::load_or_default(&paths.settings_file);
        let recent = RecentProjectsStore::new(&paths.recent_file);
        let context = AppContext::new(
            settings,
            localization,
            theme,
            recent,
            &paths.projects_dir,
            app_name,
        );
        tracing::info!(
            language = context.localization.active_language(),
            theme = context.theme.kind().as_str(),
            "shell started"
        );
        Ok(Self::new(context, tree, icons))
    }

    pub fn new(context: AppContext, tree: MenuTree, icons: IconLibrary) -> Self {
        let mut actions = ActionTable::new();
        actions::register_builtin_actions(&mut actions);
        let mut shell = Self {
            context,
            tree,
            icons,
            menu: LiveMenu::default(),
            actions,
            router: WindowRouter::with_default_routes(),
            panel: None,
            window_style: WindowStyle::default(),
        };
        shell.rebuild_menu();
        shell
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    pub fn menu(&self) -> &LiveMenu {
        &self.menu
    }

    pub fn window_style(&self) -> WindowStyle {
        self.window_style
    }

    pub fn text(&self, key: &str) -> String {
        self.context.text(key)
    }

    /// A click on `element`. Checkboxes flip before the event is dispatched.
    pub fn activate(&mut self, element: ElementId, services: &mut dyn ShellServices) -> Dispatch {
        match self.menu.activate(element) {
            Some(event) => self.dispatch(event, services),
            None => Dispatch::Unhandled,
        }
    }

    /// Routes `event`: built-in actions, then setting checkboxes, then the window router.
    pub fn dispatch(&mut self, event: MenuEvent, services: &mut dyn ShellServices) -> Dispatch {
        let id = match &event {
            MenuEvent::OpenRecent(_) => {
                return self.run(actions::open_recent, &event, services);
            }
            MenuEvent::Item { id, .. } => id.clone(),
        };
        if let Some(handler) = self.actions.get(&id) {
            return self.run(handler, &event, services);
        }
        if let Some(binding) = sync::binding_for_menu_id(&id) {
            let value = match event {
                MenuEvent::Item {
                    checked: Some(checked),
                    ..
                } => checked,
                _ => !self.context.settings.flag(binding.setting_key),
            };
            self.apply_flag_change(FlagChange {
                key: binding.setting_key,
                value,
                origin: Surface::Menu,
            });
            return Dispatch::Handled;
        }
        self.route(&id, services)
    }

    /// Persists a checkbox-backed setting and pushes it to every other surface.
    /// Returns the surfaces that were updated.
    pub fn apply_flag_change(&mut self, change: FlagChange) -> Vec<Surface> {
        self.context.settings.set_flag(change.key, change.value);
        self.context.settings.save_logged();
        let mut pushed = Vec::new();
        if change.origin != Surface::Menu {
            if let Some(binding) = sync::binding_for_key(change.key) {
                if self.menu.set_checked(binding.menu_id, change.value) {
                    pushed.push(Surface::Menu);
                }
            }
        }
        if change.origin != Surface::SettingsPanel {
            if let Some(panel) = self.panel.as_mut() {
                if panel.set_silently(change.key, change.value) {
                    pushed.push(Surface::SettingsPanel);
                }
            }
        }
        tracing::debug!(key = change.key, value = change.value, ?pushed, "setting changed");
        pushed
    }

    pub fn panel(&self) -> Option<&SettingsPanel> {
        self.panel.as_ref()
    }

    pub fn open_settings_panel(&mut self) {
        self.panel = Some(SettingsPanel::from_settings(self.context.settings.settings()));
    }

    pub fn close_settings_panel(&mut self) {
        self.panel = None;
    }

    /// A checkbox toggled inside the settings dialog.
    pub fn panel_flag_changed(&mut self, key: &str, value: bool) -> Vec<Surface> {
        let change = self
            .panel
            .as_mut()
            .and_then(|panel| panel.user_toggle(key, value));
        match change {
            Some(change) => self.apply_flag_change(change),
            None => Vec::new(),
        }
    }

    /// Finishes the new-project dialog: a fresh, unsaved project named `name`.
    /// A non-blank `description` is kept in the document's `data`.
    pub fn create_project(&mut self, name: &str, description: &str) {
        self.context.project.new_project();
        self.context.project.rename(name);
        let mut document = ProjectDocument::new(self.context.project.state().name.clone());
        let description = description.trim();
        if !description.is_empty() {
            if let Value::Object(data) = &mut document.data {
                data.insert(DESCRIPTION_KEY.to_string(), Value::String(description.to_string()));
            }
        }
        self.context.document = document;
        tracing::info!(project = %self.context.project.state().name, "created project");
    }

    /// Marks the project dirty after an edit made outside the menu.
    pub fn mark_modified(&mut self) {
        if !self.context.project.has_unsaved_changes() {
            self.context.project.set_modified(true);
        }
    }

    /// Switches the UI language and rebuilds the whole menu. Unknown codes are ignored.
    pub fn set_language(&mut self, code: &str) -> bool {
        if !self.context.localization.set_active_language(code) {
            tracing::warn!(code, "unknown language");
            return false;
        }
        self.context.settings.set(KEY_LANGUAGE, code);
        self.context.settings.save_logged();
        self.rebuild_menu();
        tracing::info!(code, "language changed");
        true
    }

    /// Cycles to the next available language (ru <-> en with the shipped catalog).
    pub fn toggle_language(&mut self) -> bool {
        let next = {
            let languages = self.context.localization.languages();
            let active = self.context.localization.active_language();
            let position = languages.iter().position(|code| *code == active);
            match position {
                Some(index) => languages.get((index + 1) % languages.len()).map(|c| c.to_string()),
                None => languages.first().map(|c| c.to_string()),
            }
        };
        match next {
            Some(code) => self.set_language(&code),
            None => false,
        }
    }

    /// Re-derives colors and icons for the active theme. Structure and ids are kept.
    pub fn refresh_theme(&mut self) {
        let kind = self.context.theme.kind();
        let icons = &self.icons;
        self.menu.refresh_colors(&self.context.theme);
        self.menu
            .refresh_icons(&|name: &str| icons.resolve(name, kind));
        self.window_style = WindowStyle::from_theme(&self.context.theme);
        self.menu
            .set_checked(ids::LIGHT_THEME, self.context.theme.is_light());
    }

    /// Regenerates only the recent-projects entries.
    pub fn refresh_recent(&mut self) {
        let recent = self.context.recent.list();
        let kind = self.context.theme.kind();
        let icons = &self.icons;
        let translate = self.context.localization.translator();
        self.menu
            .rebuild_recent(&recent, &translate, &|name: &str| icons.resolve(name, kind));
    }

    /// Tears down and rebuilds the live menu, then re-syncs checkboxes with the settings.
    pub fn rebuild_menu(&mut self) {
        let recent = self.context.recent.list();
        let kind = self.context.theme.kind();
        self.menu = {
            let icons = &self.icons;
            let translate = self.context.localization.translator();
            builder::build(
                &self.tree,
                &translate,
                &|name: &str| icons.resolve(name, kind),
                &recent,
            )
        };
        for binding in sync::FLAG_BINDINGS {
            let value = self.context.settings.flag(binding.setting_key);
            self.menu.set_checked(binding.menu_id, value);
        }
        self.refresh_theme();
    }

    fn run(
        &mut self,
        handler: ActionHandler,
        event: &MenuEvent,
        services: &mut dyn ShellServices,
    ) -> Dispatch {
        match handler(&mut self.context, services, event) {
            Ok(outcome) => {
                self.apply_outcome(outcome, services);
                Dispatch::Handled
            }
            Err(err) => {
                tracing::error!(?event, %err, "menu action failed");
                // A save made by the unsaved-changes prompt may have landed before the failure.
                self.refresh_recent();
                Dispatch::Unhandled
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome, services: &mut dyn ShellServices) {
        match outcome {
            ActionOutcome::Done | ActionOutcome::Aborted => {}
            ActionOutcome::RecentChanged => self.refresh_recent(),
            ActionOutcome::ThemeChanged => {
                self.refresh_theme();
                services.theme_changed();
            }
            ActionOutcome::Route(id) => {
                self.route(id, services);
            }
        }
    }

    fn route(&mut self, id: &str, services: &mut dyn ShellServices) -> Dispatch {
        if !self.router.dispatch(id, services) {
            tracing::debug!(id, "unhandled menu action");
            return Dispatch::Unhandled;
        }
        if self.router.route(id).map(|route| route.kind) == Some(WindowKind::Settings) {
            self.open_settings_panel();
        }
        Dispatch::Handled
    }
}
