use std::fs;
use std::path::{Path, PathBuf};

use parserbot_project::UserChoice;
use parserbot_settings::{
    Color, IconLibrary, LocalizationStore, RecentProjectsStore, SettingsStore, ThemeStore,
    DEFAULT_LANGUAGE, KEY_AUTO_SAVE, KEY_SHOW_GRID,
};
use parserbot_shell::ids;
use parserbot_shell::live::recent_paths;
use parserbot_shell::{
    AppContext, Dispatch, FlagChange, MenuEvent, MenuTree, Shell, ShellServices, Surface,
    WindowError, WindowHost, WindowKind, WindowRoute,
};
use tempfile::{tempdir, TempDir};

const MENU: &str = r#"{
    "menus": [
        { "name": "File", "id": "top_bar_File", "items": [
            { "id": "top_bar_submenu_New", "type": "button", "icon": "New.png" },
            { "id": "top_bar_submenu_Open", "type": "button", "icon": "Open.png" },
            { "id": "top_bar_submenu_OpenRecent", "type": "menu", "icon": "OpenRecent.png", "items": [] },
            { "id": "top_bar_submenu_Save", "type": "button" },
            { "id": "top_bar_submenu_SaveAs", "type": "button" },
            { "type": "separator" },
            { "id": "top_bar_submenu_Exit", "type": "button" }
        ]},
        { "name": "View", "id": "top_bar_View", "items": [
            { "id": "top_bar_submenu_Light_Theme", "type": "checkbox" },
            { "id": "top_bar_submenu_Show_Grid", "type": "checkbox", "default": true },
            { "id": "top_bar_submenu_Snap_To_Grid", "type": "checkbox", "default": true }
        ]},
        { "name": "Settings", "id": "top_bar_Settings", "items": [
            { "id": "top_bar_submenu_Auto_Save", "type": "checkbox", "default": true },
            { "id": "top_bar_submenu_Preferences", "type": "button" }
        ]},
        { "name": "Help", "id": "top_bar_Help", "items": [
            { "id": "top_bar_submenu_About_App", "type": "button" },
            { "id": "top_bar_submenu_Check_Updates", "type": "button" }
        ]}
    ]
}"#;

const LOCALIZATION: &str = r#"{
    "ru": { "top_bar_File": "Файл", "menu_no_recent_projects": "Нет недавних проектов" },
    "en": { "top_bar_File": "File", "menu_no_recent_projects": "No recent projects" }
}"#;

const SCHEMES: &str = r##"{
    "light": { "top_menu_bar": { "background": "#F0F0F0" }, "main_window": { "background": "#FFFFFF" } },
    "dark": { "top_menu_bar": { "background": "#2D2D30" }, "main_window": { "background": "#1E1E1E" } }
}"##;

const APP: &str = "App";

struct Fixture {
    dir: TempDir,
    shell: Shell,
}

impl Fixture {
    fn projects(&self) -> PathBuf {
        self.dir.path().join("projects")
    }

    fn settings_file(&self) -> PathBuf {
        self.dir.path().join("config").join("app_settings.json")
    }

    fn project_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.projects().join(name);
        fs::write(&path, contents).expect("write project");
        path
    }
}

fn fixture() -> Fixture {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config");
    let projects = dir.path().join("projects");
    fs::create_dir_all(&projects).expect("projects dir");
    for theme in ["dark_theme", "light_theme"] {
        let folder = dir.path().join("icons").join(theme);
        fs::create_dir_all(&folder).expect("icon dir");
        fs::write(folder.join("Open.png"), b"png").expect("icon");
    }

    let context = AppContext::new(
        SettingsStore::load_or_default(config.join("app_settings.json")),
        LocalizationStore::from_json_str(LOCALIZATION, DEFAULT_LANGUAGE).expect("localization"),
        ThemeStore::from_json_str(SCHEMES).expect("schemes"),
        RecentProjectsStore::new(config.join("recent_projects.json")),
        &projects,
        APP,
    );
    let tree = MenuTree::from_json_str(MENU).expect("menu");
    let shell = Shell::new(context, tree, IconLibrary::new(dir.path().join("icons")));
    Fixture { dir, shell }
}

#[derive(Default)]
struct FakeServices {
    choice: Option<UserChoice>,
    save_path: Option<PathBuf>,
    open_path: Option<PathBuf>,
    fail_windows: bool,
    prompts: usize,
    open_requests: usize,
    windows: Vec<WindowKind>,
    exit_requested: bool,
    theme_changes: usize,
}

impl WindowHost for FakeServices {
    fn open_window(&mut self, route: WindowRoute) -> Result<(), WindowError> {
        if self.fail_windows {
            return Err(WindowError::Failed {
                kind: route.kind,
                reason: "no display".into(),
            });
        }
        self.windows.push(route.kind);
        Ok(())
    }
}

impl ShellServices for FakeServices {
    fn pick_save_path(&mut self, _directory: &Path, _file_name: &str) -> Option<PathBuf> {
        self.save_path.clone()
    }

    fn pick_open_path(&mut self, _directory: &Path) -> Option<PathBuf> {
        self.open_requests += 1;
        self.open_path.clone()
    }

    fn ask_unsaved_changes(&mut self) -> UserChoice {
        self.prompts += 1;
        self.choice.unwrap_or(UserChoice::Cancel)
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn theme_changed(&mut self) {
        self.theme_changes += 1;
    }
}

fn recent_labels(shell: &Shell) -> Vec<String> {
    let menu = shell.menu();
    let submenu = menu.submenus().get(ids::OPEN_RECENT).expect("open recent");
    menu.children(submenu)
        .iter()
        .filter_map(|child| menu.element(*child))
        .map(|element| element.label.clone())
        .collect()
}

#[test]
fn build_creates_one_element_per_node_plus_recent_placeholder() {
    let fx = fixture();
    let menu = fx.shell.menu();
    // 4 groups + 14 configured nodes + the "no recent projects" placeholder.
    assert_eq!(menu.len(), 19);
    assert_eq!(menu.actions().len(), 8);
    assert_eq!(menu.checkboxes().len(), 4);
    assert_eq!(menu.submenus().len(), 5);
    assert_eq!(recent_labels(&fx.shell), vec!["Нет недавних проектов"]);
}

#[test]
fn recent_entries_are_rebuilt_in_place() {
    let mut fx = fixture();
    let alpha = fx.project_file("alpha.json", "{}");
    let beta = fx.project_file("beta.json", "{}");
    let save_before = fx.shell.menu().actions().get(ids::SAVE).expect("save");
    let count_before = fx.shell.menu().len();

    fx.shell.context().recent.add(&alpha);
    fx.shell.context().recent.add(&beta);
    fx.shell.refresh_recent();

    assert_eq!(recent_labels(&fx.shell), vec!["beta", "alpha"]);
    let menu = fx.shell.menu();
    let submenu = menu.submenus().get(ids::OPEN_RECENT).expect("open recent");
    assert_eq!(
        recent_paths(menu, submenu),
        vec![beta.as_path(), alpha.as_path()]
    );
    assert_eq!(menu.actions().get(ids::SAVE), Some(save_before));
    assert!(menu.element(save_before).is_some());
    assert_eq!(menu.len(), count_before + 1);
}

#[test]
fn refresh_theme_is_idempotent() {
    let mut fx = fixture();
    fx.shell.refresh_theme();
    let style = *fx.shell.menu().style();
    let window = fx.shell.window_style();
    fx.shell.refresh_theme();
    assert_eq!(*fx.shell.menu().style(), style);
    assert_eq!(fx.shell.window_style(), window);
    assert_eq!(style.bar_background, Color::rgb(0x2D, 0x2D, 0x30));
}

#[test]
fn light_theme_toggle_restyles_without_rebuilding() {
    let mut fx = fixture();
    let mut services = FakeServices::default();
    let open = fx.shell.menu().actions().get(ids::OPEN).expect("open");
    let toggle = fx
        .shell
        .menu()
        .checkboxes()
        .get(ids::LIGHT_THEME)
        .expect("theme checkbox");
    let dark_icon = fx.dir.path().join("icons/dark_theme/Open.png");
    assert_eq!(
        fx.shell.menu().element(open).and_then(|e| e.icon.clone()),
        Some(dark_icon)
    );

    assert_eq!(fx.shell.activate(toggle, &mut services), Dispatch::Handled);

    assert!(fx.shell.context().theme.is_light());
    assert_eq!(services.theme_changes, 1);
    assert_eq!(
        fx.shell.menu().style().bar_background,
        Color::rgb(0xF0, 0xF0, 0xF0)
    );
    assert_eq!(
        fx.shell.menu().element(open).and_then(|e| e.icon.clone()),
        Some(fx.dir.path().join("icons/light_theme/Open.png"))
    );
    assert_eq!(fx.shell.menu().actions().get(ids::OPEN), Some(open));
    let persisted = fs::read_to_string(fx.settings_file()).expect("settings saved");
    assert!(persisted.contains("\"light\""));
}

#[test]
fn language_switch_rebuilds_labels() {
    let mut fx = fixture();
    let root = fx.shell.menu().roots()[0];
    assert_eq!(fx.shell.menu().element(root).map(|e| e.label.as_str()), Some("Файл"));

    assert!(fx.shell.set_language("en"));
    let root = fx.shell.menu().roots()[0];
    assert_eq!(fx.shell.menu().element(root).map(|e| e.label.as_str()), Some("File"));
    assert_eq!(recent_labels(&fx.shell), vec!["No recent projects"]);
    assert_eq!(fx.shell.context().settings.settings().language(), "en");

    assert!(!fx.shell.set_language("de"));
    assert!(fx.shell.toggle_language());
    assert_eq!(fx.shell.context().localization.active_language(), "ru");
}

#[test]
fn unknown_ids_are_dropped() {
    let mut fx = fixture();
    let mut services = FakeServices::default();
    let outcome = fx
        .shell
        .dispatch(MenuEvent::button("top_bar_submenu_Check_Updates"), &mut services);
    assert_eq!(outcome, Dispatch::Unhandled);
    assert!(services.windows.is_empty());
}

#[test]
fn routed_windows_open_and_failures_are_not_handled() {
    let mut fx = fixture();
    let mut services = FakeServices::default();
    assert_eq!(
        fx.shell.dispatch(MenuEvent::button(ids::ABOUT), &mut services),
        Dispatch::Handled
    );
    assert_eq!(services.windows, vec![WindowKind::About]);
    assert!(fx.shell.panel().is_none());

    let mut broken = FakeServices {
        fail_windows: true,
        ..FakeServices::default()
    };
    assert_eq!(
        fx.shell.dispatch(MenuEvent::button(ids::PREFERENCES), &mut broken),
        Dispatch::Unhandled
    );
    assert!(fx.shell.panel().is_none());
}

#[test]
fn menu_and_panel_checkboxes_stay_in_sync() {
    let mut fx = fixture();
    let mut services = FakeServices::default();
    fx.shell
        .dispatch(MenuEvent::button(ids::PREFERENCES), &mut services);
    assert_eq!(services.windows, vec![WindowKind::Settings]);
    assert_eq!(fx.shell.panel().and_then(|p| p.get(KEY_AUTO_SAVE)), Some(true));

    let auto_save = fx
        .shell
        .menu()
        .checkboxes()
        .get(ids::AUTO_SAVE)
        .expect("auto save checkbox");
    assert_eq!(fx.shell.activate(auto_save, &mut services), Dispatch::Handled);
    assert_eq!(fx.shell.menu().is_checked(ids::AUTO_SAVE), Some(false));
    assert_eq!(fx.shell.panel().and_then(|p| p.get(KEY_AUTO_SAVE)), Some(false));
    assert!(!fx.shell.context().settings.flag(KEY_AUTO_SAVE));

    let pushed = fx.shell.panel_flag_changed(KEY_SHOW_GRID, false);
    assert_eq!(pushed, vec![Surface::Menu]);
    assert_eq!(fx.shell.menu().is_checked(ids::SHOW_GRID), Some(false));
    assert_eq!(fx.shell.panel().and_then(|p| p.get(KEY_SHOW_GRID)), Some(false));

    let pushed = fx.shell.apply_flag_change(FlagChange {
        key: KEY_SHOW_GRID,
        value: true,
        origin: Surface::Menu,
    });
    assert_eq!(pushed, vec![Surface::SettingsPanel]);

    fx.shell.close_settings_panel();
    assert!(fx.shell.panel_flag_changed(KEY_SHOW_GRID, false).is_empty());
}

#[test]
fn new_project_is_gated() {
    let mut fx = fixture();
    let mut cancel = FakeServices::default();
    fx.shell.dispatch(MenuEvent::button(ids::NEW), &mut cancel);
    assert_eq!(cancel.prompts, 1);
    assert!(cancel.windows.is_empty());

    let mut discard = FakeServices {
        choice: Some(UserChoice::Discard),
        ..FakeServices::default()
    };
    fx.shell.dispatch(MenuEvent::button(ids::NEW), &mut discard);
    assert_eq!(discard.windows, vec![WindowKind::NewProject]);

    fx.shell.create_project("demo", "");
    assert_eq!(fx.shell.context().project.title(), "* demo - App");
    assert!(fx.shell.context().document.data.get("description").is_none());

    fx.shell.create_project("  ", "  scrapes prices ");
    assert_eq!(fx.shell.context().project.title(), "* untitled - App");
    assert_eq!(
        fx.shell.context().document.data.get("description").and_then(|v| v.as_str()),
        Some("scrapes prices")
    );
}

#[test]
fn cancelled_save_as_inside_the_gate_aborts_open() {
    let mut fx = fixture();
    let target = fx.project_file("target.json", r#"{"name":"target"}"#);
    let mut services = FakeServices {
        choice: Some(UserChoice::Save),
        save_path: None,
        open_path: Some(target),
        ..FakeServices::default()
    };
    fx.shell.dispatch(MenuEvent::button(ids::OPEN), &mut services);

    assert_eq!(services.prompts, 1);
    assert_eq!(services.open_requests, 0);
    let state = fx.shell.context().project.state();
    assert!(state.modified);
    assert!(state.path.is_none());
}

#[test]
fn save_then_open_recent_after_discarding() {
    let mut fx = fixture();
    let mut services = FakeServices {
        save_path: Some(fx.projects().join("demo")),
        ..FakeServices::default()
    };
    fx.shell.create_project("demo", "");
    assert_eq!(
        fx.shell.dispatch(MenuEvent::button(ids::SAVE), &mut services),
        Dispatch::Handled
    );
    let saved = fx.projects().join("demo.json");
    assert!(saved.is_file());
    assert_eq!(
        fx.shell.context().project.title(),
        format!("demo - {} - App", fx.projects().display())
    );
    assert_eq!(recent_labels(&fx.shell), vec!["demo"]);

    let other = fx.project_file("other.json", r#"{"name":"other","data":{"nodes":[]}}"#);
    fx.shell.mark_modified();
    let mut discard = FakeServices {
        choice: Some(UserChoice::Discard),
        ..FakeServices::default()
    };
    assert_eq!(
        fx.shell.dispatch(MenuEvent::OpenRecent(other.clone()), &mut discard),
        Dispatch::Handled
    );
    assert_eq!(discard.prompts, 1);
    let state = fx.shell.context().project.state();
    assert_eq!(state.name, "other");
    assert!(!state.modified);
    assert_eq!(recent_labels(&fx.shell), vec!["other", "demo"]);
    assert!(fx.shell.context().document.data.get("nodes").is_some());
}

#[test]
fn failed_open_is_reported_as_not_handled() {
    let mut fx = fixture();
    let mut services = FakeServices {
        choice: Some(UserChoice::Discard),
        ..FakeServices::default()
    };
    let broken = fx.project_file("broken.json", "{ not json");
    assert_eq!(
        fx.shell.dispatch(MenuEvent::OpenRecent(broken), &mut services),
        Dispatch::Unhandled
    );
    assert!(fx.shell.context().project.state().path.is_none());
}

#[test]
fn exit_is_not_gated() {
    let mut fx = fixture();
    let mut services = FakeServices::default();
    fx.shell.dispatch(MenuEvent::button(ids::EXIT), &mut services);
    assert!(services.exit_requested);
    assert_eq!(services.prompts, 0);
}

#[test]
fn recent_list_follows_a_prompt_save_even_when_the_open_fails() {
    let mut fx = fixture();
    fx.shell.create_project("kept", "");
    let broken = fx.project_file("broken.json", "{ not json");
    let mut services = FakeServices {
        choice: Some(UserChoice::Save),
        save_path: Some(fx.projects().join("kept")),
        ..FakeServices::default()
    };

    assert_eq!(
        fx.shell.dispatch(MenuEvent::OpenRecent(broken), &mut services),
        Dispatch::Unhandled
    );
    assert_eq!(services.prompts, 1);
    assert!(fx.projects().join("kept.json").is_file());
    assert_eq!(recent_labels(&fx.shell), vec!["kept"]);
    let state = fx.shell.context().project.state();
    assert_eq!(state.name, "kept");
    assert!(!state.modified);
}

#[test]
fn clear_recent_empties_the_submenu() {
    let mut fx = fixture();
    let alpha = fx.project_file("alpha.json", "{}");
    fx.shell.context().recent.add(&alpha);
    fx.shell.refresh_recent();
    assert_eq!(recent_labels(&fx.shell), vec!["alpha"]);

    let mut services = FakeServices::default();
    assert_eq!(
        fx.shell.dispatch(MenuEvent::button(ids::CLEAR_RECENT), &mut services),
        Dispatch::Handled
    );
    assert_eq!(services.prompts, 0);
    assert!(fx.shell.context().recent.list().is_empty());
    assert_eq!(recent_labels(&fx.shell), vec!["Нет недавних проектов"]);
}
