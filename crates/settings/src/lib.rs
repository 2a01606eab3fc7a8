//! Persisted per-user state and bundled assets for Parser Bot.
//! Parser Bot 的使用者設定、最近專案與內建資源。

pub mod localization;
pub mod preferences;
pub mod recent;
pub mod resources;
pub mod storage;
pub mod theme;

pub use localization::{LocalizationError, LocalizationStore, DEFAULT_LANGUAGE};
pub use preferences::{
    AppSettings, SettingsError, SettingsStore, KEY_AUTO_SAVE, KEY_LANGUAGE, KEY_SHOW_GRID,
    KEY_SNAP_TO_GRID, KEY_THEME,
};
pub use recent::{RecentProjectEntry, RecentProjects, MAX_RECENT_PROJECTS};
pub use resources::{
    ResourceError, ResourceLoader, COLOR_SCHEMES_FILE, LOCALIZATION_FILE, MENU_CONFIG_FILE,
};
pub use storage::RecentProjectsStore;
pub use theme::{
    Color, ColorParseError, ColorRoles, ColorScheme, IconLibrary, ThemeKind, ThemeLoadError,
    ThemeStore,
};
