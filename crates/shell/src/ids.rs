//! Menu ids the shell handles itself. Everything else is forwarded to the window router.

pub const NEW: &str = "top_bar_submenu_New";
pub const OPEN: &str = "top_bar_submenu_Open";
pub const OPEN_RECENT: &str = "top_bar_submenu_OpenRecent";
pub const CLEAR_RECENT: &str = "top_bar_submenu_ClearRecent";
pub const SAVE: &str = "top_bar_submenu_Save";
pub const SAVE_AS: &str = "top_bar_submenu_SaveAs";
pub const EXIT: &str = "top_bar_submenu_Exit";
pub const LIGHT_THEME: &str = "top_bar_submenu_Light_Theme";
pub const PREFERENCES: &str = "top_bar_submenu_Preferences";
pub const ABOUT: &str = "top_bar_submenu_About_App";
pub const AUTO_SAVE: &str = "top_bar_submenu_Auto_Save";
pub const SHOW_GRID: &str = "top_bar_submenu_Show_Grid";
pub const SNAP_TO_GRID: &str = "top_bar_submenu_Snap_To_Grid";

/// Localization key of the disabled placeholder shown when there is no history.
pub const NO_RECENT_PROJECTS: &str = "menu_no_recent_projects";
/// Icon used for every entry of the recent-projects sub-list.
pub const RECENT_PROJECT_ICON: &str = "OpenRecent.png";
