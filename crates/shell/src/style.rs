use parserbot_settings::{Color, ThemeStore};

use crate::live::LiveMenu;

const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
const BAR_GREY: Color = Color::rgb(0xF0, 0xF0, 0xF0);
const HOVER_BLUE: Color = Color::rgb(0xE5, 0xF3, 0xFF);
const CLICK_BLUE: Color = Color::rgb(0xCC, 0xE8, 0xFF);
const BORDER_GREY: Color = Color::rgb(0xCC, 0xCC, 0xCC);

/// Resolved colors for the menu bar and its drop-downs.
/// （選單列與下拉選單的配色。）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyle {
    pub bar_background: Color,
    pub bar_text: Color,
    pub bar_hover: Color,
    pub bar_click: Color,
    pub submenu_background: Color,
    pub submenu_border: Color,
    pub item_text: Color,
    pub item_hover: Color,
    pub item_click: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            bar_background: BAR_GREY,
            bar_text: BLACK,
            bar_hover: HOVER_BLUE,
            bar_click: CLICK_BLUE,
            submenu_background: WHITE,
            submenu_border: BORDER_GREY,
            item_text: BLACK,
            item_hover: HOVER_BLUE,
            item_click: CLICK_BLUE,
        }
    }
}

impl MenuStyle {
    /// Reads `top_menu_bar`, `submenu_container` and `submenu_button` from the active theme.
    pub fn from_theme(theme: &ThemeStore) -> Self {
        let fallback = Self::default();
        Self {
            bar_background: theme.color_or("top_menu_bar", "background", fallback.bar_background),
            bar_text: theme.color_or("top_menu_bar", "text", fallback.bar_text),
            bar_hover: theme.color_or("top_menu_bar", "hover", fallback.bar_hover),
            bar_click: theme.color_or("top_menu_bar", "click", fallback.bar_click),
            submenu_background: theme.color_or(
                "submenu_container",
                "background",
                fallback.submenu_background,
            ),
            submenu_border: theme.color_or("submenu_container", "border", fallback.submenu_border),
            item_text: theme.color_or("submenu_button", "text", fallback.item_text),
            item_hover: theme.color_or("submenu_button", "hover", fallback.item_hover),
            item_click: theme.color_or("submenu_button", "click", fallback.item_click),
        }
    }
}

/// Main window colors (`main_window` element).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStyle {
    pub background: Color,
    pub text: Color,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            background: WHITE,
            text: BLACK,
        }
    }
}

impl WindowStyle {
    pub fn from_theme(theme: &ThemeStore) -> Self {
        Self {
            background: theme.color_or("main_window", "background", WHITE),
            text: theme.color_or("main_window", "text", BLACK),
        }
    }
}

impl LiveMenu {
    /// Re-derives every menu color from `theme`. Structure and registries are untouched.
    pub fn refresh_colors(&mut self, theme: &ThemeStore) {
        self.style = MenuStyle::from_theme(theme);
    }
}
