use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Role -> value pairs for one UI element (e.g. `background`, `hover`).
pub type ColorRoles = BTreeMap<String, String>;
/// Element -> roles for one theme.
pub type ColorScheme = BTreeMap<String, ColorRoles>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        parse_hex(input)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("missing leading '#'")]
    MissingHashPrefix,
    #[error("expected 6 or 8 hexadecimal digits")]
    InvalidLength,
    #[error("contains non-hexadecimal digits")]
    InvalidHex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

impl ThemeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    pub fn is_light(self) -> bool {
        matches!(self, ThemeKind::Light)
    }

    pub fn from_light_flag(is_light: bool) -> Self {
        if is_light {
            ThemeKind::Light
        } else {
            ThemeKind::Dark
        }
    }

    fn icon_folder(self) -> &'static str {
        match self {
            ThemeKind::Light => "light_theme",
            ThemeKind::Dark => "dark_theme",
        }
    }
}

impl FromStr for ThemeKind {
    type Err = ThemeLoadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(ThemeKind::Light),
            "dark" => Ok(ThemeKind::Dark),
            other => Err(ThemeLoadError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to parse color schemes: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid theme kind '{0}'")]
    InvalidKind(String),
}

/// Color schemes keyed by theme name plus the active light/dark selection.
/// （以主題名稱為鍵的配色表，並記錄目前的亮/暗選擇。）
#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    schemes: BTreeMap<String, ColorScheme>,
    active: ThemeKind,
}

impl ThemeStore {
    pub fn from_json_str(input: &str) -> Result<Self, ThemeLoadError> {
        let schemes: BTreeMap<String, ColorScheme> = serde_json::from_str(input)?;
        Ok(Self {
            schemes,
            active: ThemeKind::default(),
        })
    }

    pub fn kind(&self) -> ThemeKind {
        self.active
    }

    pub fn is_light(&self) -> bool {
        self.active.is_light()
    }

    pub fn set_kind(&mut self, kind: ThemeKind) {
        self.active = kind;
    }

    pub fn set_light(&mut self, is_light: bool) {
        self.active = ThemeKind::from_light_flag(is_light);
    }

    /// All roles configured for `element` in the active theme.
    pub fn colors(&self, element: &str) -> Option<&ColorRoles> {
        self.schemes
            .get(self.active.as_str())
            .and_then(|scheme| scheme.get(element))
    }

    pub fn color(&self, element: &str, role: &str) -> Option<&str> {
        self.colors(element)
            .and_then(|roles| roles.get(role))
            .map(String::as_str)
    }

    /// Parsed color for `element.role`, or `fallback` when missing or malformed.
    /// （取得解析後的顏色；缺少或格式錯誤時回傳 `fallback`。）
    pub fn color_or(&self, element: &str, role: &str, fallback: Color) -> Color {
        match self.color(element, role) {
            Some(value) => match Color::from_hex(value) {
                Ok(color) => color,
                Err(err) => {
                    tracing::warn!(element, role, value, %err, "ignoring malformed theme color");
                    fallback
                }
            },
            None => fallback,
        }
    }
}

/// Theme-aware lookup of menu icon files.
/// （依主題查找選單圖示檔案。）
#[derive(Debug, Clone)]
pub struct IconLibrary {
    base: PathBuf,
}

impl IconLibrary {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Light theme icons fall back to the dark set; `None` when neither exists.
    pub fn resolve(&self, name: &str, kind: ThemeKind) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let themed = self.base.join(kind.icon_folder()).join(name);
        if themed.is_file() {
            return Some(themed);
        }
        if kind.is_light() {
            let dark = self.base.join(ThemeKind::Dark.icon_folder()).join(name);
            if dark.is_file() {
                return Some(dark);
            }
        }
        None
    }
}

fn parse_hex(input: &str) -> Result<Color, ColorParseError> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix('#')
        .ok_or(ColorParseError::MissingHashPrefix)?;
    if hex.len() != 6 && hex.len() != 8 {
        return Err(ColorParseError::InvalidLength);
    }
    let mut rgba = [0u8, 0, 0, 255];
    for (i, slot) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
        let start = i * 2;
        let slice = hex.get(start..start + 2).ok_or(ColorParseError::InvalidHex)?;
        *slot = u8::from_str_radix(slice, 16).map_err(|_| ColorParseError::InvalidHex)?;
    }
    Ok(Color {
        r: rgba[0],
        g: rgba[1],
        b: rgba[2],
        a: rgba[3],
    })
}
