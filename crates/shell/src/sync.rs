use std::collections::BTreeMap;

use parserbot_settings::{AppSettings, KEY_AUTO_SAVE, KEY_SHOW_GRID, KEY_SNAP_TO_GRID};

use crate::ids;

/// A UI surface that mirrors checkbox-backed settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Menu,
    SettingsPanel,
}

/// Ties a boolean setting to the menu checkbox showing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagBinding {
    pub setting_key: &'static str,
    pub menu_id: &'static str,
}

pub const FLAG_BINDINGS: &[FlagBinding] = &[
    FlagBinding {
        setting_key: KEY_AUTO_SAVE,
        menu_id: ids::AUTO_SAVE,
    },
    FlagBinding {
        setting_key: KEY_SHOW_GRID,
        menu_id: ids::SHOW_GRID,
    },
    FlagBinding {
        setting_key: KEY_SNAP_TO_GRID,
        menu_id: ids::SNAP_TO_GRID,
    },
];

pub fn binding_for_menu_id(id: &str) -> Option<&'static FlagBinding> {
    FLAG_BINDINGS.iter().find(|binding| binding.menu_id == id)
}

pub fn binding_for_key(key: &str) -> Option<&'static FlagBinding> {
    FLAG_BINDINGS.iter().find(|binding| binding.setting_key == key)
}

/// A user toggle on one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagChange {
    pub key: &'static str,
    pub value: bool,
    pub origin: Surface,
}

/// 設定對話框的核取方塊狀態。 / Checkbox state of the open settings dialog.
///
/// Only exists while the dialog is open. Programmatic writes go through
/// [`SettingsPanel::set_silently`] and never produce a [`FlagChange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPanel {
    flags: BTreeMap<&'static str, bool>,
}

impl SettingsPanel {
    pub fn from_settings(settings: &AppSettings) -> Self {
        let flags = FLAG_BINDINGS
            .iter()
            .map(|binding| (binding.setting_key, settings.flag(binding.setting_key)))
            .collect();
        Self { flags }
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    pub fn flags(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.flags.iter().map(|(key, value)| (*key, *value))
    }

    /// Mirrors a value set elsewhere. Returns `false` for unknown keys.
    pub fn set_silently(&mut self, key: &str, value: bool) -> bool {
        match self.flags.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The user clicked a checkbox in the dialog.
    pub fn user_toggle(&mut self, key: &str, value: bool) -> Option<FlagChange> {
        let binding = binding_for_key(key)?;
        self.set_silently(binding.setting_key, value);
        Some(FlagChange {
            key: binding.setting_key,
            value,
            origin: Surface::SettingsPanel,
        })
    }
}
