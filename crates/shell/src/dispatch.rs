use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use parserbot_project::ProjectError;
use parserbot_settings::SettingsError;
use thiserror::Error;

use crate::context::{AppContext, ShellServices};

/// An activated menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// A configured button or checkbox. `checked` carries the checkbox's new state.
    Item { id: String, checked: Option<bool> },
    /// A generated recent-projects entry.
    OpenRecent(PathBuf),
}

impl MenuEvent {
    pub fn button(id: impl Into<String>) -> Self {
        MenuEvent::Item {
            id: id.into(),
            checked: None,
        }
    }

    pub fn checkbox(id: impl Into<String>, checked: bool) -> Self {
        MenuEvent::Item {
            id: id.into(),
            checked: Some(checked),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            MenuEvent::Item { id, .. } => Some(id),
            MenuEvent::OpenRecent(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Unhandled,
}

impl Dispatch {
    pub fn is_handled(self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}

/// Follow-up work a handler asks the shell to do once it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The dirty-state gate or a file picker stopped the action.
    Aborted,
    RecentChanged,
    ThemeChanged,
    /// Forward this id to the window router.
    Route(&'static str),
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type ActionHandler =
    fn(&mut AppContext, &mut dyn ShellServices, &MenuEvent) -> Result<ActionOutcome, ActionError>;

/// 選單動作註冊表。 / Menu id -> handler table, filled once at startup.
#[derive(Clone, Default)]
pub struct ActionTable {
    handlers: HashMap<String, ActionHandler>,
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ActionTable").field("ids", &ids).finish()
    }
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `id`, returning the handler it replaced.
    pub fn register(&mut self, id: impl Into<String>, handler: ActionHandler) -> Option<ActionHandler> {
        self.handlers.insert(id.into(), handler)
    }

    pub fn get(&self, id: &str) -> Option<ActionHandler> {
        self.handlers.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
