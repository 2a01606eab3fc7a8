//! Current-project bookkeeping for Parser Bot: state, window title, project files and the
//! unsaved-changes gate.
//! 專案狀態、視窗標題、專案檔與未儲存變更的把關。

pub mod document;
pub mod gate;
pub mod state;
pub mod title;

pub use document::{ProjectDocument, ProjectError, PROJECT_FORMAT_VERSION};
pub use gate::{guard_destructive_action, Decision, SaveOutcome, UnsavedChangesHost, UserChoice};
pub use state::{ProjectState, UNTITLED};
pub use title::{format_title, ProjectTracker, TitleSink};
