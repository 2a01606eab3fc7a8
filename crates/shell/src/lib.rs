//! Menu-driven application shell for Parser Bot: menu model and builder, action dispatch,
//! window routing, settings sync and the project actions behind the File menu.
//! Parser Bot 的選單外殼。

pub mod actions;
pub mod builder;
pub mod context;
pub mod dispatch;
pub mod ids;
pub mod live;
pub mod model;
pub mod router;
pub mod shell;
pub mod style;
pub mod sync;

pub use builder::{build, ResolveIcon, Translate};
pub use context::{AppContext, AppPaths, ShellServices};
pub use dispatch::{ActionError, ActionHandler, ActionOutcome, ActionTable, Dispatch, MenuEvent};
pub use live::{Activation, ElementId, EntryTag, LiveElement, LiveKind, LiveMenu, Registry};
pub use model::{MenuConfigError, MenuGroup, MenuNode, MenuNodeKind, MenuTree};
pub use router::{WindowError, WindowHost, WindowKind, WindowRoute, WindowRouter};
pub use shell::{Shell, StartupError};
pub use style::{MenuStyle, WindowStyle};
pub use sync::{FlagBinding, FlagChange, SettingsPanel, Surface, FLAG_BINDINGS};
