use std::collections::HashMap;

use thiserror::Error;

use crate::ids;

/// Auxiliary windows the shell can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Settings,
    About,
    NewProject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRoute {
    pub kind: WindowKind,
    /// Initial inner size in logical points.
    pub size: [f32; 2],
}

impl WindowRoute {
    pub const fn new(kind: WindowKind, width: f32, height: f32) -> Self {
        Self {
            kind,
            size: [width, height],
        }
    }
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window {0:?} is not available")]
    Unavailable(WindowKind),
    #[error("failed to open window {kind:?}: {reason}")]
    Failed { kind: WindowKind, reason: String },
}

/// Opens windows on behalf of the router. Implemented by the GUI.
pub trait WindowHost {
    fn open_window(&mut self, route: WindowRoute) -> Result<(), WindowError>;
}

/// 視窗路由。 / Maps menu ids to the window each one opens.
#[derive(Debug, Clone, Default)]
pub struct WindowRouter {
    routes: HashMap<String, WindowRoute>,
}

impl WindowRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences, New project and About.
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();
        router.register(
            ids::PREFERENCES,
            WindowRoute::new(WindowKind::Settings, 600.0, 500.0),
        );
        router.register(ids::NEW, WindowRoute::new(WindowKind::NewProject, 400.0, 300.0));
        router.register(ids::ABOUT, WindowRoute::new(WindowKind::About, 480.0, 560.0));
        router
    }

    pub fn register(&mut self, id: impl Into<String>, route: WindowRoute) {
        self.routes.insert(id.into(), route);
    }

    pub fn route(&self, id: &str) -> Option<&WindowRoute> {
        self.routes.get(id)
    }

    /// Opens the window routed from `id`. Unknown ids and host failures report `false`;
    /// failures are logged here and never propagate further.
    pub fn dispatch<H>(&self, id: &str, host: &mut H) -> bool
    where
        H: WindowHost + ?Sized,
    {
        let Some(route) = self.routes.get(id) else {
            return false;
        };
        match host.open_window(*route) {
            Ok(()) => {
                tracing::debug!(id, kind = ?route.kind, "opened window");
                true
            }
            Err(err) => {
                tracing::error!(id, %err, "failed to open window");
                false
            }
        }
    }
}
