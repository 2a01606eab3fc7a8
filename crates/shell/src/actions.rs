//! Built-in menu actions: project lifecycle, exit and the light-theme toggle.
//! 內建選單動作。

use std::path::{Path, PathBuf};

use parserbot_project::{
    guard_destructive_action, Decision, ProjectDocument, SaveOutcome, UnsavedChangesHost,
    UserChoice,
};
use parserbot_settings::KEY_THEME;

use crate::context::{AppContext, ShellServices};
use crate::dispatch::{ActionError, ActionOutcome, ActionTable, MenuEvent};
use crate::ids;

const PROJECT_EXTENSION: &str = "json";

pub fn register_builtin_actions(table: &mut ActionTable) {
    table.register(ids::NEW, new_project);
    table.register(ids::OPEN, open_project);
    table.register(ids::CLEAR_RECENT, clear_recent);
    table.register(ids::SAVE, save_project);
    table.register(ids::SAVE_AS, save_project_as);
    table.register(ids::EXIT, exit);
    table.register(ids::LIGHT_THEME, toggle_light_theme);
}

/// Gate, then hand over to the new-project dialog.
fn new_project(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    let gate = run_gate(ctx, services);
    if gate.decision == Decision::Abort {
        return Ok(gate.aborted());
    }
    Ok(ActionOutcome::Route(ids::NEW))
}

fn open_project(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    let gate = run_gate(ctx, services);
    if gate.decision == Decision::Abort {
        return Ok(gate.aborted());
    }
    let Some(path) = services.pick_open_path(&ctx.picker_dir()) else {
        tracing::debug!("open cancelled");
        return Ok(gate.aborted());
    };
    open_path(ctx, &path)
}

/// Handler for a generated recent-projects entry.
pub fn open_recent(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    let MenuEvent::OpenRecent(path) = event else {
        return Ok(ActionOutcome::Aborted);
    };
    let gate = run_gate(ctx, services);
    if gate.decision == Decision::Abort {
        return Ok(gate.aborted());
    }
    open_path(ctx, path)
}

/// Forgets the whole history. The current project is untouched, so no gate.
fn clear_recent(
    ctx: &mut AppContext,
    _services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    ctx.recent.clear();
    tracing::info!("cleared recent projects");
    Ok(ActionOutcome::RecentChanged)
}

fn save_project(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    Ok(match save_current(ctx, services)? {
        SaveOutcome::Saved => ActionOutcome::RecentChanged,
        SaveOutcome::Cancelled | SaveOutcome::Failed => ActionOutcome::Aborted,
    })
}

fn save_project_as(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    Ok(match save_as(ctx, services)? {
        SaveOutcome::Saved => ActionOutcome::RecentChanged,
        SaveOutcome::Cancelled | SaveOutcome::Failed => ActionOutcome::Aborted,
    })
}

/// Exit is not gated; unsaved changes are dropped.
fn exit(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
    _event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    if ctx.project.has_unsaved_changes() {
        tracing::info!(project = %ctx.project.state().name, "exiting with unsaved changes");
    }
    services.request_exit();
    Ok(ActionOutcome::Done)
}

fn toggle_light_theme(
    ctx: &mut AppContext,
    _services: &mut dyn ShellServices,
    event: &MenuEvent,
) -> Result<ActionOutcome, ActionError> {
    let light = match event {
        MenuEvent::Item {
            checked: Some(checked),
            ..
        } => *checked,
        _ => !ctx.theme.is_light(),
    };
    ctx.theme.set_light(light);
    ctx.settings.set(KEY_THEME, ctx.theme.kind().as_str());
    ctx.settings.save_logged();
    tracing::info!(theme = ctx.theme.kind().as_str(), "theme changed");
    Ok(ActionOutcome::ThemeChanged)
}

/// Replaces the current project with the file at `path`.
pub fn open_path(ctx: &mut AppContext, path: &Path) -> Result<ActionOutcome, ActionError> {
    let document = ProjectDocument::read_from(path)?;
    ctx.document = document;
    ctx.project.open(path);
    ctx.recent.add(path);
    tracing::info!(path = %path.display(), "opened project");
    Ok(ActionOutcome::RecentChanged)
}

/// The explicit Save pathway: write to the current file, or ask for one.
pub fn save_current(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
) -> Result<SaveOutcome, ActionError> {
    match ctx.project.state().path.clone() {
        Some(path) => {
            write_project(ctx, &path)?;
            Ok(SaveOutcome::Saved)
        }
        None => save_as(ctx, services),
    }
}

fn save_as(
    ctx: &mut AppContext,
    services: &mut dyn ShellServices,
) -> Result<SaveOutcome, ActionError> {
    let file_name = format!("{}.{PROJECT_EXTENSION}", ctx.project.state().name);
    let Some(path) = services.pick_save_path(&ctx.picker_dir(), &file_name) else {
        tracing::debug!("save as cancelled");
        return Ok(SaveOutcome::Cancelled);
    };
    write_project(ctx, &with_project_extension(path))?;
    Ok(SaveOutcome::Saved)
}

fn write_project(ctx: &mut AppContext, path: &Path) -> Result<(), ActionError> {
    if let Some(stem) = path.file_stem() {
        ctx.document.name = stem.to_string_lossy().into_owned();
    }
    ctx.document.write_to(path)?;
    ctx.project.save(Some(path.to_path_buf()));
    ctx.recent.add(path);
    tracing::info!(path = %path.display(), "saved project");
    Ok(())
}

fn with_project_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(PROJECT_EXTENSION)
    }
}

struct GateResult {
    decision: Decision,
    /// The prompt's Save branch wrote the project, so the recent list changed.
    saved: bool,
}

impl GateResult {
    fn aborted(&self) -> ActionOutcome {
        if self.saved {
            ActionOutcome::RecentChanged
        } else {
            ActionOutcome::Aborted
        }
    }
}

struct GateHost<'a> {
    ctx: &'a mut AppContext,
    services: &'a mut dyn ShellServices,
    saved: bool,
}

impl UnsavedChangesHost for GateHost<'_> {
    fn ask_unsaved_changes(&mut self) -> UserChoice {
        self.services.ask_unsaved_changes()
    }

    fn save_current(&mut self) -> SaveOutcome {
        match save_current(self.ctx, &mut *self.services) {
            Ok(outcome) => {
                self.saved |= outcome == SaveOutcome::Saved;
                outcome
            }
            Err(err) => {
                tracing::error!(%err, "failed to save project");
                SaveOutcome::Failed
            }
        }
    }
}

fn run_gate(ctx: &mut AppContext, services: &mut dyn ShellServices) -> GateResult {
    let state = ctx.project.state().clone();
    let mut host = GateHost {
        ctx,
        services,
        saved: false,
    };
    let decision = guard_destructive_action(&state, &mut host);
    GateResult {
        decision,
        saved: host.saved,
    }
}
