use crate::state::ProjectState;

/// The user's answer to "save changes before continuing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    Save,
    Discard,
    Cancel,
}

/// Whether a project-replacing action may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// Result of running the regular save pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The user closed the file picker without choosing a location.
    Cancelled,
    Failed,
}

/// Collaborators the gate needs: the modal prompt and the explicit-save pathway.
/// （把關所需的協作者：模態提示與一般儲存流程。）
pub trait UnsavedChangesHost {
    /// Shows the Save / Discard / Cancel prompt and blocks until the user answers.
    fn ask_unsaved_changes(&mut self) -> UserChoice;
    /// Runs the same pathway as the Save menu action.
    fn save_current(&mut self) -> SaveOutcome;
}

/// Dirty-state gate in front of open / new.
///
/// Clean projects proceed without prompting. Otherwise the prompt decides: `Save` runs the
/// save pathway and proceeds only when it actually saved, `Discard` proceeds and leaves the
/// modified flag for the caller's open/new to reset, `Cancel` aborts without touching anything.
pub fn guard_destructive_action<H>(state: &ProjectState, host: &mut H) -> Decision
where
    H: UnsavedChangesHost + ?Sized,
{
    if !state.modified {
        return Decision::Proceed;
    }
    match host.ask_unsaved_changes() {
        UserChoice::Save => match host.save_current() {
            SaveOutcome::Saved => Decision::Proceed,
            SaveOutcome::Cancelled => {
                tracing::info!("save cancelled from unsaved-changes prompt");
                Decision::Abort
            }
            SaveOutcome::Failed => {
                tracing::warn!("save failed from unsaved-changes prompt");
                Decision::Abort
            }
        },
        UserChoice::Discard => {
            tracing::info!(project = %state.name, "discarding unsaved changes");
            Decision::Proceed
        }
        UserChoice::Cancel => Decision::Abort,
    }
}
