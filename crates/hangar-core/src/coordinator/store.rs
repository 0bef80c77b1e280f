use serde::{Deserialize, Serialize};

use super::input::Button;
use super::surface::SyntheticKey;
use super::types::{LaunchMode, ViewMode};
use crate::projects::Project;

/// Every operation the coordinator exposes, as data.
///
/// Menu commands and input handlers build these and hand them to
/// [`Store::dispatch`], so callers never reach into coordinator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Open (or switch to) a project's session.
    LaunchProject { project: Project, mode: LaunchMode },
    /// Open a project with a new session.
    LaunchFreshSession { project: Project },
    /// Open a project resuming a specific recorded session.
    ResumeSession { project: Project, session_id: String },
    /// Open an extra tab on the active project for a recorded session.
    TeleportToSession { session_id: String },
    CloseCurrentSession,
    CloseSession { index: usize },
    SwitchToSession { index: usize },
    NextSession,
    PreviousSession,
    ReturnToLauncher,
    /// A semantic button press; unhandled buttons produce no events.
    Button(Button),
}

/// State changes produced by the coordinator.
///
/// Each variant describes what happened. Failures travel through the
/// `Result` error channel, never through events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordinatorEvent {
    /// A new tab was created.
    SessionLaunched {
        session_id: String,
        project_id: String,
        command: String,
    },
    /// The tab at `index` became the selected one.
    SessionSelected { index: usize, project_id: String },
    /// A tab was closed and its surface released.
    SessionClosed {
        session_id: String,
        project_id: String,
    },
    ViewModeChanged { mode: ViewMode },
    /// A background tab produced output.
    ActivityChanged {
        session_id: String,
        has_activity: bool,
    },
    /// A synthetic key was sent to the selected tab.
    KeyForwarded {
        session_id: String,
        key: SyntheticKey,
    },
}

/// Trait for dispatching coordinator commands.
///
/// # Semantics
///
/// - **Ordering**: Commands execute in the order received on one serial context.
/// - **Events**: On success, dispatch returns the events describing what
///   changed, in order. A command that changed nothing returns an empty vector.
pub trait Store {
    type Error;
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<CoordinatorEvent>, Self::Error>;
}
