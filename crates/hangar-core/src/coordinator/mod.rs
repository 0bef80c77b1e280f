//! Runtime lifecycle of open session tabs.
//!
//! [`SessionCoordinator`] is the single mutator for tab state. Callers drive
//! it with direct method calls or [`Command`]s through [`Store::dispatch`],
//! and observe it through returned [`CoordinatorEvent`]s or
//! [`SessionCoordinator::subscribe`].

pub mod errors;
pub mod input;
pub mod session_coordinator;
pub mod store;
pub mod surface;
pub mod types;

pub use errors::{CoordinatorError, SurfaceError};
pub use input::{Button, ButtonAction};
pub use session_coordinator::SessionCoordinator;
pub use store::{Command, CoordinatorEvent, Store};
pub use surface::{SurfaceHandle, SurfaceHost, SyntheticKey};
pub use types::{LaunchCommands, LaunchMode, RuntimeSession, ViewMode};
