//! hangar-core: project registry and session lifecycle engine
//!
//! This library keeps the list of known projects, reads recorded sessions
//! from the external log store, and coordinates the open terminal tabs bound
//! to projects. It is used by the `hangar` CLI and by any terminal front end
//! that implements [`coordinator::SurfaceHost`].
//!
//! # Main Entry Points
//!
//! - [`projects`] - Persistent project registry, scanning and grid navigation
//! - [`catalog`] - Session summaries read from per-project log directories
//! - [`coordinator`] - Open tabs, view mode and button handling
//! - [`config`] - Configuration management

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod escape;
pub mod events;
pub mod logging;
pub mod paths;
pub mod projects;

// Re-export commonly used types at crate root for convenience
pub use catalog::{SessionCatalog, SessionSummary};
pub use config::HangarConfig;
pub use coordinator::{
    Button, Command, CoordinatorEvent, LaunchCommands, LaunchMode, SessionCoordinator, Store,
    SurfaceHandle, SurfaceHost, ViewMode,
};
pub use errors::{HangarError, HangarResult};
pub use logging::init_logging;
pub use projects::{Project, ProjectError, ProjectRegistry, RegistrySettings};
