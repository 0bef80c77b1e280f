pub mod errors;
pub mod navigation;
pub mod persistence;
pub mod registry;
pub mod scan;
pub mod types;
pub mod worker;

// Re-export commonly used types at module level
pub use errors::ProjectError;
pub use persistence::{load_projects, projects_file_path, save_projects};
pub use registry::{LoadSource, ProjectRegistry, RegistrySettings};
pub use scan::{discover_projects, merge_discovered};
pub use types::{Project, sort_projects};
pub use worker::ScanWorker;
