//! Read-only view of recorded sessions in the external log store.
//!
//! Nothing here is cached: every call re-reads the log directory.

pub mod errors;
pub mod parse;
pub mod reader;
pub mod types;

pub use errors::CatalogError;
pub use reader::{SessionCatalog, list_sessions};
pub use types::SessionSummary;
