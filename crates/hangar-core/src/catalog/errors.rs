use crate::errors::HangarError;

/// Per-file failures while building a listing. These are logged and the
/// file is skipped; they never abort the whole listing.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open session log '{path}': {source}")]
    OpenFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read session log '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
}

impl HangarError for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::OpenFailed { .. } => "CATALOG_OPEN_FAILED",
            CatalogError::ReadFailed { .. } => "CATALOG_READ_FAILED",
        }
    }
}
