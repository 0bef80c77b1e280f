use crate::errors::HangarError;

/// Failures reported by a [`super::SurfaceHost`].
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to create terminal surface: {message}")]
    CreateFailed { message: String },

    #[error("Failed to send key to surface '{surface}': {message}")]
    SendFailed { surface: String, message: String },
}

impl HangarError for SurfaceError {
    fn error_code(&self) -> &'static str {
        match self {
            SurfaceError::CreateFailed { .. } => "SURFACE_CREATE_FAILED",
            SurfaceError::SendFailed { .. } => "SURFACE_SEND_FAILED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("No active project to attach the session to")]
    NoActiveProject,
}

impl HangarError for CoordinatorError {
    fn error_code(&self) -> &'static str {
        match self {
            CoordinatorError::Surface(e) => e.error_code(),
            CoordinatorError::NoActiveProject => "COORDINATOR_NO_ACTIVE_PROJECT",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CoordinatorError::Surface(e) => e.is_user_error(),
            CoordinatorError::NoActiveProject => true,
        }
    }
}
