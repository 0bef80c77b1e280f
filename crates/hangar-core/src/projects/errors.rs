use crate::errors::HangarError;

/// Note: This type intentionally does not implement `Clone` because
/// `io::Error` (in `LoadFailed`) is not `Clone`.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Project not found")]
    NotFound,

    #[error("Project already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Failed to save projects: {message}")]
    SaveFailed { message: String },

    #[error("Projects file corrupted: {message}")]
    LoadCorrupted { message: String },

    #[error("Failed to read projects file: {source}")]
    LoadFailed { source: std::io::Error },
}

impl HangarError for ProjectError {
    fn error_code(&self) -> &'static str {
        match self {
            ProjectError::NotADirectory { .. } => "PROJECT_NOT_A_DIRECTORY",
            ProjectError::NotFound => "PROJECT_NOT_FOUND",
            ProjectError::AlreadyExists { .. } => "PROJECT_ALREADY_EXISTS",
            ProjectError::SaveFailed { .. } => "PROJECT_SAVE_FAILED",
            ProjectError::LoadCorrupted { .. } => "PROJECT_LOAD_CORRUPTED",
            ProjectError::LoadFailed { .. } => "PROJECT_LOAD_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            ProjectError::NotADirectory { .. }
            | ProjectError::NotFound
            | ProjectError::AlreadyExists { .. } => true,

            ProjectError::SaveFailed { .. }
            | ProjectError::LoadCorrupted { .. }
            | ProjectError::LoadFailed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_error_not_a_directory() {
        let error = ProjectError::NotADirectory {
            path: "/tmp/file.txt".to_string(),
        };
        assert_eq!(error.to_string(), "Path is not a directory: /tmp/file.txt");
        assert_eq!(error.error_code(), "PROJECT_NOT_A_DIRECTORY");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_project_error_not_found() {
        let error = ProjectError::NotFound;
        assert_eq!(error.to_string(), "Project not found");
        assert_eq!(error.error_code(), "PROJECT_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_project_error_already_exists() {
        let error = ProjectError::AlreadyExists {
            path: "/code/app".to_string(),
        };
        assert_eq!(error.to_string(), "Project already exists: /code/app");
        assert_eq!(error.error_code(), "PROJECT_ALREADY_EXISTS");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_project_error_save_failed() {
        let error = ProjectError::SaveFailed {
            message: "disk full".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to save projects: disk full");
        assert_eq!(error.error_code(), "PROJECT_SAVE_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_project_error_load_corrupted() {
        let error = ProjectError::LoadCorrupted {
            message: "invalid JSON".to_string(),
        };
        assert_eq!(error.to_string(), "Projects file corrupted: invalid JSON");
        assert_eq!(error.error_code(), "PROJECT_LOAD_CORRUPTED");
        assert!(!error.is_user_error());
    }
}
