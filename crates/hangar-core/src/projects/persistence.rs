use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::ProjectError;
use super::types::Project;

/// Load the persisted project list.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but
/// cannot be read or parsed is an error; callers decide how to recover.
pub fn load_projects(path: &Path) -> Result<Option<Vec<Project>>, ProjectError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            tracing::error!(
                event = "core.projects.load_failed",
                path = %path.display(),
                error = %e
            );
            return Err(ProjectError::LoadFailed { source: e });
        }
    };

    match serde_json::from_str::<Vec<Project>>(&content) {
        Ok(projects) => {
            tracing::debug!(
                event = "core.projects.loaded",
                path = %path.display(),
                count = projects.len()
            );
            Ok(Some(projects))
        }
        Err(e) => {
            tracing::error!(
                event = "core.projects.json_parse_failed",
                path = %path.display(),
                error = %e,
                "Projects file exists but contains invalid JSON"
            );
            Err(ProjectError::LoadCorrupted {
                message: e.to_string(),
            })
        }
    }
}

/// Rewrite the whole project list.
///
/// Writes to a temp file in the same directory and renames it over the
/// target, so a reader never observes a partially written file.
pub fn save_projects(path: &Path, projects: &[Project]) -> Result<(), ProjectError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&parent).map_err(|e| ProjectError::SaveFailed {
        message: format!("Failed to create directory ({}): {}", parent.display(), e),
    })?;

    let json = serde_json::to_string_pretty(projects).map_err(|e| ProjectError::SaveFailed {
        message: format!("Failed to serialize projects: {}", e),
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| {
        ProjectError::SaveFailed {
            message: format!("Failed to create temp file in {}: {}", parent.display(), e),
        }
    })?;
    temp.write_all(json.as_bytes())
        .map_err(|e| ProjectError::SaveFailed {
            message: format!("Failed to write projects: {}", e),
        })?;
    temp.persist(path).map_err(|e| ProjectError::SaveFailed {
        message: format!(
            "Failed to replace projects file ({}): {}",
            path.display(),
            e.error
        ),
    })?;

    tracing::info!(
        event = "core.projects.saved",
        path = %path.display(),
        count = projects.len()
    );

    Ok(())
}

/// Default location of the registry file, `~/.hangar/projects.json`.
pub fn projects_file_path() -> PathBuf {
    // Allow override via env var for testing.
    if let Ok(path_str) = std::env::var("HANGAR_PROJECTS_FILE")
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    crate::paths::home_dir_or_fallback()
        .join(".hangar")
        .join("projects.json")
}

/// Test utilities for the projects file location.
///
/// Public so the CLI crate can use the env lock/guard in its tests.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify HANGAR_PROJECTS_FILE env var.
    pub static PROJECTS_FILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes HANGAR_PROJECTS_FILE env var on drop.
    pub struct ProjectsFileEnvGuard;

    impl ProjectsFileEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold PROJECTS_FILE_ENV_LOCK to serialize access
            // from Rust test code. Acceptable in test-only code.
            unsafe { std::env::set_var("HANGAR_PROJECTS_FILE", path) };
            Self
        }
    }

    impl Drop for ProjectsFileEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold PROJECTS_FILE_ENV_LOCK throughout guard lifetime.
            unsafe { std::env::remove_var("HANGAR_PROJECTS_FILE") };
        }
    }
}
