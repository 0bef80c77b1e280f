//! Home-directory and session-log path helpers shared by the registry and catalog.

use std::path::{Path, PathBuf};

/// Character that replaces path separators in session-log directory names.
pub const LOG_DIR_DELIMITER: char = '-';

/// Home directory, or the current directory if it cannot be determined.
pub fn home_dir_or_fallback() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home,
        None => {
            tracing::error!(
                event = "core.paths.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".")
        }
    }
}

/// Expand a leading `~` or `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir_or_fallback();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir_or_fallback().join(rest),
        None => PathBuf::from(path),
    }
}

/// Encode a project path into its session-log directory name.
///
/// `/Users/me/app` becomes `-Users-me-app`.
pub fn encode_project_path(project_path: &Path) -> String {
    let expanded = expand_tilde(&project_path.to_string_lossy());
    expanded
        .to_string_lossy()
        .chars()
        .map(|c| {
            if std::path::is_separator(c) {
                LOG_DIR_DELIMITER
            } else {
                c
            }
        })
        .collect()
}

/// Session-log directory for a project under `logs_root`.
pub fn session_log_dir(logs_root: &Path, project_path: &Path) -> PathBuf {
    logs_root.join(encode_project_path(project_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_project_path_replaces_separators() {
        assert_eq!(
            encode_project_path(Path::new("/Users/test/Projects/my-app")),
            "-Users-test-Projects-my-app"
        );
    }

    #[test]
    fn test_encode_project_path_expands_tilde() {
        let home = home_dir_or_fallback();
        let expected = encode_project_path(&home.join("app"));
        assert_eq!(encode_project_path(Path::new("~/app")), expected);
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/srv/code"), PathBuf::from("/srv/code"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_session_log_dir_joins_root() {
        let dir = session_log_dir(Path::new("/logs"), Path::new("/a/b"));
        assert_eq!(dir, PathBuf::from("/logs/-a-b"));
    }
}
