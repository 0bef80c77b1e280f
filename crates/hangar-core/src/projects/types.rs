use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A project is a directory that can be launched into a session.
///
/// `id` is assigned once and survives rescans; `path` is the identity used
/// when merging scan results. Two projects with the same path are the same
/// logical project regardless of their other fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque stable identifier (UUID v4).
    id: String,
    /// Display name (defaults to directory name).
    name: String,
    /// Absolute file system path; the deduplication key.
    path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_opened: Option<DateTime<Utc>>,
    #[serde(default)]
    has_activity: bool,
}

impl Project {
    /// Create a project with a freshly generated id.
    pub fn new(name: String, path: PathBuf) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            path,
            icon: None,
            last_opened: None,
            has_activity: false,
        }
    }

    /// Create a project for a directory found by a scan, named after the directory.
    pub fn discovered(path: PathBuf) -> Self {
        let name = derive_display_name(&path);
        Self::new(name, path)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn last_opened(&self) -> Option<DateTime<Utc>> {
        self.last_opened
    }

    pub fn has_activity(&self) -> bool {
        self.has_activity
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub(crate) fn set_last_opened(&mut self, at: DateTime<Utc>) {
        self.last_opened = Some(at);
    }

    pub(crate) fn set_has_activity(&mut self, active: bool) {
        self.has_activity = active;
    }
}

/// Order projects most recently opened first.
///
/// Projects never opened sort after every opened one. Ties (including
/// "never opened") break on case-insensitive name.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(compare_projects);
}

fn compare_projects(a: &Project, b: &Project) -> Ordering {
    match (a.last_opened, b.last_opened) {
        (Some(x), Some(y)) if x != y => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

/// Get a human-readable display name from a path.
///
/// Returns the final directory component, or "unknown" for edge cases like root "/".
pub fn derive_display_name(path: &Path) -> String {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!(
                event = "core.projects.derive_name_fallback",
                path = %path.display(),
                "Could not derive display name from path, using 'unknown'"
            );
            "unknown".to_string()
        }
    }
}

/// Test utilities for building projects with fixed fields.
///
/// Public so the CLI crate can create fixtures.
#[doc(hidden)]
pub mod test_helpers {
    use super::*;

    /// Project with a deterministic id derived from its name.
    pub fn make_test_project(name: &str, path: &str) -> Project {
        Project {
            id: format!("id-{name}"),
            name: name.to_string(),
            path: PathBuf::from(path),
            icon: None,
            last_opened: None,
            has_activity: false,
        }
    }

    pub fn with_last_opened(mut project: Project, at: DateTime<Utc>) -> Project {
        project.last_opened = Some(at);
        project
    }
}
