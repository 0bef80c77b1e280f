//! Project discovery and merge.
//!
//! Discovery is blocking filesystem work and may run on a background worker;
//! merging is pure and is applied by the registry owner in one step.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::types::{Project, sort_projects};

/// Find project directories directly under each root.
///
/// A child directory qualifies if it directly contains any of `markers`.
/// Hidden directories are skipped. Missing roots are ignored. Order follows
/// `roots`, then file name within each root; a path may appear more than
/// once if roots overlap.
pub fn discover_projects(roots: &[PathBuf], markers: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        if !root.is_dir() {
            tracing::debug!(event = "core.projects.scan_root_missing", root = %root.display());
            continue;
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        event = "core.projects.scan_entry_failed",
                        root = %root.display(),
                        error = %e
                    );
                    continue;
                }
            };

            if !entry.file_type().is_dir() || is_hidden(entry.path()) {
                continue;
            }

            if has_marker(entry.path(), markers) {
                found.push(entry.path().to_path_buf());
            }
        }
    }

    tracing::info!(
        event = "core.projects.scan_completed",
        roots = roots.len(),
        found = found.len()
    );

    found
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_marker(dir: &Path, markers: &[String]) -> bool {
    markers.iter().any(|marker| dir.join(marker).exists())
}

/// Merge freshly discovered paths into the known project list.
///
/// - A discovered path that matches a known project reuses it, keeping its
///   id, icon and last-opened time.
/// - A discovered path with no match becomes a new project.
/// - A path discovered twice is kept once (first occurrence wins).
/// - A known project that was not rediscovered survives only while its path
///   still exists on disk, which keeps manually added projects outside the
///   scanned roots.
///
/// The result is sorted with [`sort_projects`].
pub fn merge_discovered(existing: &[Project], discovered: &[PathBuf]) -> Vec<Project> {
    let by_path: HashMap<&Path, &Project> = existing.iter().map(|p| (p.path(), p)).collect();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut merged = Vec::with_capacity(discovered.len());

    for path in discovered {
        if !seen.insert(path.clone()) {
            continue;
        }
        match by_path.get(path.as_path()) {
            Some(project) => merged.push((*project).clone()),
            None => merged.push(Project::discovered(path.clone())),
        }
    }

    for project in existing {
        if seen.contains(project.path()) {
            continue;
        }
        if project.path().exists() {
            seen.insert(project.path().to_path_buf());
            merged.push(project.clone());
        } else {
            tracing::info!(
                event = "core.projects.dropped_missing",
                path = %project.path().display(),
                name = project.name()
            );
        }
    }

    sort_projects(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::types::test_helpers::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn markers() -> Vec<String> {
        vec![".git".to_string(), "Cargo.toml".to_string()]
    }

    fn make_project_dir(root: &Path, name: &str, marker: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        if marker == ".git" {
            std::fs::create_dir_all(dir.join(".git")).unwrap();
        } else {
            std::fs::write(dir.join(marker), "").unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_finds_directories_with_markers() {
        let root = TempDir::new().unwrap();
        let a = make_project_dir(root.path(), "alpha", ".git");
        let b = make_project_dir(root.path(), "beta", "Cargo.toml");
        std::fs::create_dir_all(root.path().join("plain")).unwrap();
        std::fs::write(root.path().join("file.txt"), "").unwrap();

        let found = discover_projects(&[root.path().to_path_buf()], &markers());
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn test_discover_skips_hidden_and_nested() {
        let root = TempDir::new().unwrap();
        make_project_dir(root.path(), ".hidden", ".git");
        std::fs::create_dir_all(root.path().join("group")).unwrap();
        make_project_dir(&root.path().join("group"), "nested", ".git");

        let found = discover_projects(&[root.path().to_path_buf()], &markers());
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_ignores_missing_roots() {
        let found = discover_projects(&[PathBuf::from("/definitely/not/here")], &markers());
        assert!(found.is_empty());
    }

    #[test]
    fn test_merge_reuses_existing_identity() {
        let root = TempDir::new().unwrap();
        let dir = make_project_dir(root.path(), "app", ".git");
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut known = with_last_opened(make_test_project("My App", dir.to_str().unwrap()), t);
        known.set_icon(Some("rocket".to_string()));

        let merged = merge_discovered(&[known.clone()], &[dir]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], known);
    }

    #[test]
    fn test_merge_deduplicates_paths() {
        let merged = merge_discovered(
            &[],
            &[PathBuf::from("/x/app"), PathBuf::from("/x/app")],
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_keeps_undiscovered_existing_paths() {
        let manual = TempDir::new().unwrap();
        let known = make_test_project("manual", manual.path().to_str().unwrap());

        let merged = merge_discovered(&[known.clone()], &[]);
        assert_eq!(merged, vec![known]);
    }

    #[test]
    fn test_merge_drops_vanished_paths() {
        let gone = make_test_project("gone", "/this/path/does/not/exist/anywhere");
        let merged = merge_discovered(&[gone], &[]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_new_projects_get_fresh_ids() {
        let merged = merge_discovered(&[], &[PathBuf::from("/x/a"), PathBuf::from("/x/b")]);
        assert_eq!(merged.len(), 2);
        assert_ne!(merged[0].id(), merged[1].id());
        assert_eq!(merged[0].name(), "a");
    }
}
