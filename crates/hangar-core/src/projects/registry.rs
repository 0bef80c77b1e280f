use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::errors::ProjectError;
use super::navigation;
use super::persistence::{load_projects, projects_file_path, save_projects};
use super::scan::{discover_projects, merge_discovered};
use super::types::{Project, sort_projects};
use super::worker::ScanWorker;
use crate::config::HangarConfig;
use crate::paths::session_log_dir;

/// Where the registry persists itself and where it looks for projects.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Registry JSON file.
    pub file_path: PathBuf,
    /// Candidate roots whose direct children are scanned.
    pub roots: Vec<PathBuf>,
    /// Marker file names that identify a project directory.
    pub markers: Vec<String>,
    /// Session log root, used to recover last-opened times.
    pub logs_root: PathBuf,
}

impl RegistrySettings {
    pub fn from_config(config: &HangarConfig) -> Self {
        Self {
            file_path: projects_file_path(),
            roots: config.scan.roots(),
            markers: config.scan.markers(),
            logs_root: config.sessions.logs_dir(),
        }
    }
}

/// How [`ProjectRegistry::load`] obtained its projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the registry file.
    Persisted,
    /// The file was missing or unusable, so a fresh scan was run.
    Scanned,
}

/// Persistent, deduplicated project list with a selection cursor.
///
/// Key invariant: `selected_index < projects.len()` whenever the list is
/// non-empty, and `0` when it is empty. Every mutation rewrites the registry
/// file.
#[derive(Debug)]
pub struct ProjectRegistry {
    settings: RegistrySettings,
    projects: Vec<Project>,
    selected_index: usize,
}

impl ProjectRegistry {
    /// Create an empty registry. Call [`Self::load`] to populate it.
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            settings,
            projects: Vec::new(),
            selected_index: 0,
        }
    }

    /// Read the persisted registry, falling back to a scan.
    ///
    /// When the file loads but no project has ever been opened, last-opened
    /// times are recovered once from the session log directories.
    pub fn load(&mut self) -> LoadSource {
        let path = self.settings.file_path.clone();
        match load_projects(&path) {
            Ok(Some(projects)) => {
                self.projects = projects;
                self.selected_index = 0;
                self.recover_last_opened();
                tracing::info!(
                    event = "core.projects.registry_loaded",
                    count = self.projects.len()
                );
                LoadSource::Persisted
            }
            Ok(None) => {
                tracing::info!(
                    event = "core.projects.registry_missing",
                    path = %path.display(),
                    "No registry file yet, scanning for projects"
                );
                self.scan();
                LoadSource::Scanned
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.projects.registry_fallback_scan",
                    path = %path.display(),
                    error = %e,
                    "Registry unusable, rebuilding from a fresh scan"
                );
                self.scan();
                LoadSource::Scanned
            }
        }
    }

    /// Discover projects under the configured roots and merge them in.
    pub fn scan(&mut self) {
        let discovered = discover_projects(&self.settings.roots, &self.settings.markers);
        self.apply_scan(discovered);
    }

    /// Start discovery on a background thread.
    ///
    /// Feed the result back with [`Self::apply_scan`].
    pub fn start_background_scan(&self) -> ScanWorker {
        ScanWorker::spawn(self.settings.roots.clone(), self.settings.markers.clone())
    }

    /// Merge discovered paths into the registry and persist.
    ///
    /// The selection stays on the same project if it survived the merge.
    pub fn apply_scan(&mut self, discovered: Vec<PathBuf>) {
        let selected_id = self.selected().map(|p| p.id().to_string());
        self.projects = merge_discovered(&self.projects, &discovered);
        self.reselect(selected_id.as_deref());
        self.persist_logged();
    }

    /// Register a directory manually.
    ///
    /// # Errors
    /// - `NotADirectory` if `path` is not an existing directory.
    /// - `AlreadyExists` if a project with the same path is known.
    /// - `SaveFailed` if the registry could not be written.
    pub fn add(&mut self, name: String, path: PathBuf) -> Result<Project, ProjectError> {
        if !path.is_dir() {
            return Err(ProjectError::NotADirectory {
                path: path.display().to_string(),
            });
        }
        if self.projects.iter().any(|p| p.path() == path) {
            return Err(ProjectError::AlreadyExists {
                path: path.display().to_string(),
            });
        }

        let project = Project::new(name, path);
        let selected_id = self.selected().map(|p| p.id().to_string());
        self.projects.push(project.clone());
        sort_projects(&mut self.projects);
        self.reselect(selected_id.as_deref());

        tracing::info!(
            event = "core.projects.added",
            id = project.id(),
            path = %project.path().display()
        );

        self.persist()?;
        Ok(project)
    }

    /// Remove the project at `index`. Out-of-range indices are a no-op.
    ///
    /// The selection is clamped to the new last index (or 0 when empty).
    pub fn remove(&mut self, index: usize) -> Result<Option<Project>, ProjectError> {
        if index >= self.projects.len() {
            tracing::debug!(event = "core.projects.remove_out_of_range", index = index);
            return Ok(None);
        }

        let removed = self.projects.remove(index);
        if self.selected_index >= self.projects.len() {
            self.selected_index = self.projects.len().saturating_sub(1);
        }

        tracing::info!(
            event = "core.projects.removed",
            id = removed.id(),
            path = %removed.path().display()
        );

        self.persist()?;
        Ok(Some(removed))
    }

    /// Stamp a project as opened now, re-sort, and persist.
    ///
    /// The selection follows the stamped project to its new position.
    pub fn mark_opened(&mut self, project_id: &str) -> Result<(), ProjectError> {
        self.mark_opened_at(project_id, Utc::now())
    }

    fn mark_opened_at(&mut self, project_id: &str, at: DateTime<Utc>) -> Result<(), ProjectError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id() == project_id)
            .ok_or(ProjectError::NotFound)?;
        project.set_last_opened(at);

        sort_projects(&mut self.projects);
        self.reselect(Some(project_id));

        tracing::debug!(event = "core.projects.marked_opened", id = project_id);
        self.persist()
    }

    /// Set or clear the activity flag on a project.
    pub fn set_activity(&mut self, project_id: &str, active: bool) -> Result<(), ProjectError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id() == project_id)
            .ok_or(ProjectError::NotFound)?;
        if project.has_activity() == active {
            return Ok(());
        }
        project.set_has_activity(active);
        self.persist()
    }

    /// Replace a project's icon (`None` clears it) and persist.
    pub fn set_icon(&mut self, project_id: &str, icon: Option<String>) -> Result<(), ProjectError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id() == project_id)
            .ok_or(ProjectError::NotFound)?;
        project.set_icon(icon);
        self.persist()
    }

    /// Circular move through the list. No-op when empty.
    pub fn move_selection(&mut self, delta: isize) {
        self.selected_index = navigation::wrap_index(self.selected_index, delta, self.len());
    }

    /// Move by whole rows in a grid with `column_count` columns.
    pub fn move_vertical(&mut self, row_delta: isize, column_count: usize) {
        self.selected_index =
            navigation::grid_vertical(self.selected_index, row_delta, column_count, self.len());
    }

    /// Move left/right in the grid. See [`navigation::grid_horizontal`] for
    /// the asymmetric edge behavior.
    pub fn move_horizontal(&mut self, col_delta: isize, column_count: usize) {
        self.selected_index =
            navigation::grid_horizontal(self.selected_index, col_delta, column_count, self.len());
    }

    /// Select by index. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.projects.len() {
            self.selected_index = index;
        }
    }

    pub fn selected(&self) -> Option<&Project> {
        self.projects.get(self.selected_index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_by_id(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == project_id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<&Project> {
        self.projects.iter().find(|p| p.path() == path)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        &self.settings.file_path
    }

    /// One-time recovery of last-opened times from session log directories.
    fn recover_last_opened(&mut self) {
        if self.projects.is_empty() || self.projects.iter().any(|p| p.last_opened().is_some()) {
            return;
        }

        let mut recovered = 0usize;
        for project in &mut self.projects {
            let log_dir = session_log_dir(&self.settings.logs_root, project.path());
            let modified = std::fs::metadata(&log_dir).and_then(|m| m.modified());
            if let Ok(modified) = modified {
                project.set_last_opened(DateTime::<Utc>::from(modified));
                recovered += 1;
            }
        }

        if recovered > 0 {
            tracing::info!(
                event = "core.projects.last_opened_recovered",
                recovered = recovered,
                total = self.projects.len()
            );
            sort_projects(&mut self.projects);
            self.selected_index = 0;
            self.persist_logged();
        }
    }

    fn reselect(&mut self, project_id: Option<&str>) {
        let position = project_id.and_then(|id| self.projects.iter().position(|p| p.id() == id));
        self.selected_index = match position {
            Some(index) => index,
            None => self.selected_index.min(self.projects.len().saturating_sub(1)),
        };
    }

    fn persist(&self) -> Result<(), ProjectError> {
        save_projects(&self.settings.file_path, &self.projects)
    }

    /// Persist where the caller has no error channel; failures are logged.
    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            tracing::error!(event = "core.projects.persist_failed", error = %e);
        }
    }
}
