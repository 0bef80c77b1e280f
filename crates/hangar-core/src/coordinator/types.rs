use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::surface::SurfaceHandle;
use crate::config::LaunchConfig;
use crate::escape::shell_quote;
use crate::projects::Project;

/// Which top-level view owns input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Project picker. Initial state.
    #[default]
    Launcher,
    /// A session tab is in front.
    Session,
}

/// Which startup command a new session runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchMode {
    /// Resume the most recent session in the project.
    Continue,
    /// Start a new session.
    Fresh,
    /// Resume a specific recorded session.
    Resume(String),
}

/// A live tab binding a project to a terminal surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSession {
    /// Ephemeral id, unique for the life of the process.
    pub id: String,
    pub project: Project,
    pub surface: SurfaceHandle,
    /// Output arrived while the tab was not in front.
    pub has_activity: bool,
}

impl RuntimeSession {
    pub(crate) fn new(project: Project, surface: SurfaceHandle) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project,
            surface,
            has_activity: false,
        }
    }

    pub fn project_id(&self) -> &str {
        self.project.id()
    }
}

/// Startup commands and environment derived from `[launch]` config.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchCommands {
    command: String,
    continue_flag: String,
    resume_flag: String,
    teleport_flag: String,
    env: BTreeMap<String, String>,
}

impl LaunchCommands {
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self {
            command: config.command(),
            continue_flag: config.continue_flag(),
            resume_flag: config.resume_flag(),
            teleport_flag: config.teleport_flag(),
            env: config.env(),
        }
    }

    /// Command line for a launch mode.
    pub fn for_mode(&self, mode: &LaunchMode) -> String {
        match mode {
            LaunchMode::Continue => format!("{} {}", self.command, self.continue_flag),
            LaunchMode::Fresh => self.command.clone(),
            LaunchMode::Resume(id) => {
                format!("{} {} {}", self.command, self.resume_flag, shell_quote(id))
            }
        }
    }

    /// Command line that teleports session `id` into the current project.
    pub fn teleport(&self, id: &str) -> String {
        format!("{} {} {}", self.command, self.teleport_flag, shell_quote(id))
    }

    /// Environment overrides applied to every surface.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}

impl Default for LaunchCommands {
    fn default() -> Self {
        Self::from_config(&LaunchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commands() {
        let commands = LaunchCommands::default();
        assert_eq!(commands.for_mode(&LaunchMode::Continue), "claude --continue");
        assert_eq!(commands.for_mode(&LaunchMode::Fresh), "claude");
        assert_eq!(
            commands.for_mode(&LaunchMode::Resume("abc-123".to_string())),
            "claude --resume abc-123"
        );
        assert_eq!(commands.teleport("abc-123"), "claude --teleport abc-123");
    }

    #[test]
    fn test_session_id_is_quoted() {
        let commands = LaunchCommands::default();
        assert_eq!(
            commands.for_mode(&LaunchMode::Resume("a b".to_string())),
            "claude --resume 'a b'"
        );
    }

    #[test]
    fn test_configured_command() {
        let config = LaunchConfig {
            command: Some("cc".to_string()),
            continue_flag: Some("-c".to_string()),
            ..Default::default()
        };
        let commands = LaunchCommands::from_config(&config);
        assert_eq!(commands.for_mode(&LaunchMode::Continue), "cc -c");
    }

    #[test]
    fn test_view_mode_default_is_launcher() {
        assert_eq!(ViewMode::default(), ViewMode::Launcher);
    }
}
