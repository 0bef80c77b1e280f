//! Configuration type definitions.
//!
//! Every field is optional in the file representation so that a project
//! config can override a single value without restating the rest. Accessors
//! resolve the built-in defaults from [`super::defaults`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults;
use crate::paths::expand_tilde;

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HangarConfig {
    /// Project discovery settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// External session log store settings
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Startup command and environment for new sessions
    #[serde(default)]
    pub launch: LaunchConfig,
}

/// Where to look for projects and what makes a directory a project.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScanConfig {
    /// Candidate root directories; their direct children are scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,

    /// File or directory names whose presence marks a project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<String>>,
}

impl ScanConfig {
    /// Configured roots with `~` expanded.
    pub fn roots(&self) -> Vec<PathBuf> {
        match &self.roots {
            Some(roots) => roots.iter().map(|r| expand_tilde(r)).collect(),
            None => defaults::default_scan_roots(),
        }
    }

    pub fn markers(&self) -> Vec<String> {
        self.markers
            .clone()
            .unwrap_or_else(defaults::default_markers)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionsConfig {
    /// Root of the per-project session log directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<String>,
}

impl SessionsConfig {
    /// Resolved log root. `HANGAR_SESSION_LOGS_DIR` wins over the config file.
    pub fn logs_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("HANGAR_SESSION_LOGS_DIR")
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }
        match &self.logs_dir {
            Some(dir) => expand_tilde(dir),
            None => defaults::default_logs_dir(),
        }
    }
}

/// How new sessions are started inside a terminal surface.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LaunchConfig {
    /// Base command run in every new surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Flag that resumes the most recent session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_flag: Option<String>,

    /// Flag that resumes a specific session id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_flag: Option<String>,

    /// Flag that teleports a session id into the current project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teleport_flag: Option<String>,

    /// Environment overrides applied to every surface. Merged key by key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl LaunchConfig {
    pub fn command(&self) -> String {
        self.command
            .clone()
            .unwrap_or_else(defaults::default_launch_command)
    }

    pub fn continue_flag(&self) -> String {
        self.continue_flag
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_CONTINUE_FLAG.to_string())
    }

    pub fn resume_flag(&self) -> String {
        self.resume_flag
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_RESUME_FLAG.to_string())
    }

    pub fn teleport_flag(&self) -> String {
        self.teleport_flag
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_TELEPORT_FLAG.to_string())
    }

    pub fn env(&self) -> BTreeMap<String, String> {
        self.env.clone().unwrap_or_else(defaults::default_env)
    }
}
