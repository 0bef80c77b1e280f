//! Built-in fallback values for every configuration field.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::paths::home_dir_or_fallback;

pub const DEFAULT_CONTINUE_FLAG: &str = "--continue";
pub const DEFAULT_RESUME_FLAG: &str = "--resume";
pub const DEFAULT_TELEPORT_FLAG: &str = "--teleport";

/// Directory names under the home directory that commonly hold projects.
const DEFAULT_ROOT_NAMES: &[&str] = &[
    "Projects",
    "projects",
    "Developer",
    "Code",
    "code",
    "src",
    "dev",
    "repos",
    "work",
];

/// Version control marker, package manifests, build manifests and project notes.
const DEFAULT_MARKERS: &[&str] = &[
    ".git",
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "Package.swift",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "Makefile",
    "CLAUDE.md",
];

pub fn default_scan_roots() -> Vec<PathBuf> {
    let home = home_dir_or_fallback();
    DEFAULT_ROOT_NAMES.iter().map(|name| home.join(name)).collect()
}

pub fn default_markers() -> Vec<String> {
    DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect()
}

/// `~/.claude/projects`
pub fn default_logs_dir() -> PathBuf {
    home_dir_or_fallback().join(".claude").join("projects")
}

pub fn default_launch_command() -> String {
    "claude".to_string()
}

pub fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([("COLORTERM".to_string(), "truecolor".to_string())])
}
