use std::path::PathBuf;

use clap::ArgMatches;
use tracing::warn;

use hangar_core::{HangarConfig, Project, ProjectRegistry, RegistrySettings};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading or validation fails, but
/// notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub(crate) fn load_config_with_warning() -> HangarConfig {
    match HangarConfig::load_hierarchy().and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.hangar/config.toml and ./.hangar/config.toml for errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            HangarConfig::default()
        }
    }
}

/// Registry populated from disk (or from a first scan).
pub(crate) fn load_registry(config: &HangarConfig) -> ProjectRegistry {
    let mut registry = ProjectRegistry::new(RegistrySettings::from_config(config));
    registry.load();
    registry
}

/// Index of the project named by the `project` argument.
///
/// The argument is either an index as printed by `hangar list` or a path.
pub(crate) fn resolve_project_index(
    registry: &ProjectRegistry,
    matches: &ArgMatches,
) -> Result<usize, Box<dyn std::error::Error>> {
    let target = matches
        .get_one::<String>("project")
        .ok_or("Project argument is required")?;

    if let Ok(index) = target.parse::<usize>() {
        if index < registry.len() {
            return Ok(index);
        }
        return Err(format!(
            "No project at index {} ({} projects known)",
            index,
            registry.len()
        )
        .into());
    }

    let path = absolute_path(target)?;
    registry
        .projects()
        .iter()
        .position(|p| p.path() == path)
        .ok_or_else(|| format!("No project registered at '{}'", path.display()).into())
}

pub(crate) fn resolve_project(
    registry: &ProjectRegistry,
    matches: &ArgMatches,
) -> Result<Project, Box<dyn std::error::Error>> {
    let index = resolve_project_index(registry, matches)?;
    Ok(registry.projects()[index].clone())
}

/// Make `path` absolute against the current directory without touching
/// symlinks.
pub(crate) fn absolute_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let expanded = hangar_core::paths::expand_tilde(path);
    Ok(std::path::absolute(expanded)?)
}
