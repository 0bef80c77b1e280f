//! Configuration loading and merging logic.
//!
//! Missing files are expected and skipped; unreadable or malformed files are
//! errors so that a typo never silently falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::types::{HangarConfig, LaunchConfig, ScanConfig, SessionsConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from defaults, `~/.hangar/config.toml` and `./.hangar/config.toml`.
pub fn load_hierarchy() -> Result<HangarConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".hangar").join("config.toml"));
    }
    paths.push(std::env::current_dir()?.join(".hangar").join("config.toml"));
    load_from_paths(&paths)
}

/// Load and merge the given config files in order, then validate.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<HangarConfig, ConfigError> {
    let mut config = HangarConfig::default();

    for path in paths {
        match load_config_file(path)? {
            Some(file_config) => {
                tracing::debug!(event = "core.config.file_loaded", path = %path.display());
                config = merge_configs(config, file_config);
            }
            None => {
                tracing::debug!(event = "core.config.file_missing", path = %path.display());
            }
        }
    }

    validate_config(&config)?;
    Ok(config)
}

/// Returns `Ok(None)` when the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<HangarConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Scalar and list fields are replaced wholesale when present. The launch
/// environment is merged key by key.
pub fn merge_configs(base: HangarConfig, override_config: HangarConfig) -> HangarConfig {
    HangarConfig {
        scan: ScanConfig {
            roots: override_config.scan.roots.or(base.scan.roots),
            markers: override_config.scan.markers.or(base.scan.markers),
        },
        sessions: SessionsConfig {
            logs_dir: override_config.sessions.logs_dir.or(base.sessions.logs_dir),
        },
        launch: LaunchConfig {
            command: override_config.launch.command.or(base.launch.command),
            continue_flag: override_config
                .launch
                .continue_flag
                .or(base.launch.continue_flag),
            resume_flag: override_config.launch.resume_flag.or(base.launch.resume_flag),
            teleport_flag: override_config
                .launch
                .teleport_flag
                .or(base.launch.teleport_flag),
            env: match (base.launch.env, override_config.launch.env) {
                (Some(mut merged), Some(over)) => {
                    merged.extend(over);
                    Some(merged)
                }
                (base_env, over_env) => over_env.or(base_env),
            },
        },
    }
}
