use crate::config::types::HangarConfig;
use crate::errors::ConfigError;

/// Reject configurations that would make scanning or launching impossible.
pub fn validate_config(config: &HangarConfig) -> Result<(), ConfigError> {
    if config.launch.command().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "launch.command cannot be empty".to_string(),
        });
    }

    if let Some(markers) = &config.scan.markers {
        if markers.is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "scan.markers cannot be empty".to_string(),
            });
        }
        if markers.iter().any(|m| m.trim().is_empty() || m.contains('/')) {
            return Err(ConfigError::InvalidConfiguration {
                message: "scan.markers entries must be plain file names".to_string(),
            });
        }
    }

    Ok(())
}
