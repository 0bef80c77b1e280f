//! # Configuration System
//!
//! Hierarchical TOML configuration for Hangar.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.hangar/config.toml` (global user preferences)
//! 3. **Project config** - `./.hangar/config.toml` (directory-specific overrides)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.hangar/config.toml
//! [scan]
//! roots = ["~/Projects", "~/work"]
//! markers = [".git", "Cargo.toml", "package.json"]
//!
//! [sessions]
//! logs_dir = "~/.claude/projects"
//!
//! [launch]
//! command = "claude"
//!
//! [launch.env]
//! COLORTERM = "truecolor"
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{HangarConfig, LaunchConfig, ScanConfig, SessionsConfig};
pub use validation::validate_config;

impl HangarConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
