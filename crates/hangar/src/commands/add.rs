use clap::ArgMatches;
use tracing::{error, info};

use hangar_core::events;
use hangar_core::projects::types::derive_display_name;

use super::helpers::{absolute_path, load_config_with_warning, load_registry};

pub(crate) fn handle_add_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let raw_path = matches
        .get_one::<String>("path")
        .ok_or("Path argument is required")?;
    let path = absolute_path(raw_path)?;
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| derive_display_name(&path));

    info!(event = "cli.add_started", path = %path.display(), name = %name);

    let config = load_config_with_warning();
    let mut registry = load_registry(&config);

    match registry.add(name, path) {
        Ok(project) => {
            println!(
                "Added project '{}' ({})",
                project.name(),
                project.path().display()
            );
            info!(event = "cli.add_completed", id = project.id());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to add project: {}", e);
            error!(event = "cli.add_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
