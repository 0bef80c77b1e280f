use clap::ArgMatches;
use tracing::{error, info};

use hangar_core::events;

use super::helpers::{load_config_with_warning, load_registry, resolve_project_index};

pub(crate) fn handle_remove_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let mut registry = load_registry(&config);
    let index = resolve_project_index(&registry, matches)?;

    info!(event = "cli.remove_started", index = index);

    match registry.remove(index) {
        Ok(Some(project)) => {
            println!(
                "Removed project '{}' ({})",
                project.name(),
                project.path().display()
            );
            info!(event = "cli.remove_completed", id = project.id());
            Ok(())
        }
        Ok(None) => Err(format!("No project at index {}", index).into()),
        Err(e) => {
            eprintln!("Failed to remove project: {}", e);
            error!(event = "cli.remove_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
