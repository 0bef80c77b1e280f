use clap::ArgMatches;
use tracing::info;

use super::helpers::{load_config_with_warning, load_registry, resolve_project};

pub(crate) fn handle_icon_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let icon = matches.get_one::<String>("icon").cloned();

    let config = load_config_with_warning();
    let mut registry = load_registry(&config);
    let project = resolve_project(&registry, matches)?;

    registry.set_icon(project.id(), icon.clone())?;

    match icon {
        Some(icon) => println!("Set icon of '{}' to {}", project.name(), icon),
        None => println!("Cleared icon of '{}'", project.name()),
    }

    info!(event = "cli.icon_completed", id = project.id());
    Ok(())
}
