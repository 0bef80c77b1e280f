use clap::ArgMatches;
use tracing::info;

use super::helpers::{load_config_with_warning, load_registry};

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let config = load_config_with_warning();
    let registry = load_registry(&config);
    let projects = registry.projects();

    if json_output {
        println!("{}", serde_json::to_string_pretty(projects)?);
    } else if projects.is_empty() {
        println!("No projects found.");
        println!("Add one with 'hangar add <path>' or configure [scan] roots and run 'hangar scan'.");
    } else {
        println!("Projects:");
        let formatter = crate::table::ProjectTableFormatter::new(projects);
        formatter.print_table(projects);
    }

    info!(event = "cli.list_completed", count = projects.len());
    Ok(())
}
