use chrono::Utc;
use clap::ArgMatches;
use tracing::info;

use hangar_core::SessionCatalog;

use super::helpers::{load_config_with_warning, load_registry, resolve_project};

pub(crate) fn handle_sessions_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let config = load_config_with_warning();
    let registry = load_registry(&config);
    let project = resolve_project(&registry, matches)?;

    info!(
        event = "cli.sessions_started",
        project_id = project.id(),
        json_output = json_output
    );

    let catalog = SessionCatalog::from_config(&config);
    let sessions = catalog.list(project.path());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else if sessions.is_empty() {
        println!("No recorded sessions for '{}'.", project.name());
    } else {
        println!("Sessions for '{}':", project.name());
        let formatter = crate::table::SessionTableFormatter::new(&sessions);
        formatter.print_table(&sessions, Utc::now());
    }

    info!(event = "cli.sessions_completed", count = sessions.len());
    Ok(())
}
