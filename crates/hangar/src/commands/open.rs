use clap::ArgMatches;
use tracing::{error, info, warn};

use hangar_core::coordinator::SurfaceHandle;
use hangar_core::{LaunchCommands, LaunchMode, SessionCoordinator, events};

use super::helpers::{load_config_with_warning, load_registry, resolve_project};
use crate::terminal::ProcessSurfaceHost;

pub(crate) fn handle_open_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let dry_run = matches.get_flag("dry-run");
    let mode = if matches.get_flag("fresh") {
        LaunchMode::Fresh
    } else if let Some(session_id) = matches.get_one::<String>("resume") {
        LaunchMode::Resume(session_id.clone())
    } else {
        LaunchMode::Continue
    };

    let config = load_config_with_warning();
    let registry = load_registry(&config);
    let project = resolve_project(&registry, matches)?;

    info!(
        event = "cli.open_started",
        project_id = project.id(),
        mode = ?mode,
        dry_run = dry_run
    );

    let mut coordinator = SessionCoordinator::new(
        registry,
        ProcessSurfaceHost::new(dry_run),
        LaunchCommands::from_config(&config.launch),
    );

    if let Err(e) = coordinator.launch_project(&project, mode) {
        eprintln!("Failed to open '{}': {}", project.name(), e);
        error!(event = "cli.open_failed", project_id = project.id(), error = %e);
        events::log_app_error(&e);
        return Err(e.into());
    }

    let surfaces: Vec<SurfaceHandle> = coordinator
        .sessions()
        .iter()
        .map(|s| s.surface.clone())
        .collect();
    for surface in &surfaces {
        match coordinator.host_mut().wait(surface) {
            Ok(Some(status)) => {
                info!(event = "cli.open_session_exited", surface = %surface, code = ?status.code())
            }
            Ok(None) => {}
            Err(e) => warn!(event = "cli.open_wait_failed", surface = %surface, error = %e),
        }
    }

    while !coordinator.sessions().is_empty() {
        coordinator.close_current_session();
    }

    info!(event = "cli.open_completed", project_id = project.id());
    events::log_app_shutdown();
    Ok(())
}
