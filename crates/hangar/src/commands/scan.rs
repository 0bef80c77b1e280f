use clap::ArgMatches;
use tracing::info;

use hangar_core::ProjectRegistry;
use hangar_core::RegistrySettings;
use hangar_core::projects::LoadSource;

use super::helpers::load_config_with_warning;

pub(crate) fn handle_scan_command(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.scan_started");

    let config = load_config_with_warning();
    let mut registry = ProjectRegistry::new(RegistrySettings::from_config(&config));
    let before = match registry.load() {
        // A first load already scanned, so everything counts as new
        LoadSource::Scanned => 0,
        LoadSource::Persisted => {
            let before = registry.len();
            let worker = registry.start_background_scan();
            registry.apply_scan(worker.wait());
            before
        }
    };

    println!(
        "Scanned {} root(s): {} project(s) known ({:+} since last scan).",
        config.scan.roots().len(),
        registry.len(),
        registry.len() as i64 - before as i64
    );

    info!(
        event = "cli.scan_completed",
        count = registry.len(),
        previous = before
    );
    Ok(())
}
