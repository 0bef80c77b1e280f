use clap::ArgMatches;
use tracing::error;

use hangar_core::events;

mod helpers;

mod add;
mod icon;
mod list;
mod open;
mod remove;
mod scan;
mod sessions;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("scan", sub_matches)) => scan::handle_scan_command(sub_matches),
        Some(("add", sub_matches)) => add::handle_add_command(sub_matches),
        Some(("remove", sub_matches)) => remove::handle_remove_command(sub_matches),
        Some(("icon", sub_matches)) => icon::handle_icon_command(sub_matches),
        Some(("sessions", sub_matches)) => sessions::handle_sessions_command(sub_matches),
        Some(("open", sub_matches)) => open::handle_open_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
