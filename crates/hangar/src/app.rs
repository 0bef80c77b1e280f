use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("hangar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep a registry of projects and launch AI coding sessions in them")
        .long_about("Hangar discovers project directories, remembers which ones you opened last, lists the sessions recorded for each project, and starts a session in the project directory (continuing the last one, starting fresh, or resuming a specific session).")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List known projects, most recently opened first")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("scan")
                .about("Scan the configured roots for projects and merge them into the registry")
        )
        .subcommand(
            Command::new("add")
                .about("Register a project directory manually")
                .arg(
                    Arg::new("path")
                        .help("Project directory")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Display name (defaults to the directory name)")
                )
        )
        .subcommand(
            Command::new("remove")
                .about("Forget a project (the directory is not touched)")
                .arg(project_arg())
        )
        .subcommand(
            Command::new("icon")
                .about("Set or clear a project's icon")
                .arg(project_arg())
                .arg(
                    Arg::new("icon")
                        .help("Icon to show next to the project; omit to clear")
                        .index(2)
                )
        )
        .subcommand(
            Command::new("sessions")
                .about("List recorded sessions for a project, newest first")
                .arg(project_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("open")
                .about("Start a session in a project and attach this terminal to it")
                .arg(project_arg())
                .arg(
                    Arg::new("fresh")
                        .long("fresh")
                        .help("Start a new session instead of continuing the last one")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("resume")
                )
                .arg(
                    Arg::new("resume")
                        .long("resume")
                        .short('r')
                        .help("Resume a specific recorded session by id")
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the command that would run instead of running it")
                        .action(ArgAction::SetTrue)
                )
        )
}

fn project_arg() -> Arg {
    Arg::new("project")
        .help("Project index (as shown by 'hangar list') or path")
        .required(true)
        .index(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "hangar");
    }

    #[test]
    fn test_cli_verify() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_open_modes() {
        let matches = build_cli()
            .try_get_matches_from(["hangar", "open", "2", "--resume", "abc"])
            .unwrap();
        let sub = matches.subcommand_matches("open").unwrap();
        assert_eq!(sub.get_one::<String>("project").unwrap(), "2");
        assert_eq!(sub.get_one::<String>("resume").unwrap(), "abc");
        assert!(!sub.get_flag("fresh"));
    }

    #[test]
    fn test_fresh_conflicts_with_resume() {
        let result =
            build_cli().try_get_matches_from(["hangar", "open", "0", "--fresh", "--resume", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let matches = build_cli()
            .try_get_matches_from(["hangar", "list", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_icon_is_optional() {
        let matches = build_cli()
            .try_get_matches_from(["hangar", "icon", "0"])
            .unwrap();
        let sub = matches.subcommand_matches("icon").unwrap();
        assert!(sub.get_one::<String>("icon").is_none());
    }
}
