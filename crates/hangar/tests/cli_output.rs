//! Integration tests for CLI output behavior
//!
//! Every test runs the binary against a throwaway HOME, registry file and
//! session log directory. The default behavior is quiet (no logs). Use
//! -v/--verbose to enable logs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Sandbox {
    _dir: TempDir,
    home: PathBuf,
    work: PathBuf,
    code: PathBuf,
    logs: PathBuf,
    registry: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let home = dir.path().join("home");
        let work = dir.path().join("work");
        let code = dir.path().join("code");
        let logs = dir.path().join("logs");
        for d in [&home, &work, &code, &logs] {
            fs::create_dir_all(d).expect("Failed to create sandbox dir");
        }
        let registry = dir.path().join("projects.json");
        Self {
            _dir: dir,
            home,
            work,
            code,
            logs,
            registry,
        }
    }

    /// Write `~/.hangar/config.toml` scanning the sandbox code root.
    fn with_scan_config(self) -> Self {
        let config_dir = self.home.join(".hangar");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(
            config_dir.join("config.toml"),
            format!(
                "[scan]\nroots = [\"{}\"]\nmarkers = [\".git\"]\n",
                self.code.display()
            ),
        )
        .expect("Failed to write config");
        self
    }

    fn project_dir(&self, name: &str) -> PathBuf {
        let dir = self.code.join(name);
        fs::create_dir_all(dir.join(".git")).expect("Failed to create project dir");
        dir
    }

    fn write_session_log(&self, project: &Path, id: &str, content: &str) {
        let encoded = project.to_string_lossy().replace('/', "-");
        let dir = self.logs.join(encoded);
        fs::create_dir_all(&dir).expect("Failed to create log dir");
        fs::write(dir.join(format!("{id}.jsonl")), content).expect("Failed to write log");
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_hangar"))
            .args(args)
            .current_dir(&self.work)
            .env("HOME", &self.home)
            .env("HANGAR_PROJECTS_FILE", &self.registry)
            .env("HANGAR_SESSION_LOGS_DIR", &self.logs)
            .env_remove("RUST_LOG")
            .output()
            .unwrap_or_else(|e| panic!("Failed to execute 'hangar {}': {e}", args.join(" ")))
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "hangar {} failed with exit code {:?}. stderr: {}",
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn list_json(&self) -> Vec<serde_json::Value> {
        let stdout = self.run_ok(&["list", "--json"]);
        serde_json::from_str(&stdout).expect("stdout should be valid JSON")
    }
}

#[test]
fn test_list_stdout_is_clean() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.contains("No projects found."), "got: {}", stdout);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(stderr.is_empty(), "stderr should be empty in quiet mode, got: {}", stderr);
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["-v", "list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!stdout.contains(r#""event":"#));
    assert!(
        stderr.contains("cli.list_started"),
        "verbose mode should log to stderr, got: {}",
        stderr
    );
}

#[test]
fn test_list_json_empty_returns_empty_array() {
    let sandbox = Sandbox::new();
    assert!(sandbox.list_json().is_empty());
}

#[test]
fn test_scan_discovers_marked_directories() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.project_dir("beta");
    fs::create_dir_all(sandbox.code.join("notes")).unwrap();

    sandbox.run_ok(&["scan"]);

    let projects = sandbox.list_json();
    let names: Vec<&str> = projects
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(sandbox.registry.exists());
}

#[test]
fn test_rescan_keeps_project_ids() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");

    sandbox.run_ok(&["scan"]);
    let first = sandbox.list_json();
    sandbox.project_dir("beta");
    let stdout = sandbox.run_ok(&["scan"]);
    let second = sandbox.list_json();

    assert!(stdout.contains("2 project(s) known (+1"), "got: {}", stdout);
    assert_eq!(first[0]["id"], second[0]["id"]);
}

#[test]
fn test_add_then_list_and_reject_duplicate() {
    let sandbox = Sandbox::new();
    let dir = sandbox.work.join("manual");
    fs::create_dir_all(&dir).unwrap();

    let stdout = sandbox.run_ok(&["add", "manual", "--name", "Manual App"]);
    assert!(stdout.contains("Added project 'Manual App'"), "got: {}", stdout);

    let projects = sandbox.list_json();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["path"], dir.display().to_string());

    let output = sandbox.run(&["add", "manual"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already"));
}

#[test]
fn test_add_missing_directory_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["add", "does-not-exist"]);
    assert!(!output.status.success());
    assert!(sandbox.list_json().is_empty());
}

#[test]
fn test_remove_by_index() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.project_dir("beta");
    sandbox.run_ok(&["scan"]);

    let stdout = sandbox.run_ok(&["remove", "0"]);
    assert!(stdout.contains("Removed project 'alpha'"), "got: {}", stdout);

    let output = sandbox.run(&["remove", "7"]);
    assert!(!output.status.success());
}

#[test]
fn test_icon_set_and_clear() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.run_ok(&["scan"]);

    sandbox.run_ok(&["icon", "0", "rocket"]);
    assert_eq!(sandbox.list_json()[0]["icon"], "rocket");

    sandbox.run_ok(&["icon", "0"]);
    assert!(sandbox.list_json()[0].get("icon").is_none());
}

#[test]
fn test_sessions_json_reports_exact_counts() {
    let sandbox = Sandbox::new().with_scan_config();
    let project = sandbox.project_dir("alpha");
    sandbox.run_ok(&["scan"]);
    sandbox.write_session_log(
        &project,
        "abc-123",
        "{\"type\":\"summary\"}\n{\"type\":\"user\",\"message\":{\"content\":\"  fix the\\nbuild  \"}}\n\n{\"type\":\"assistant\"}\n",
    );

    let stdout = sandbox.run_ok(&["sessions", "0", "--json"]);
    let sessions: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], "abc-123");
    assert_eq!(sessions[0]["message_count"], 3);
    assert_eq!(sessions[0]["message_count_is_exact"], true);
    assert_eq!(sessions[0]["first_user_message"], "fix the build");
}

#[test]
fn test_sessions_without_logs() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.run_ok(&["scan"]);

    let stdout = sandbox.run_ok(&["sessions", "0"]);
    assert!(stdout.contains("No recorded sessions for 'alpha'."), "got: {}", stdout);
}

#[test]
fn test_open_dry_run_prints_command_and_marks_opened() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.project_dir("beta");
    sandbox.run_ok(&["scan"]);

    let stdout = sandbox.run_ok(&["open", "1", "--dry-run"]);
    assert!(stdout.contains("COLORTERM=truecolor claude --continue"), "got: {}", stdout);

    // Most recently opened sorts first
    let projects = sandbox.list_json();
    assert_eq!(projects[0]["name"], "beta");
    assert!(projects[0]["lastOpened"].is_string());
    assert!(projects[1].get("lastOpened").is_none());
}

#[test]
fn test_open_resume_quotes_session_id() {
    let sandbox = Sandbox::new().with_scan_config();
    sandbox.project_dir("alpha");
    sandbox.run_ok(&["scan"]);

    let stdout = sandbox.run_ok(&["open", "0", "--resume", "a b", "--dry-run"]);
    assert!(stdout.contains("claude --resume 'a b'"), "got: {}", stdout);

    let stdout = sandbox.run_ok(&["open", "0", "--fresh", "--dry-run"]);
    assert!(stdout.trim_end().ends_with("claude"), "got: {}", stdout);
}

#[test]
fn test_open_runs_configured_command() {
    let sandbox = Sandbox::new().with_scan_config();
    let project = sandbox.project_dir("alpha");
    sandbox.run_ok(&["scan"]);
    let config = sandbox.home.join(".hangar").join("config.toml");
    let mut content = fs::read_to_string(&config).unwrap();
    content.push_str("\n[launch]\ncommand = \"touch\"\ncontinue_flag = \"opened.txt\"\n");
    fs::write(&config, content).unwrap();

    sandbox.run_ok(&["open", "0"]);

    assert!(project.join("opened.txt").exists());
}

#[test]
fn test_invalid_config_warns_and_uses_defaults() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.work.join(".hangar");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "invalid toml [[[").unwrap();

    let output = sandbox.run(&["list"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("Tip: Check"), "got: {}", stderr);
}
