//! Foreground process host for the CLI.
//!
//! Each surface is a child process that shares this terminal, so the CLI can
//! only attach to one session at a time.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;
use std::process::{Child, ExitStatus};

use hangar_core::coordinator::{SurfaceError, SurfaceHandle, SurfaceHost, SyntheticKey};
use hangar_core::escape::shell_quote;
use tracing::{info, warn};

pub struct ProcessSurfaceHost {
    dry_run: bool,
    children: HashMap<SurfaceHandle, Child>,
    next_id: u64,
}

impl ProcessSurfaceHost {
    /// With `dry_run`, surfaces print their command line instead of running it.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            children: HashMap::new(),
            next_id: 0,
        }
    }

    /// Block until the surface's process exits.
    ///
    /// Returns `None` for dry-run or already released surfaces.
    pub fn wait(&mut self, surface: &SurfaceHandle) -> io::Result<Option<ExitStatus>> {
        match self.children.get_mut(surface) {
            Some(child) => child.wait().map(Some),
            None => Ok(None),
        }
    }
}

/// `cd <dir> && KEY=value ... <command>`, as a copy-pastable shell line.
pub fn command_line(
    working_directory: &Path,
    env: &BTreeMap<String, String>,
    startup_command: &str,
) -> String {
    let mut parts = vec![
        "cd".to_string(),
        shell_quote(&working_directory.display().to_string()),
        "&&".to_string(),
    ];
    parts.extend(env.iter().map(|(k, v)| format!("{}={}", k, shell_quote(v))));
    parts.push(startup_command.to_string());
    parts.join(" ")
}

impl SurfaceHost for ProcessSurfaceHost {
    fn create_surface(
        &mut self,
        working_directory: &Path,
        env: &BTreeMap<String, String>,
        startup_command: &str,
    ) -> Result<SurfaceHandle, SurfaceError> {
        self.next_id += 1;
        let handle = SurfaceHandle::new(format!("process-{}", self.next_id));

        if self.dry_run {
            println!("{}", command_line(working_directory, env, startup_command));
            return Ok(handle);
        }

        let child = std::process::Command::new("sh")
            .arg("-c")
            .arg(startup_command)
            .current_dir(working_directory)
            .envs(env)
            .spawn()
            .map_err(|e| SurfaceError::CreateFailed {
                message: format!("'{}' in {}: {}", startup_command, working_directory.display(), e),
            })?;

        info!(
            event = "cli.surface.spawned",
            surface = %handle,
            pid = child.id(),
            command = startup_command
        );

        self.children.insert(handle.clone(), child);
        Ok(handle)
    }

    fn send_key(&mut self, surface: &SurfaceHandle, _key: SyntheticKey) -> Result<(), SurfaceError> {
        Err(SurfaceError::SendFailed {
            surface: surface.to_string(),
            message: "foreground sessions read keys from the terminal directly".to_string(),
        })
    }

    fn close_surface(&mut self, surface: &SurfaceHandle) {
        let Some(mut child) = self.children.remove(surface) else {
            return;
        };
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        if let Err(e) = child.kill() {
            warn!(event = "cli.surface.kill_failed", surface = %surface, error = %e);
        }
        let _ = child.wait();
    }
}
