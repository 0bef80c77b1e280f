//! Background project discovery.
//!
//! The worker only runs [`discover_projects`]; the owning context applies
//! the result with [`super::ProjectRegistry::apply_scan`] so that the merge
//! and selection update happen in one step on the serial mutator.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use super::scan::discover_projects;

pub struct ScanWorker {
    receiver: Receiver<Vec<PathBuf>>,
    handle: Option<JoinHandle<()>>,
}

impl ScanWorker {
    /// Start discovery on a new thread.
    pub fn spawn(roots: Vec<PathBuf>, markers: Vec<String>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            let found = discover_projects(&roots, &markers);
            // Receiver may have been dropped; the result is simply discarded.
            let _ = sender.send(found);
        });

        tracing::debug!(event = "core.projects.scan_worker_started");

        Self {
            receiver,
            handle: Some(handle),
        }
    }

    /// Non-blocking poll. Returns `None` while discovery is still running.
    pub fn try_result(&mut self) -> Option<Vec<PathBuf>> {
        match self.receiver.try_recv() {
            Ok(found) => {
                self.join();
                Some(found)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!(event = "core.projects.scan_worker_disconnected");
                self.join();
                Some(Vec::new())
            }
        }
    }

    /// Block until discovery finishes.
    ///
    /// A worker that died without reporting yields an empty result.
    pub fn wait(mut self) -> Vec<PathBuf> {
        let found = match self.receiver.recv() {
            Ok(found) => found,
            Err(_) => {
                tracing::error!(event = "core.projects.scan_worker_disconnected");
                Vec::new()
            }
        };
        self.join();
        found
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!(event = "core.projects.scan_worker_panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_worker_delivers_discovery_result() {
        let root = TempDir::new().unwrap();
        let project = root.path().join("app");
        std::fs::create_dir_all(project.join(".git")).unwrap();

        let worker = ScanWorker::spawn(vec![root.path().to_path_buf()], vec![".git".to_string()]);
        assert_eq!(worker.wait(), vec![project]);
    }

    #[test]
    fn test_try_result_eventually_returns() {
        let mut worker = ScanWorker::spawn(vec![], vec![".git".to_string()]);
        let mut result = None;
        for _ in 0..200 {
            result = worker.try_result();
            if result.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(result, Some(Vec::new()));
    }
}
