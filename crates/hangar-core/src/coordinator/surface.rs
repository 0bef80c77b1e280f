//! Boundary to the terminal engine that hosts session surfaces.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::SurfaceError;

/// Opaque identifier of a terminal surface, assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(String);

impl SurfaceHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keypresses the coordinator can synthesize into a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntheticKey {
    Enter,
    Escape,
}

/// Capability the terminal engine provides to the coordinator.
///
/// Implementations create and own the real terminals; the coordinator only
/// keeps the handles.
pub trait SurfaceHost {
    /// Create a surface running `startup_command` in `working_directory`.
    fn create_surface(
        &mut self,
        working_directory: &Path,
        env: &BTreeMap<String, String>,
        startup_command: &str,
    ) -> Result<SurfaceHandle, SurfaceError>;

    /// Deliver a synthetic keypress to a surface's input stream.
    fn send_key(&mut self, surface: &SurfaceHandle, key: SyntheticKey) -> Result<(), SurfaceError>;

    /// Release a surface. Failures are the host's to log; closing never blocks
    /// removing the session.
    fn close_surface(&mut self, surface: &SurfaceHandle);
}

/// Test utilities: a host that records every call.
#[doc(hidden)]
pub mod test_helpers {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    pub struct CreatedSurface {
        pub handle: SurfaceHandle,
        pub working_directory: PathBuf,
        pub env: BTreeMap<String, String>,
        pub command: String,
    }

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub created: Vec<CreatedSurface>,
        pub keys: Vec<(SurfaceHandle, SyntheticKey)>,
        pub closed: Vec<SurfaceHandle>,
        /// When set, `create_surface` fails with this message.
        pub fail_create: Option<String>,
        next_id: u64,
    }

    impl SurfaceHost for RecordingHost {
        fn create_surface(
            &mut self,
            working_directory: &Path,
            env: &BTreeMap<String, String>,
            startup_command: &str,
        ) -> Result<SurfaceHandle, SurfaceError> {
            if let Some(message) = &self.fail_create {
                return Err(SurfaceError::CreateFailed {
                    message: message.clone(),
                });
            }
            self.next_id += 1;
            let handle = SurfaceHandle::new(format!("surface-{}", self.next_id));
            self.created.push(CreatedSurface {
                handle: handle.clone(),
                working_directory: working_directory.to_path_buf(),
                env: env.clone(),
                command: startup_command.to_string(),
            });
            Ok(handle)
        }

        fn send_key(
            &mut self,
            surface: &SurfaceHandle,
            key: SyntheticKey,
        ) -> Result<(), SurfaceError> {
            self.keys.push((surface.clone(), key));
            Ok(())
        }

        fn close_surface(&mut self, surface: &SurfaceHandle) {
            self.closed.push(surface.clone());
        }
    }
}
