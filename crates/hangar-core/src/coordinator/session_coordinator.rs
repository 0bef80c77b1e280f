use std::sync::mpsc::{self, Receiver, Sender};

use super::errors::CoordinatorError;
use super::input::{Button, ButtonAction};
use super::store::{Command, CoordinatorEvent, Store};
use super::surface::{SurfaceHandle, SurfaceHost, SyntheticKey};
use super::types::{LaunchCommands, LaunchMode, RuntimeSession, ViewMode};
use crate::projects::{Project, ProjectError, ProjectRegistry, navigation};

/// Runtime state machine for open session tabs.
///
/// Owns the project registry (to stamp launches) and the surface host (to
/// create and release terminals). All methods run on the caller's serial
/// context.
///
/// Invariants:
/// - `selected_index < sessions.len()` whenever sessions exist, else `0`.
/// - In [`ViewMode::Session`], `active_project_id` is the selected tab's
///   project id.
/// - At most one tab per project is created by launches; teleport tabs are
///   the only way to get a second tab for the same project.
pub struct SessionCoordinator<H: SurfaceHost> {
    registry: ProjectRegistry,
    host: H,
    commands: LaunchCommands,
    view_mode: ViewMode,
    active_project_id: Option<String>,
    sessions: Vec<RuntimeSession>,
    selected_index: usize,
    activation_order: Vec<String>,
    subscribers: Vec<Sender<CoordinatorEvent>>,
}

impl<H: SurfaceHost> SessionCoordinator<H> {
    pub fn new(registry: ProjectRegistry, host: H, commands: LaunchCommands) -> Self {
        Self {
            registry,
            host,
            commands,
            view_mode: ViewMode::Launcher,
            active_project_id: None,
            sessions: Vec::new(),
            selected_index: 0,
            activation_order: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Open a tab for `project`, or switch to its existing tab.
    ///
    /// Always ends in [`ViewMode::Session`] and stamps the project as opened.
    ///
    /// # Errors
    /// Returns `CoordinatorError::Surface` if the host could not create a
    /// terminal. State is left unchanged in that case.
    pub fn launch_project(
        &mut self,
        project: &Project,
        mode: LaunchMode,
    ) -> Result<Vec<CoordinatorEvent>, CoordinatorError> {
        let mut events = Vec::new();

        if let Some(index) = self
            .sessions
            .iter()
            .position(|s| s.project_id() == project.id())
        {
            tracing::info!(
                event = "core.coordinator.launch_existing",
                project_id = project.id(),
                index = index
            );
            self.select(index, &mut events);
        } else {
            let command = self.commands.for_mode(&mode);
            self.open_tab(project.clone(), &command, &mut events)?;
        }

        self.set_view_mode(ViewMode::Session, &mut events);
        self.stamp_opened(project.id());
        self.publish(&events);
        Ok(events)
    }

    pub fn launch_fresh_session(
        &mut self,
        project: &Project,
    ) -> Result<Vec<CoordinatorEvent>, CoordinatorError> {
        self.launch_project(project, LaunchMode::Fresh)
    }

    pub fn resume_session(
        &mut self,
        project: &Project,
        session_id: &str,
    ) -> Result<Vec<CoordinatorEvent>, CoordinatorError> {
        self.launch_project(project, LaunchMode::Resume(session_id.to_string()))
    }

    /// Open an extra tab on the active project that teleports `session_id`.
    ///
    /// # Errors
    /// - `NoActiveProject` when no project is active. Nothing changes.
    /// - `Surface` if the host could not create a terminal.
    pub fn teleport_to_session(
        &mut self,
        session_id: &str,
    ) -> Result<Vec<CoordinatorEvent>, CoordinatorError> {
        let project = self
            .active_project_id
            .as_deref()
            .and_then(|id| self.sessions.iter().find(|s| s.project_id() == id))
            .map(|s| s.project.clone());

        let Some(project) = project else {
            tracing::warn!(
                event = "core.coordinator.teleport_skipped",
                session_id = session_id,
                "No active project to teleport into"
            );
            return Err(CoordinatorError::NoActiveProject);
        };

        let mut events = Vec::new();
        let command = self.commands.teleport(session_id);
        self.open_tab(project.clone(), &command, &mut events)?;
        self.set_view_mode(ViewMode::Session, &mut events);
        self.stamp_opened(project.id());
        self.publish(&events);
        Ok(events)
    }

    /// Close the tab at `index` and go back to the launcher.
    ///
    /// An out-of-range index only returns to the launcher.
    pub fn close_session(&mut self, index: usize) -> Vec<CoordinatorEvent> {
        if index >= self.sessions.len() {
            tracing::debug!(
                event = "core.coordinator.close_out_of_range",
                index = index,
                count = self.sessions.len()
            );
            return self.return_to_launcher();
        }

        let mut events = Vec::new();
        let removed = self.sessions.remove(index);
        self.host.close_surface(&removed.surface);

        if !self
            .sessions
            .iter()
            .any(|s| s.project_id() == removed.project_id())
        {
            self.activation_order.retain(|id| id != removed.project_id());
        }

        if self.sessions.is_empty() {
            self.active_project_id = None;
            self.selected_index = 0;
        } else {
            if self.selected_index >= self.sessions.len() {
                self.selected_index = self.sessions.len() - 1;
            } else if index < self.selected_index {
                self.selected_index -= 1;
            }
            self.active_project_id = Some(self.sessions[self.selected_index].project_id().to_string());
        }

        tracing::info!(
            event = "core.coordinator.session_closed",
            session_id = %removed.id,
            project_id = removed.project_id(),
            remaining = self.sessions.len()
        );

        events.push(CoordinatorEvent::SessionClosed {
            session_id: removed.id.clone(),
            project_id: removed.project_id().to_string(),
        });
        self.set_view_mode(ViewMode::Launcher, &mut events);
        self.publish(&events);
        events
    }

    pub fn close_current_session(&mut self) -> Vec<CoordinatorEvent> {
        self.close_session(self.selected_index)
    }

    /// Bring the tab at `index` to the front. Out-of-range is a no-op.
    pub fn switch_to_session(&mut self, index: usize) -> Vec<CoordinatorEvent> {
        if index >= self.sessions.len() {
            tracing::debug!(
                event = "core.coordinator.switch_out_of_range",
                index = index,
                count = self.sessions.len()
            );
            return Vec::new();
        }

        let mut events = Vec::new();
        self.select(index, &mut events);
        self.set_view_mode(ViewMode::Session, &mut events);
        self.publish(&events);
        events
    }

    pub fn next(&mut self) -> Vec<CoordinatorEvent> {
        self.cycle(1)
    }

    pub fn previous(&mut self) -> Vec<CoordinatorEvent> {
        self.cycle(-1)
    }

    /// Show the launcher. Open tabs stay alive for a later switch.
    pub fn return_to_launcher(&mut self) -> Vec<CoordinatorEvent> {
        let mut events = Vec::new();
        self.set_view_mode(ViewMode::Launcher, &mut events);
        self.publish(&events);
        events
    }

    /// Apply a global button press.
    ///
    /// Returns `None` when the coordinator does not handle the button, so the
    /// view in front can interpret it. Confirm and cancel are only handled
    /// while a session is in front.
    pub fn handle_button(&mut self, button: Button) -> Option<Vec<CoordinatorEvent>> {
        match button.action()? {
            ButtonAction::ReturnToLauncher => Some(self.return_to_launcher()),
            ButtonAction::PreviousSession => Some(self.previous()),
            ButtonAction::NextSession => Some(self.next()),
            ButtonAction::ForwardConfirm => self.forward_key(SyntheticKey::Enter),
            ButtonAction::ForwardCancel => self.forward_key(SyntheticKey::Escape),
        }
    }

    /// Record output on a surface that is not in front.
    ///
    /// The flag is cleared when the tab is selected again.
    pub fn mark_activity(&mut self, surface: &SurfaceHandle) -> Vec<CoordinatorEvent> {
        let Some(index) = self.sessions.iter().position(|s| &s.surface == surface) else {
            tracing::debug!(event = "core.coordinator.activity_unknown_surface", surface = %surface);
            return Vec::new();
        };

        let in_front = self.view_mode == ViewMode::Session && index == self.selected_index;
        if in_front || self.sessions[index].has_activity {
            return Vec::new();
        }

        self.sessions[index].has_activity = true;
        let project_id = self.sessions[index].project_id().to_string();
        self.sync_project_activity(&project_id, true);

        let events = vec![CoordinatorEvent::ActivityChanged {
            session_id: self.sessions[index].id.clone(),
            has_activity: true,
        }];
        self.publish(&events);
        events
    }

    /// Receive every event this coordinator emits from now on.
    ///
    /// Dropped receivers are pruned on the next publish.
    pub fn subscribe(&mut self) -> Receiver<CoordinatorEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sessions(&self) -> &[RuntimeSession] {
        &self.sessions
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_session(&self) -> Option<&RuntimeSession> {
        self.sessions.get(self.selected_index)
    }

    pub fn active_project_id(&self) -> Option<&str> {
        self.active_project_id.as_deref()
    }

    /// Distinct project ids in the order they were first opened.
    pub fn activation_order(&self) -> &[String] {
        &self.activation_order
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProjectRegistry {
        &mut self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn open_tab(
        &mut self,
        project: Project,
        command: &str,
        events: &mut Vec<CoordinatorEvent>,
    ) -> Result<(), CoordinatorError> {
        let surface = self
            .host
            .create_surface(project.path(), self.commands.env(), command)
            .inspect_err(|e| {
                tracing::error!(
                    event = "core.coordinator.surface_create_failed",
                    project_id = project.id(),
                    error = %e
                );
            })?;

        let session = RuntimeSession::new(project, surface);
        let project_id = session.project_id().to_string();

        tracing::info!(
            event = "core.coordinator.session_launched",
            session_id = %session.id,
            project_id = %project_id,
            surface = %session.surface,
            command = command
        );

        events.push(CoordinatorEvent::SessionLaunched {
            session_id: session.id.clone(),
            project_id: project_id.clone(),
            command: command.to_string(),
        });

        self.sessions.push(session);
        if !self.activation_order.contains(&project_id) {
            self.activation_order.push(project_id);
        }
        self.select(self.sessions.len() - 1, events);
        Ok(())
    }

    fn select(&mut self, index: usize, events: &mut Vec<CoordinatorEvent>) {
        self.selected_index = index;
        let session = &mut self.sessions[index];
        let project_id = session.project_id().to_string();
        self.active_project_id = Some(project_id.clone());

        if session.has_activity {
            session.has_activity = false;
            events.push(CoordinatorEvent::ActivityChanged {
                session_id: session.id.clone(),
                has_activity: false,
            });
            self.sync_project_activity(&project_id, false);
        }

        events.push(CoordinatorEvent::SessionSelected { index, project_id });
    }

    fn cycle(&mut self, delta: isize) -> Vec<CoordinatorEvent> {
        if self.sessions.is_empty() {
            return Vec::new();
        }
        let index = navigation::wrap_index(self.selected_index, delta, self.sessions.len());
        self.switch_to_session(index)
    }

    fn forward_key(&mut self, key: SyntheticKey) -> Option<Vec<CoordinatorEvent>> {
        if self.view_mode != ViewMode::Session {
            return None;
        }
        let session = self.sessions.get(self.selected_index)?;

        if let Err(e) = self.host.send_key(&session.surface, key) {
            tracing::warn!(
                event = "core.coordinator.key_forward_failed",
                session_id = %session.id,
                error = %e
            );
            return Some(Vec::new());
        }

        let events = vec![CoordinatorEvent::KeyForwarded {
            session_id: session.id.clone(),
            key,
        }];
        self.publish(&events);
        Some(events)
    }

    fn set_view_mode(&mut self, mode: ViewMode, events: &mut Vec<CoordinatorEvent>) {
        if self.view_mode != mode {
            self.view_mode = mode;
            events.push(CoordinatorEvent::ViewModeChanged { mode });
        }
    }

    fn stamp_opened(&mut self, project_id: &str) {
        match self.registry.mark_opened(project_id) {
            Ok(()) => {}
            Err(ProjectError::NotFound) => {
                tracing::debug!(event = "core.coordinator.unregistered_project", project_id = project_id);
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.coordinator.mark_opened_failed",
                    project_id = %project_id,
                    error = %e
                );
            }
        }
    }

    fn sync_project_activity(&mut self, project_id: &str, active: bool) {
        match self.registry.set_activity(project_id, active) {
            Ok(()) | Err(ProjectError::NotFound) => {}
            Err(e) => {
                tracing::warn!(
                    event = "core.coordinator.activity_persist_failed",
                    project_id = %project_id,
                    error = %e
                );
            }
        }
    }

    fn publish(&mut self, events: &[CoordinatorEvent]) {
        if events.is_empty() {
            return;
        }
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }
}

impl<H: SurfaceHost> Store for SessionCoordinator<H> {
    type Error = CoordinatorError;

    fn dispatch(&mut self, cmd: Command) -> Result<Vec<CoordinatorEvent>, CoordinatorError> {
        tracing::debug!(event = "core.coordinator.dispatch_started", command = ?cmd);

        let result = match cmd {
            Command::LaunchProject { project, mode } => self.launch_project(&project, mode),
            Command::LaunchFreshSession { project } => self.launch_fresh_session(&project),
            Command::ResumeSession {
                project,
                session_id,
            } => self.resume_session(&project, &session_id),
            Command::TeleportToSession { session_id } => self.teleport_to_session(&session_id),
            Command::CloseCurrentSession => Ok(self.close_current_session()),
            Command::CloseSession { index } => Ok(self.close_session(index)),
            Command::SwitchToSession { index } => Ok(self.switch_to_session(index)),
            Command::NextSession => Ok(self.next()),
            Command::PreviousSession => Ok(self.previous()),
            Command::ReturnToLauncher => Ok(self.return_to_launcher()),
            Command::Button(button) => Ok(self.handle_button(button).unwrap_or_default()),
        };

        match &result {
            Ok(events) => {
                tracing::debug!(event = "core.coordinator.dispatch_completed", events = events.len())
            }
            Err(e) => tracing::error!(event = "core.coordinator.dispatch_failed", error = %e),
        }

        result
    }
}
