use serde::{Deserialize, Serialize};

/// Semantic buttons delivered by an input device.
///
/// Only `Home`, the shoulders, `Confirm` and `Cancel` mean anything to the
/// coordinator. The rest belong to whichever view is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Home,
    LeftShoulder,
    RightShoulder,
    Confirm,
    Cancel,
    Up,
    Down,
    Left,
    Right,
    Menu,
}

/// What the coordinator does with a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ReturnToLauncher,
    PreviousSession,
    NextSession,
    /// Forwarded as a synthetic keypress, only while a session is in front.
    ForwardConfirm,
    ForwardCancel,
}

impl Button {
    pub fn action(self) -> Option<ButtonAction> {
        match self {
            Button::Home => Some(ButtonAction::ReturnToLauncher),
            Button::LeftShoulder => Some(ButtonAction::PreviousSession),
            Button::RightShoulder => Some(ButtonAction::NextSession),
            Button::Confirm => Some(ButtonAction::ForwardConfirm),
            Button::Cancel => Some(ButtonAction::ForwardCancel),
            Button::Up | Button::Down | Button::Left | Button::Right | Button::Menu => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_buttons_have_actions() {
        assert_eq!(Button::Home.action(), Some(ButtonAction::ReturnToLauncher));
        assert_eq!(Button::LeftShoulder.action(), Some(ButtonAction::PreviousSession));
        assert_eq!(Button::RightShoulder.action(), Some(ButtonAction::NextSession));
    }

    #[test]
    fn test_navigation_buttons_left_for_views() {
        for button in [Button::Up, Button::Down, Button::Left, Button::Right, Button::Menu] {
            assert!(button.action().is_none());
        }
    }
}
