use serde::{Deserialize, Serialize};

/// Actions the selection menu responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    Home,
    End,

    // Menu
    Confirm,
    Cancel,

    // Clipboard
    Copy,

    // Application
    Quit,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Previous entry",
            Action::MoveDown => "Next entry",
            Action::Home => "First entry",
            Action::End => "Last entry",
            Action::Confirm => "Run selected entry",
            Action::Cancel => "Close menu",
            Action::Copy => "Copy selection",
            Action::Quit => "Quit application",
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::Home,
            Action::End,
            Action::Confirm,
            Action::Cancel,
            Action::Copy,
            Action::Quit,
        ]
    }
}
