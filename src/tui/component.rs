use crate::tui::action::Action;
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for TUI components
///
/// Interactive elements implement this trait so the event loop can route
/// actions and render them uniformly.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was consumed, Ok(false) if it should
    /// propagate.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Actions this component responds to
    fn supported_actions(&self) -> &[Action];

    /// Component name for logging
    fn name(&self) -> &str;
}
