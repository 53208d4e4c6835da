//! Component trait and all TUI components.
//!
//! Components keep only view state (focus, cursor, scroll, dropdowns).
//! The text, selections and request state live in the shared `Session`.

pub mod help;
pub mod status_bar;
pub mod summary_form;
pub mod summary_output;

use ratatui::layout::Rect;
use ratatui::Frame;

use briefly_core::Session;

use crate::action::Action;

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action, session: &mut Session) -> Option<Action> {
        let _ = (action, session);
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, session: &Session);
}

/// Braille spinner frames, advanced once per tick.
pub(crate) const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Whether a terminal cell falls inside `rect`.
pub(crate) fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}
