//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use briefly_core::Session;

use crate::action::{Action, Notice};
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Latest notice.
    pub notice: Notice,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            notice: Notice::info("Paste or type your text, then press Ctrl+S to summarize."),
        }
    }

    fn badge(session: &Session) -> &'static str {
        if session.is_submitting() {
            "Working"
        } else if session.result().is_some() {
            "Done"
        } else {
            "Ready"
        }
    }
}

impl Default for StatusBarComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action, _session: &mut Session) -> Option<Action> {
        if let Action::Notify(notice) = action {
            self.notice = notice.clone();
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = "q·?·^S·^L·^Y";
        let hints_len = hints.chars().count() + 1;

        let badge = Self::badge(session);
        let badge_len = badge.len() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg = truncate(&self.notice.message, msg_budget);

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(
                msg,
                Style::default().fg(Theme::notice_color(self.notice.level)),
            ),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
    }
}

/// Cut `message` to `budget` characters, ending with "..." when shortened.
fn truncate(message: &str, budget: usize) -> String {
    if message.chars().count() <= budget {
        return message.to_string();
    }
    if budget <= 3 {
        return String::new();
    }
    let kept: String = message.chars().take(budget - 3).collect();
    format!("{kept}...")
}
