//! Help overlay with the keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use briefly_core::Session;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .split(area);

        let horizontal = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .split(vertical[0]);

        horizontal[0]
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action, _session: &mut Session) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Background traffic must not dismiss the overlay.
            Action::Tick | Action::Notify(_) | Action::SummaryFinished(_) => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 60, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("Ctrl+S / s", "Generate summary"),
            key_line("Ctrl+L / c", "Clear all"),
            key_line("Ctrl+Y / y", "Copy summary"),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("i", "Edit text"),
            key_line("Enter / Space", "Open picker / choose option"),
            key_line("Up / Down / j / k", "Move through options"),
            key_line("PgUp / PgDn", "Scroll summary"),
            key_line("Esc", "Close picker / leave text"),
            Line::from(""),
            Line::from(Span::styled("── While editing ──", Theme::header())),
            Line::from(""),
            key_line("Enter", "New line"),
            key_line("Ctrl+W", "Delete word"),
            key_line("Ctrl+V", "Paste from clipboard"),
            key_line("Ctrl+A / Ctrl+E", "Line start / end"),
            Line::from(""),
            Line::from(Span::styled(
                "  Mouse: click pickers, buttons and the text area.",
                Theme::muted(),
            )),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
