//! Output card: rendered summary, run details and the copy button.

use std::cell::Cell;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use briefly_core::{RequestState, Session, SummaryResult};

use crate::action::Action;
use crate::components::{hit, spinner_frame, Component};
use crate::markdown;
use crate::theme::Theme;

const COPY_LABEL: &str = " ⧉ Copy ";

pub struct SummaryOutputComponent {
    /// Rows scrolled off the top of the body.
    scroll: u16,
    tick: usize,
    /// Wrapped rows that did not fit in the body at the last render.
    max_scroll: Cell<u16>,
    copy_button: Cell<Rect>,
}

impl SummaryOutputComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            tick: 0,
            max_scroll: Cell::new(0),
            copy_button: Cell::new(Rect::default()),
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll.get());
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
    }

    fn details_line(result: &SummaryResult) -> Line<'static> {
        Line::from(vec![
            Span::styled("Input ", Theme::dim()),
            Span::styled(format!("{} chars", result.input_chars), Theme::muted()),
            Span::styled(" · Output ", Theme::dim()),
            Span::styled(format!("{} chars", result.output_chars), Theme::muted()),
            Span::styled(" · Time ", Theme::dim()),
            Span::styled(
                format!("{:.0} ms", result.processing_time_ms),
                Theme::muted(),
            ),
            Span::styled(" · ", Theme::dim()),
            Span::styled(
                result.completed_at.format("%H:%M:%S").to_string(),
                Theme::muted(),
            ),
        ])
    }

    fn render_placeholder(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Your summary will appear here", Theme::header())),
            Line::from(""),
            Line::from(Span::styled(
                "Enter text and choose your preferred style to get started",
                Theme::muted(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(spinner_frame(self.tick), Theme::title()),
                Span::styled(" Generating your summary...", Theme::header()),
            ]),
            Line::from(""),
            Line::from(Span::styled("This may take a few seconds", Theme::muted())),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            area,
        );
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
        let body = Paragraph::new(lines).wrap(Wrap { trim: false });
        let rows = body.line_count(area.width);
        let max_scroll = rows.saturating_sub(usize::from(area.height));
        let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
        self.max_scroll.set(max_scroll);
        frame.render_widget(body.scroll((self.scroll.min(max_scroll), 0)), area);
    }
}

impl Default for SummaryOutputComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SummaryOutputComponent {
    fn handle_action(&mut self, action: &Action, session: &mut Session) -> Option<Action> {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                None
            }
            Action::ScrollOutput(delta) => {
                self.scroll_by(*delta);
                None
            }
            Action::SubmitForm | Action::SummaryFinished(_) | Action::ClearAll => {
                self.scroll = 0;
                None
            }
            Action::Click { column, row }
                if session.has_output() && hit(self.copy_button.get(), *column, *row) =>
            {
                Some(Action::CopySummary)
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let (border_color, icon) = match session.state() {
            RequestState::Succeeded(result) => (
                Theme::style_color(result.style),
                Some(Span::styled(
                    format!("{} ", Theme::style_icon(result.style)),
                    Style::default().fg(Theme::style_color(result.style)),
                )),
            ),
            RequestState::Failed(_) => (Theme::error(), None),
            _ => (Theme::border_color(), None),
        };

        let mut title = vec![Span::styled(" Summary Output ", Theme::title())];
        title.extend(icon);

        let mut block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if let Some(result) = session.result() {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} ", result.settings_line()),
                    Theme::muted(),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if session.is_submitting() {
            self.copy_button.set(Rect::default());
            self.max_scroll.set(0);
            self.render_loading(frame, inner);
            return;
        }
        if !session.has_output() {
            self.copy_button.set(Rect::default());
            self.max_scroll.set(0);
            Self::render_placeholder(frame, inner);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // details + copy
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // body
        ])
        .split(inner);

        let copy_width = COPY_LABEL.chars().count() as u16;
        let [details, copy] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(copy_width),
        ])
        .spacing(1)
        .areas(chunks[0]);
        self.copy_button.set(copy);
        frame.render_widget(
            Paragraph::new(Span::styled(COPY_LABEL, Theme::button_outline())),
            copy,
        );

        match session.state() {
            RequestState::Succeeded(result) => {
                frame.render_widget(Paragraph::new(Self::details_line(result)), details);
                self.render_body(frame, chunks[2], markdown::to_lines(&result.summary_text));
            }
            RequestState::Failed(_) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Processing failed",
                        Style::default()
                            .fg(Theme::error())
                            .add_modifier(Modifier::BOLD),
                    )),
                    details,
                );
                let lines = vec![Line::from(Span::styled(
                    session.output(),
                    Style::default().fg(Theme::error()),
                ))];
                self.render_body(frame, chunks[2], lines);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefly_core::{SubmitError, SummaryResponse};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn failed_session() -> Session {
        let mut session = Session::default();
        session.set_input("a".repeat(60));
        session.begin_submit().unwrap();
        session.complete(Err(SubmitError::Unreachable));
        session
    }

    fn succeeded_session(summary: &str) -> Session {
        let mut session = Session::default();
        session.set_input("a".repeat(60));
        session.begin_submit().unwrap();
        session.complete(Ok(SummaryResponse {
            summary: Some(summary.to_string()),
            processing_time: Some(1234.0),
        }));
        session
    }

    fn draw(
        output: &SummaryOutputComponent,
        session: &Session,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| output.render(frame, frame.area(), session))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn long_paragraph_scrolls_to_its_end() {
        let mut summary = "word ".repeat(200);
        summary.push_str("TAILEND");
        let session = succeeded_session(&summary);
        let mut output = SummaryOutputComponent::new();

        let rows = draw(&output, &session, 40, 12);
        assert!(!rows.iter().any(|row| row.contains("TAILEND")));
        assert!(output.max_scroll.get() > 0);

        let mut session = session;
        for _ in 0..50 {
            output.handle_action(&Action::ScrollOutput(10), &mut session);
        }
        assert_eq!(output.scroll, output.max_scroll.get());

        let rows = draw(&output, &session, 40, 12);
        assert!(rows.iter().any(|row| row.contains("TAILEND")), "{rows:#?}");
    }

    #[test]
    fn copy_button_stays_visible_in_narrow_panes() {
        let session = succeeded_session("Short summary.");
        let output = SummaryOutputComponent::new();

        let rows = draw(&output, &session, 40, 10);
        // Row 1 is the first row inside the border.
        assert!(rows[1].contains("⧉ Copy"), "{:?}", rows[1]);
        assert!(rows[1].contains("Input"), "{:?}", rows[1]);

        let copy = output.copy_button.get();
        assert_eq!(copy.y, 1);
        assert_eq!(copy.right(), 39);
    }

    #[test]
    fn scroll_is_bounded_by_rendered_rows() {
        let mut output = SummaryOutputComponent::new();
        let mut session = Session::default();
        output.max_scroll.set(4);

        output.handle_action(&Action::ScrollOutput(3), &mut session);
        assert_eq!(output.scroll, 3);
        output.handle_action(&Action::ScrollOutput(10), &mut session);
        assert_eq!(output.scroll, 4);
        output.handle_action(&Action::ScrollOutput(-10), &mut session);
        assert_eq!(output.scroll, 0);
    }

    #[test]
    fn new_submission_resets_scroll() {
        let mut output = SummaryOutputComponent::new();
        let mut session = Session::default();
        output.max_scroll.set(20);
        output.handle_action(&Action::ScrollOutput(7), &mut session);

        output.handle_action(&Action::SubmitForm, &mut session);
        assert_eq!(output.scroll, 0);
    }

    #[test]
    fn copy_click_needs_output() {
        let mut output = SummaryOutputComponent::new();
        output.copy_button.set(Rect::new(50, 2, 8, 1));

        let mut idle = Session::default();
        assert!(output
            .handle_action(&Action::Click { column: 52, row: 2 }, &mut idle)
            .is_none());

        let mut failed = failed_session();
        assert!(matches!(
            output.handle_action(&Action::Click { column: 52, row: 2 }, &mut failed),
            Some(Action::CopySummary)
        ));
    }
}
