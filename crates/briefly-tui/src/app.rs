//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use briefly_client::SummaryClient;
use briefly_core::{BrieflyConfig, Completion, Session, SubmitError, SummaryResponse};

use crate::action::{Action, InputMode, Notice};
use crate::clipboard::ClipboardHandle;
use crate::components::help::HelpComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::summary_form::SummaryFormComponent;
use crate::components::summary_output::SummaryOutputComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Terminal width at which the input and output cards sit side by side.
const SIDE_BY_SIDE_WIDTH: u16 = 120;

/// Main application state.
pub struct App {
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    /// Input, selections and request state.
    session: Session,
    /// HTTP client for the summarization service (shared across async tasks).
    client: Arc<SummaryClient>,
    clipboard: ClipboardHandle,

    // Components
    form: SummaryFormComponent,
    output: SummaryOutputComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: &BrieflyConfig) -> Self {
        let mut session = Session::new(config.summary.default_style);
        session.select_length(config.summary.initial_length());

        Self {
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            session,
            client: Arc::new(SummaryClient::from_config(config)),
            clipboard: ClipboardHandle::new(),
            form: SummaryFormComponent::new(),
            output: SummaryOutputComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the input text from CLI args.
    pub fn set_initial_text(&mut self, text: String) {
        if let Some(warning) = self.session.set_input(text) {
            self.status_bar.notice = Notice::warning(warning.to_string());
        }
        self.form.move_cursor_to_end(&self.session);
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!("Using summarization service at {}", self.client.base_url());
        let result = self.main_loop(&mut terminal).await;

        // Restore terminal, even when the loop failed.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // The text area has focus on start.
        self.sync_input_mode();

        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            match rx.recv().await {
                Some(action) => {
                    self.handle_action(&action, &tx);
                    if self.should_quit {
                        break;
                    }
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    fn current_input_mode(&self) -> InputMode {
        // Help overlay keeps normal mode so any key can dismiss it.
        if !self.help.visible && self.form.wants_input(&self.session) {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Dispatch an action to all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        // While help is open a key press only dismisses it.
        if self.help.visible
            && !matches!(
                action,
                Action::Quit | Action::Tick | Action::Notify(_) | Action::SummaryFinished(_)
            )
        {
            self.help.handle_action(action, &mut self.session);
            self.sync_input_mode();
            return;
        }

        // Global actions first.
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::SubmitForm => self.spawn_summarize(tx),
            Action::SummaryFinished(outcome) => self.finish_summary(outcome.clone(), tx),
            Action::ClearAll => {
                if self.session.clear() {
                    info!("Input and output cleared");
                    let _ = tx.send(Action::Notify(Notice::info("All text has been cleared.")));
                }
            }
            Action::CopySummary => self.copy_summary(tx),
            Action::PasteInput => match self.clipboard.paste() {
                Ok(text) => {
                    self.handle_action(&Action::PasteBulk(text), tx);
                    return;
                }
                Err(e) => {
                    warn!("Paste failed: {:#}", e);
                    let _ = tx.send(Action::Notify(Notice::warning(
                        "Clipboard unavailable. Use your terminal's paste instead.",
                    )));
                }
            },
            _ => {}
        }

        // Forward to the components.
        let from_form = self.form.handle_action(action, &mut self.session);
        let from_output = self.output.handle_action(action, &mut self.session);
        self.help.handle_action(action, &mut self.session);
        self.status_bar.handle_action(action, &mut self.session);

        self.sync_input_mode();

        // Handle chained actions from components.
        for chained in [from_form, from_output].into_iter().flatten() {
            self.handle_action(&chained, tx);
        }
    }

    // ── Async task spawners ─────────────────────────────────────

    /// Validate the input and spawn the summarize call.
    fn spawn_summarize(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let request = match self.session.begin_submit() {
            Ok(Some(request)) => request,
            Ok(None) => {
                debug!("Summary already in flight");
                return;
            }
            Err(e) => {
                let _ = tx.send(Action::Notify(Notice::error(e.to_string())));
                return;
            }
        };

        let _ = tx.send(Action::Notify(Notice::info("Generating summary...")));

        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = client.summarize(&request).await;
            if let Err(e) = &outcome {
                error!("Summarize request failed: {}", e);
            }
            let _ = tx.send(Action::SummaryFinished(outcome));
        });
    }

    fn finish_summary(
        &mut self,
        outcome: Result<SummaryResponse, SubmitError>,
        tx: &mpsc::UnboundedSender<Action>,
    ) {
        let notice = match self.session.complete(outcome) {
            Completion::Succeeded { style } => Notice::success(format!(
                "{} summary generated successfully!",
                style.label()
            )),
            Completion::Failed { error } => Notice::error(format!("Processing Failed: {error}")),
            Completion::Ignored => return,
        };
        let _ = tx.send(Action::Notify(notice));
    }

    fn copy_summary(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let text = self.session.output();
        if text.is_empty() {
            return;
        }
        let notice = match self.clipboard.copy(&text) {
            Ok(()) => Notice::success("Summary copied to clipboard!"),
            Err(e) => {
                warn!("Copy failed: {:#}", e);
                Notice::error("Could not copy to clipboard.")
            }
        };
        let _ = tx.send(Action::Notify(notice));
    }

    // ── Rendering ───────────────────────────────────────────────

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Input + output
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        Self::render_header(frame, chunks[0]);

        let panes = if area.width >= SIDE_BY_SIDE_WIDTH {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(1)
                .split(chunks[1])
        } else {
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1])
        };

        self.form.render(frame, panes[0], &self.session);
        self.output.render(frame, panes[1], &self.session);
        self.status_bar.render(frame, chunks[2], &self.session);

        // Overlays (rendered on top)
        self.form.render_dropdown(frame, &self.session);
        self.help.render(frame, area, &self.session);
    }

    fn render_header(frame: &mut ratatui::Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("AI Text Summarizer", Theme::title())),
            Line::from(Span::styled(
                "Choose your summary style and length for optimal results",
                Theme::muted(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NoticeLevel;

    fn app() -> App {
        let mut app = App::new(&BrieflyConfig::default());
        app.clipboard = ClipboardHandle::in_memory();
        app
    }

    fn submitted_app() -> App {
        let mut app = app();
        app.session.set_input("a".repeat(60));
        app.session.begin_submit().unwrap();
        app
    }

    fn summary(text: &str) -> SummaryResponse {
        SummaryResponse {
            summary: Some(text.to_string()),
            processing_time: Some(120.0),
        }
    }

    /// Everything the app sent back onto the bus.
    fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    fn notices(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Notice> {
        drain(rx)
            .into_iter()
            .filter_map(|action| match action {
                Action::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn success_notice_names_the_style() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = submitted_app();

        app.handle_action(&Action::SummaryFinished(Ok(summary("Short."))), &tx);

        assert_eq!(
            notices(&mut rx),
            vec![Notice::success("Concise summary generated successfully!")]
        );
        assert_eq!(app.session.output(), "Short.");
    }

    #[test]
    fn failure_notice_carries_the_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = submitted_app();

        app.handle_action(
            &Action::SummaryFinished(Err(SubmitError::Server {
                status: 500,
                detail: None,
            })),
            &tx,
        );

        assert_eq!(
            notices(&mut rx),
            vec![Notice::error("Processing Failed: Server error: 500")]
        );
        assert_eq!(app.session.output(), "Error: Server error: 500");
    }

    #[test]
    fn stale_completion_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.finish_summary(Ok(summary("Late.")), &tx);
        assert!(drain(&mut rx).is_empty());
        assert!(!app.session.has_output());
    }

    #[test]
    fn clear_notice_only_when_something_was_cleared() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = submitted_app();

        app.handle_action(&Action::ClearAll, &tx);
        assert!(notices(&mut rx).is_empty());
        assert!(app.session.is_submitting());
        assert_eq!(app.session.input(), "a".repeat(60));

        app.handle_action(&Action::SummaryFinished(Ok(summary("Short."))), &tx);
        drain(&mut rx);
        app.handle_action(&Action::ClearAll, &tx);
        assert_eq!(
            notices(&mut rx),
            vec![Notice::info("All text has been cleared.")]
        );
        assert_eq!(app.session.input(), "");
        assert!(!app.session.has_output());
    }

    #[test]
    fn copy_puts_summary_on_the_clipboard() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();

        // Nothing to copy yet.
        app.handle_action(&Action::CopySummary, &tx);
        assert!(drain(&mut rx).is_empty());

        app.session.set_input("a".repeat(60));
        app.session.begin_submit().unwrap();
        app.handle_action(&Action::SummaryFinished(Ok(summary("Short."))), &tx);
        drain(&mut rx);

        app.handle_action(&Action::CopySummary, &tx);
        assert_eq!(
            notices(&mut rx),
            vec![Notice::success("Summary copied to clipboard!")]
        );
        assert_eq!(app.clipboard.contents(), Some("Short."));
    }

    #[test]
    fn invalid_input_is_reported_without_a_request() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.session.set_input("too short");

        app.handle_action(&Action::SubmitForm, &tx);

        let actions = drain(&mut rx);
        assert_eq!(actions.len(), 1, "{actions:?}");
        match &actions[0] {
            Action::Notify(notice) => {
                assert_eq!(notice.level, NoticeLevel::Error);
                assert_eq!(
                    notice.message,
                    "Please enter at least 50 characters for a meaningful summary."
                );
            }
            other => panic!("expected an error notice, got {other:?}"),
        }
        assert!(!app.session.is_submitting());
    }

    #[test]
    fn help_swallows_keys_but_not_completions() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = submitted_app();
        app.help.visible = true;

        app.handle_action(&Action::SummaryFinished(Ok(summary("Short."))), &tx);
        assert!(app.help.visible);
        assert_eq!(
            notices(&mut rx),
            vec![Notice::success("Concise summary generated successfully!")]
        );

        app.handle_action(&Action::ClearAll, &tx);
        assert!(!app.help.visible);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(app.session.output(), "Short.");
    }

    #[test]
    fn quit_sets_the_flag() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app();
        app.handle_action(&Action::Quit, &tx);
        assert!(app.should_quit);
    }
}
