//! Terminal event handling. Captures keyboard, mouse and resize events
//! from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: keys are mapped to global shortcuts (quit, submit, clear, copy).
//! - Editing: keys are forwarded as raw CharInput/BackspaceInput so the
//!   text area can receive typed characters.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>. Crossterm is read from a single long-lived blocking
//! thread that forwards events over a channel.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::{Action, InputMode};

/// How long the reader thread waits before checking for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Lines scrolled per mouse wheel notch in the output pane.
const WHEEL_LINES: i32 = 3;

/// Encode InputMode as u8 for atomic sharing.
const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop. This blocks and should be spawned in a task.
    pub async fn run(&self) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || read_terminal_events(event_tx));
        self.forward(event_rx).await;
    }

    /// Interleave ticks with terminal events until either channel closes.
    async fn forward(&self, mut events: mpsc::UnboundedReceiver<Event>) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => Some(Action::Tick),
                event = events.recv() => match event {
                    Some(event) => self.map_event(event),
                    None => break,
                },
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                map_key(key, get_input_mode(&self.mode_flag))
            }
            Event::Mouse(mouse) => map_mouse(mouse),
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }
}

/// The only reader of the terminal. Runs on one blocking thread for the
/// life of the UI so no event is read and then dropped.
fn read_terminal_events(tx: mpsc::UnboundedSender<Event>) {
    loop {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Failed to read terminal event: {}", e),
            },
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(e) => {
                warn!("Terminal polling stopped: {}", e);
                break;
            }
        }
    }
    debug!("Terminal reader exiting");
}

fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    // Ctrl+C always quits regardless of mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Output scrolling works in both modes.
    match key.code {
        KeyCode::PageUp => return Some(Action::ScrollOutput(-10)),
        KeyCode::PageDown => return Some(Action::ScrollOutput(10)),
        _ => {}
    }

    match mode {
        InputMode::Editing => map_key_editing(key),
        InputMode::Normal => map_key_normal(key),
    }
}

/// Key mapping when the text area is focused. Most keys become character
/// input; only a few are reserved.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    // Ctrl shortcuts that work in editing mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Backspace => Some(Action::DeleteWord),
            KeyCode::Char('v') => Some(Action::PasteInput),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Char('l') => Some(Action::ClearAll),
            KeyCode::Char('y') => Some(Action::CopySummary),
            KeyCode::Char('a') => Some(Action::CursorHome),
            KeyCode::Char('e') => Some(Action::CursorEnd),
            _ => None,
        };
    }

    // Alt+Enter also submits (some terminals send this instead of Ctrl+Enter).
    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(Action::SubmitForm);
    }

    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter => Some(Action::NewlineInput),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Delete => Some(Action::DeleteInput),
        // Any printable character is forwarded.
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode: global shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::SubmitForm),
            KeyCode::Char('l') => Some(Action::ClearAll),
            KeyCode::Char('y') => Some(Action::CopySummary),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('s') => Some(Action::SubmitForm),
        KeyCode::Char('c') => Some(Action::ClearAll),
        KeyCode::Char('y') => Some(Action::CopySummary),
        KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::FocusInput),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Action::FocusPrev),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(Action::ScrollOutput(-WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Action::ScrollOutput(WHEEL_LINES)),
        _ => None,
    }
}
