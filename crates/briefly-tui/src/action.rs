//! Action enum, the central message bus for the TUI.
//! All user interactions and async results flow through here.

use briefly_core::{SubmitError, SummaryResponse};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Show a message in the status bar.
    Notify(Notice),
    /// A tick event for animations.
    Tick,

    // ── Submission ──────────────────────────────────────────
    /// Validate the input and send it for summarization.
    SubmitForm,
    /// The in-flight request finished.
    SummaryFinished(Result<SummaryResponse, SubmitError>),
    /// Reset input, output and result.
    ClearAll,
    /// Copy the output text to the clipboard.
    CopySummary,

    // ── Text Input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete key (only sent when in input mode).
    DeleteInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Insert a newline.
    NewlineInput,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Paste text from the clipboard (Ctrl+V in editing mode).
    PasteInput,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Focus ───────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Jump back to the text area.
    FocusInput,
    /// Esc: close dropdowns or leave the text area.
    Cancel,

    // ── Mouse ───────────────────────────────────────────────
    /// Left click at a terminal cell.
    Click { column: u16, row: u16 },

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    /// Scroll the output pane by this many lines (negative is up).
    ScrollOutput(i32),
    Confirm,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are global shortcuts.
    Normal,
    /// Keys go to the focused text field.
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
