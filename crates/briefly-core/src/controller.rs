//! Submission controller.
//!
//! A [`Session`] owns everything the form shows: the input text, the selected
//! style and length, and the lifecycle of the single request that may be in
//! flight. Network access goes through the [`Summarizer`] seam so the session
//! itself stays synchronous; callers either use [`Session::submit`] or split
//! the call with [`Session::begin_submit`] and [`Session::complete`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::style::SummaryStyle;
use crate::summary::{Preferences, SummaryRequest, SummaryResponse, SummaryResult};
use crate::validate::{length_warning, validate, CharCounter, InputWarning, ValidationError};

/// Shown when the request never got a response.
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot connect to server. Make sure backend is running on port 8080.";

/// Why a submission failed after it left the validator.
///
/// `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The service answered with a non-success status.
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    /// No response was received (connection refused, timeout, reset).
    #[error("Cannot connect to server. Make sure backend is running on port 8080.")]
    Unreachable,

    /// Anything else, carrying the transport's own error text.
    #[error("{0}")]
    Transport(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref().filter(|d| !d.is_empty()) {
        Some(detail) => detail.to_string(),
        None => format!("Server error: {status}"),
    }
}

/// The external summarization service.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, SubmitError>;
}

/// Lifecycle of the current request. Exactly one is live at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(SummaryResult),
    Failed(String),
}

/// What happened when a submission finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Succeeded { style: SummaryStyle },
    Failed { error: SubmitError },
    /// Nothing was waiting for a response.
    Ignored,
}

/// All form state for one UI session.
#[derive(Debug, Clone)]
pub struct Session {
    input: String,
    style: SummaryStyle,
    max_length: u32,
    state: RequestState,
    /// Request currently in flight, kept to build the result.
    pending: Option<SummaryRequest>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SummaryStyle::default())
    }
}

impl Session {
    /// New idle session at the style's starting length.
    pub fn new(style: SummaryStyle) -> Self {
        Self {
            input: String::new(),
            style,
            max_length: style.initial_length(),
            state: RequestState::Idle,
            pending: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn style(&self) -> SummaryStyle {
        self.style
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, RequestState::Submitting)
    }

    pub fn result(&self) -> Option<&SummaryResult> {
        match &self.state {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Text for the output pane. Empty while idle or submitting.
    pub fn output(&self) -> String {
        match &self.state {
            RequestState::Succeeded(result) => result.summary_text.clone(),
            RequestState::Failed(message) => format!("Error: {message}"),
            RequestState::Idle | RequestState::Submitting => String::new(),
        }
    }

    pub fn has_output(&self) -> bool {
        matches!(
            self.state,
            RequestState::Succeeded(_) | RequestState::Failed(_)
        )
    }

    pub fn counter(&self) -> CharCounter {
        CharCounter::of(&self.input)
    }

    // ── Editing ─────────────────────────────────────────────

    /// Apply an edit to the input text.
    ///
    /// Refused while a request is in flight. Returns the soft over-limit
    /// warning when the raw text is now too long.
    pub fn edit<F>(&mut self, f: F) -> Option<InputWarning>
    where
        F: FnOnce(&mut String),
    {
        if self.is_submitting() {
            return None;
        }
        f(&mut self.input);
        length_warning(&self.input)
    }

    /// Replace the input text wholesale.
    pub fn set_input(&mut self, text: impl Into<String>) -> Option<InputWarning> {
        let text = text.into();
        self.edit(move |input| *input = text)
    }

    /// Switch style, resetting the length if the new style does not allow it.
    pub fn select_style(&mut self, style: SummaryStyle) {
        let previous = self.max_length;
        self.style = style;
        self.max_length = style.reconcile_length(previous);
        if self.max_length != previous {
            debug!(
                style = style.id(),
                from = previous,
                to = self.max_length,
                "Length reset for new style"
            );
        }
    }

    /// Pick a length. Returns false and leaves the selection alone if the
    /// current style does not offer it.
    pub fn select_length(&mut self, length: u32) -> bool {
        if self.style.length_options().contains(length) {
            self.max_length = length;
            true
        } else {
            false
        }
    }

    // ── Lifecycle ───────────────────────────────────────────

    /// Validate the input and move to `Submitting`.
    ///
    /// Returns the request to send, `Ok(None)` if a request is already in
    /// flight, or the validation error. A validation error leaves the state
    /// and any displayed output untouched.
    pub fn begin_submit(&mut self) -> Result<Option<SummaryRequest>, ValidationError> {
        if self.is_submitting() {
            debug!("Submit ignored, request already in flight");
            return Ok(None);
        }

        validate(&self.input)?;

        let request = SummaryRequest {
            text: self.input.clone(),
            max_length: self.max_length,
            style: self.style,
            preferences: Preferences::default(),
        };

        info!(
            style = request.style.id(),
            max_length = request.max_length,
            chars = request.text.chars().count(),
            "Submitting text for summarization"
        );

        self.pending = Some(request.clone());
        self.state = RequestState::Submitting;
        Ok(Some(request))
    }

    /// Record the outcome of the in-flight request.
    pub fn complete(&mut self, outcome: Result<SummaryResponse, SubmitError>) -> Completion {
        let Some(request) = self.pending.take().filter(|_| self.is_submitting()) else {
            warn!("Received a completion with no request in flight");
            return Completion::Ignored;
        };

        match outcome {
            Ok(response) => {
                let result = SummaryResult::from_response(&request, response);
                info!(
                    output_chars = result.output_chars,
                    processing_time_ms = result.processing_time_ms,
                    "Summary received"
                );
                self.state = RequestState::Succeeded(result);
                Completion::Succeeded {
                    style: request.style,
                }
            }
            Err(e) => {
                warn!("Summarization failed: {}", e);
                self.state = RequestState::Failed(e.to_string());
                Completion::Failed { error: e }
            }
        }
    }

    /// Validate, call the service, and record the outcome.
    ///
    /// Returns `Ok(Completion::Ignored)` when a request was already in flight.
    pub async fn submit<S>(&mut self, summarizer: &S) -> Result<Completion, ValidationError>
    where
        S: Summarizer + ?Sized,
    {
        let Some(request) = self.begin_submit()? else {
            return Ok(Completion::Ignored);
        };
        let outcome = summarizer.summarize(&request).await;
        Ok(self.complete(outcome))
    }

    /// Reset input, output and result together. Ignored while submitting.
    pub fn clear(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.input.clear();
        self.state = RequestState::Idle;
        self.pending = None;
        true
    }
}
