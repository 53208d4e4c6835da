use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::style::SummaryStyle;

/// Shown when the service answers without a summary.
pub const NO_SUMMARY_FALLBACK: &str = "No summary available.";

/// Writing preferences sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub tone: String,
    pub focus: String,
    pub audience: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tone: "neutral".to_string(),
            focus: "main_points".to_string(),
            audience: "general".to_string(),
        }
    }
}

/// Body of `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRequest {
    /// Raw input, sent untrimmed.
    pub text: String,
    #[serde(rename = "max_sentences")]
    pub max_length: u32,
    pub style: SummaryStyle,
    pub preferences: Preferences,
}

/// Successful response body. Every field is optional on the wire; the
/// bookkeeping fields the backend adds are not read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,

    /// Milliseconds the service spent, when it reports it.
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// A completed summary and the settings that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub summary_text: String,
    pub style: SummaryStyle,
    pub max_length: u32,
    /// Raw characters submitted.
    pub input_chars: usize,
    /// Characters returned by the service; 0 when no summary came back.
    pub output_chars: usize,
    pub processing_time_ms: f64,
    pub completed_at: DateTime<Local>,
}

impl SummaryResult {
    pub fn from_response(request: &SummaryRequest, response: SummaryResponse) -> Self {
        let output_chars = response
            .summary
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(0);
        let summary_text = response
            .summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string());

        Self {
            summary_text,
            style: request.style,
            max_length: request.max_length,
            input_chars: request.text.chars().count(),
            output_chars,
            processing_time_ms: response.processing_time.unwrap_or(0.0),
            completed_at: Local::now(),
        }
    }

    /// e.g. "Bullet points • 5 points".
    pub fn settings_line(&self) -> String {
        format!(
            "{} • {}",
            self.style.label(),
            self.style.describe_length(self.max_length)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(text: &str) -> SummaryRequest {
        SummaryRequest {
            text: text.to_string(),
            max_length: 3,
            style: SummaryStyle::Concise,
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let body = serde_json::to_value(request("hello")).unwrap();
        assert_eq!(
            body,
            json!({
                "text": "hello",
                "max_sentences": 3,
                "style": "concise",
                "preferences": {
                    "tone": "neutral",
                    "focus": "main_points",
                    "audience": "general"
                }
            })
        );
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: SummaryResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp, SummaryResponse::default());

        let resp: SummaryResponse = serde_json::from_value(json!({
            "summary": "Done.",
            "status": "success",
            "original_length": 60,
            "summary_length": 5,
            "applied_preferences": {"style": "concise", "max_sentences": 3}
        }))
        .unwrap();
        assert_eq!(resp.summary.as_deref(), Some("Done."));
        assert_eq!(resp.processing_time, None);
    }

    #[test]
    fn result_from_full_response() {
        let req = request(&"a".repeat(60));
        let resp = SummaryResponse {
            summary: Some("Short summary.".to_string()),
            processing_time: Some(120.0),
            ..Default::default()
        };
        let result = SummaryResult::from_response(&req, resp);
        assert_eq!(result.summary_text, "Short summary.");
        assert_eq!(result.output_chars, 14);
        assert_eq!(result.input_chars, 60);
        assert_eq!(result.processing_time_ms, 120.0);
        assert_eq!(result.style, SummaryStyle::Concise);
        assert_eq!(result.max_length, 3);
    }

    #[test]
    fn result_without_summary_uses_fallback() {
        let req = request(&"a".repeat(60));
        let result = SummaryResult::from_response(&req, SummaryResponse::default());
        assert_eq!(result.summary_text, NO_SUMMARY_FALLBACK);
        assert_eq!(result.output_chars, 0);
        assert_eq!(result.processing_time_ms, 0.0);
    }

    #[test]
    fn settings_line() {
        let req = SummaryRequest {
            style: SummaryStyle::BulletPoints,
            max_length: 5,
            ..request("x")
        };
        let result = SummaryResult::from_response(&req, SummaryResponse::default());
        assert_eq!(result.settings_line(), "Bullet points • 5 points");
    }
}
