//! Error bodies returned by the summarization service.
//!
//! Request and success types live in `briefly_core::summary`; this module
//! only deals with what comes back on a failure status.

use serde::Deserialize;
use serde_json::Value;

/// `{"detail": ...}` as produced by the service's HTTP exceptions.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parse an error body, tolerating anything that is not JSON.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Human-readable detail, if the service sent one.
    ///
    /// A plain string is used as is. Request validation failures arrive as a
    /// list of `{"msg": ...}` objects; their messages are joined.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
