//! HTTP client for the summarization service.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use briefly_core::summary::{SummaryRequest, SummaryResponse};
use briefly_core::{BrieflyConfig, SubmitError, Summarizer};

use crate::protocol::ErrorBody;

/// Client for the summarization API.
pub struct SummaryClient {
    client: Client,
    base_url: String,
}

impl SummaryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BrieflyConfig) -> Self {
        Self::new(
            config.service.base_url.clone(),
            Duration::from_secs(config.service.timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post text for summarization.
    #[instrument(skip(self, request), fields(style = request.style.id(), max_length = request.max_length))]
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, SubmitError> {
        let url = format!("{}/summarize", self.base_url);

        let resp = match self.client.post(&url).json(request).send().await {
            Ok(resp) => resp,
            // The request could not even be built (bad URL and the like).
            Err(e) if e.is_builder() => return Err(SubmitError::Transport(e.to_string())),
            Err(e) => {
                warn!("No response from {}: {}", url, e);
                return Err(SubmitError::Unreachable);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = ErrorBody::parse(&body).detail_message();
            debug!(status = status.as_u16(), ?detail, "Service returned an error");
            return Err(SubmitError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = resp.text().await.map_err(|e| {
            warn!("Summary body from {} was cut off: {}", url, e);
            read_error(e)
        })?;

        // A success body that is not the expected JSON is a response without a summary.
        let response = serde_json::from_str::<SummaryResponse>(&body).unwrap_or_else(|e| {
            warn!("Unexpected summary body: {}", e);
            SummaryResponse::default()
        });
        debug!(
            has_summary = response.summary.is_some(),
            "Summary response decoded"
        );
        Ok(response)
    }
}

/// A body that stops arriving means the service went away mid-answer.
fn read_error(e: reqwest::Error) -> SubmitError {
    if e.is_timeout() || e.is_body() || e.is_connect() || e.is_request() {
        SubmitError::Unreachable
    } else {
        SubmitError::Transport(e.to_string())
    }
}

#[async_trait]
impl Summarizer for SummaryClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, SubmitError> {
        SummaryClient::summarize(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefly_core::summary::Preferences;
    use briefly_core::{Completion, Session, SummaryStyle};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SummaryClient {
        SummaryClient::new(server.uri(), Duration::from_secs(5))
    }

    fn request() -> SummaryRequest {
        SummaryRequest {
            text: "a".repeat(60),
            max_length: 3,
            style: SummaryStyle::Concise,
            preferences: Preferences::default(),
        }
    }

    #[tokio::test]
    async fn posts_expected_body_and_decodes_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "text": "a".repeat(60),
                "max_sentences": 3,
                "style": "concise",
                "preferences": {"tone": "neutral", "focus": "main_points", "audience": "general"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "Short summary.",
                "processing_time": 120
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server).summarize(&request()).await.unwrap();
        assert_eq!(resp.summary.as_deref(), Some("Short summary."));
        assert_eq!(resp.processing_time, Some(120.0));
    }

    #[tokio::test]
    async fn session_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "Short summary.",
                "processing_time": 120
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut session = Session::new(SummaryStyle::Concise);
        session.set_input("a".repeat(60));

        let completion = session.submit(&client).await.unwrap();
        assert_eq!(
            completion,
            Completion::Succeeded {
                style: SummaryStyle::Concise
            }
        );
        let result = session.result().unwrap();
        assert_eq!(result.output_chars, 14);
        assert_eq!(result.input_chars, 60);
        assert_eq!(result.processing_time_ms, 120.0);
    }

    #[tokio::test]
    async fn server_error_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).summarize(&request()).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Server {
                status: 500,
                detail: None
            }
        );
        assert_eq!(err.to_string(), "Server error: 500");
    }

    #[tokio::test]
    async fn server_error_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "An unexpected error occurred: quota exceeded"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).summarize(&request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred: quota exceeded"
        );
    }

    #[tokio::test]
    async fn non_json_success_body_has_no_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let resp = client_for(&server).summarize(&request()).await.unwrap();
        assert_eq!(resp, SummaryResponse::default());
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = SummaryClient::new(format!("http://127.0.0.1:{port}"), Duration::from_secs(5));

        let err = client.summarize(&request()).await.unwrap_err();
        assert_eq!(err, SubmitError::Unreachable);
    }

    #[tokio::test]
    async fn timeout_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"summary": "late"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = SummaryClient::new(server.uri(), Duration::from_millis(200));
        let err = client.summarize(&request()).await.unwrap_err();
        assert_eq!(err, SubmitError::Unreachable);
    }

    /// Serve one request: answer 200 with a Content-Length longer than the
    /// body actually written, then hang up.
    async fn truncated_body_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"summ",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= header_end + 4 + length
    }

    #[tokio::test]
    async fn body_cut_off_mid_response_is_unreachable() {
        let base_url = truncated_body_server().await;
        let client = SummaryClient::new(base_url, Duration::from_secs(5));

        let err = client.summarize(&request()).await.unwrap_err();
        assert_eq!(err, SubmitError::Unreachable);
    }

    #[tokio::test]
    async fn malformed_base_url_reports_transport_text() {
        let client = SummaryClient::new("not a url", Duration::from_secs(1));
        let err = client.summarize(&request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)), "{err:?}");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = SummaryClient::new("http://localhost:8080/api/v1/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    }
}
