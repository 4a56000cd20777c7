//! Document Intelligence client — submits a binary document to the external
//! `prebuilt-read` model and polls the returned operation until the extracted
//! text is available.

use std::path::Path;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::is_placeholder_credential;

const API_VERSION: &str = "2024-11-30";
const READ_MODEL: &str = "prebuilt-read";
const CREDENTIAL_HEADER: &str = "Ocp-Apim-Subscription-Key";
const SUBMIT_TIMEOUT_SECS: u64 = 60;
const POLL_INTERVAL_MS: u64 = 1000;
const MAX_POLLS: u32 = 60;

#[derive(Debug, Error)]
pub enum DocIntelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error reading document: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("analyze operation not accepted: missing Operation-Location header")]
    MissingOperationLocation,

    #[error("analyze operation failed upstream")]
    AnalysisFailed,

    #[error("analyze operation still running after {0} polls")]
    PollTimeout(u32),
}

#[derive(Debug, Deserialize)]
struct AnalyzeOperation {
    status: OperationStatus,
    #[serde(rename = "analyzeResult")]
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResult {
    content: String,
}

/// Client for the external document-extraction collaborator.
/// Constructed once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct DocIntelClient {
    client: Client,
    endpoint: String,
    key: String,
}

impl DocIntelClient {
    /// Builds a client from optional configuration. Returns `None` when the
    /// endpoint or credential is absent, or when the credential is an
    /// unfilled template placeholder — extraction is then skipped for the
    /// life of the process.
    pub fn from_config(endpoint: Option<&str>, key: Option<&str>) -> Option<Self> {
        let endpoint = endpoint?.trim_end_matches('/').to_string();
        let key = key?;
        if is_placeholder_credential(key) {
            return None;
        }
        // Reject credentials that cannot be carried in a header at all,
        // instead of failing every request later.
        HeaderValue::from_str(key).ok()?;
        Some(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(SUBMIT_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            key: key.to_string(),
        })
    }

    /// Submits the document at `path` for a read-model analysis and blocks
    /// until the extracted text is available.
    pub async fn extract_text(&self, path: &Path) -> Result<String, DocIntelError> {
        let bytes = tokio::fs::read(path).await?;
        let operation_url = self.begin_analyze(bytes).await?;
        self.poll_result(&operation_url).await
    }

    /// POSTs the document bytes to the analyze endpoint and returns the
    /// operation URL from the `Operation-Location` header.
    async fn begin_analyze(&self, bytes: Vec<u8>) -> Result<String, DocIntelError> {
        let url = format!(
            "{}/documentintelligence/documentModels/{READ_MODEL}:analyze?api-version={API_VERSION}",
            self.endpoint
        );

        let response = self
            .client
            .post(&url)
            .header(CREDENTIAL_HEADER, &self.key)
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DocIntelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or(DocIntelError::MissingOperationLocation)?;

        debug!("analyze accepted, polling {operation_url}");
        Ok(operation_url)
    }

    /// Polls the operation URL until it reports a terminal status.
    async fn poll_result(&self, operation_url: &str) -> Result<String, DocIntelError> {
        for _ in 0..MAX_POLLS {
            let response = self
                .client
                .get(operation_url)
                .header(CREDENTIAL_HEADER, &self.key)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(DocIntelError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let operation: AnalyzeOperation = response.json().await?;
            match operation.status {
                OperationStatus::Succeeded => {
                    return Ok(operation
                        .analyze_result
                        .map(|r| r.content)
                        .unwrap_or_default());
                }
                OperationStatus::Failed => return Err(DocIntelError::AnalysisFailed),
                OperationStatus::NotStarted | OperationStatus::Running => {
                    tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
                }
            }
        }

        Err(DocIntelError::PollTimeout(MAX_POLLS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_from_config_rejects_missing_settings() {
        assert!(DocIntelClient::from_config(None, Some("real-key")).is_none());
        assert!(DocIntelClient::from_config(Some("https://x.example"), None).is_none());
    }

    #[test]
    fn test_from_config_rejects_placeholder_key() {
        let client = DocIntelClient::from_config(Some("https://x.example"), Some("<YOUR-KEY>"));
        assert!(client.is_none());
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let client =
            DocIntelClient::from_config(Some("https://x.example/"), Some("real-key")).unwrap();
        assert_eq!(client.endpoint, "https://x.example");
    }

    #[test]
    fn test_operation_status_wire_casing() {
        let op: AnalyzeOperation =
            serde_json::from_str(r#"{"status": "notStarted"}"#).unwrap();
        assert_eq!(op.status, OperationStatus::NotStarted);
        let op: AnalyzeOperation = serde_json::from_str(
            r#"{"status": "succeeded", "analyzeResult": {"content": "hello"}}"#,
        )
        .unwrap();
        assert_eq!(op.status, OperationStatus::Succeeded);
        assert_eq!(op.analyze_result.unwrap().content, "hello");
    }

    #[derive(Clone)]
    struct StubState {
        operation_url: String,
        polls: Arc<AtomicU32>,
    }

    /// Stub collaborator: accepts the analyze POST with a 202 + operation
    /// URL, reports `running` once, then `succeeded` with fixed content.
    /// Route patterns cannot carry a literal colon, so the ":analyze"
    /// segment is matched with a wildcard.
    fn stub_router(state: StubState) -> Router {
        Router::new()
            .route(
                "/documentintelligence/documentModels/*model",
                post(
                    |State(state): State<StubState>, body: bytes::Bytes| async move {
                        assert!(!body.is_empty());
                        (
                            StatusCode::ACCEPTED,
                            [("operation-location", state.operation_url.clone())],
                        )
                            .into_response()
                    },
                ),
            )
            .route(
                "/analyzeResults/op-1",
                get(|State(state): State<StubState>| async move {
                    if state.polls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Json(json!({"status": "running"}))
                    } else {
                        Json(json!({
                            "status": "succeeded",
                            "analyzeResult": {"content": "Jane Doe. Rust, SQL, three years."}
                        }))
                    }
                }),
            )
            .with_state(state)
    }

    #[tokio::test]
    async fn test_extract_text_submits_and_polls_to_completion() {
        let polls = Arc::new(AtomicU32::new(0));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = stub_router(StubState {
            operation_url: format!("http://{addr}/analyzeResults/op-1"),
            polls: polls.clone(),
        });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut resume = tempfile::NamedTempFile::new().unwrap();
        resume.write_all(b"%PDF-1.4 fake resume bytes").unwrap();

        let client = DocIntelClient {
            client: Client::new(),
            endpoint: format!("http://{addr}"),
            key: "stub-key".into(),
        };

        let text = client.extract_text(resume.path()).await.unwrap();

        assert_eq!(text, "Jane Doe. Rust, SQL, three years.");
        assert!(polls.load(Ordering::SeqCst) >= 2, "should poll past running");
    }

    #[tokio::test]
    async fn test_failed_operation_is_an_error() {
        let app = Router::new().route(
            "/analyzeResults/op-2",
            get(|| async { Json(json!({"status": "failed"})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = DocIntelClient {
            client: Client::new(),
            endpoint: format!("http://{addr}"),
            key: "stub-key".into(),
        };
        let err = client
            .poll_result(&format!("http://{addr}/analyzeResults/op-2"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocIntelError::AnalysisFailed));
    }
}
