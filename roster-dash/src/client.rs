//! HTTP client for roster-api

use async_trait::async_trait;
use roster_common::{PersonRecord, StatisticsSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("roster-dash/", env!("CARGO_PKG_VERSION"));

/// Client errors
///
/// `Display` yields the user-facing message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// No usable answer (connect failure, timeout)
    #[error("{0}")]
    Transport(String),

    /// Answer did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error body sent by the backend
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// User-facing message for a failed request
    ///
    /// Non-empty `details` joined with `, `, else `error`, else `message`,
    /// else `fallback`.
    pub fn into_message(self, fallback: impl Into<String>) -> String {
        if let Some(details) = self.details.filter(|d| !d.is_empty()) {
            return details.join(", ");
        }
        self.error
            .or(self.message)
            .unwrap_or_else(|| fallback.into())
    }
}

/// Source of statistics summaries
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_summary(&self) -> Result<StatisticsSummary, ClientError>;
}

/// roster-api client
pub struct RosterClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RosterClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/dashboard/stats
    pub async fn dashboard_stats(&self) -> Result<StatisticsSummary, ClientError> {
        self.get_json("/api/dashboard/stats").await
    }

    /// GET /api/persons
    pub async fn persons(&self) -> Result<Vec<PersonRecord>, ClientError> {
        self.get_json("/api/persons").await
    }

    /// GET /api/professions
    pub async fn professions(&self) -> Result<Vec<String>, ClientError> {
        self.get_json("/api/professions").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body.into_message(format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl StatsSource for RosterClient {
    async fn fetch_summary(&self) -> Result<StatisticsSummary, ClientError> {
        self.dashboard_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> ErrorBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_details_joined() {
        let message = body(r#"{"error":"Validation failed","details":["a","b"]}"#)
            .into_message("fallback");
        assert_eq!(message, "a, b");
    }

    #[test]
    fn test_error_when_no_details() {
        let message = body(r#"{"error":"Internal server error"}"#).into_message("fallback");
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn test_empty_details_fall_through_to_error() {
        let message = body(r#"{"error":"Bad","details":[]}"#).into_message("fallback");
        assert_eq!(message, "Bad");
    }

    #[test]
    fn test_message_field_used_last() {
        let message = body(r#"{"message":"Gateway down"}"#).into_message("fallback");
        assert_eq!(message, "Gateway down");
    }

    #[test]
    fn test_fallback_for_unparsed_body() {
        let message = ErrorBody::default().into_message("Request failed with status code 502");
        assert_eq!(message, "Request failed with status code 502");
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = ClientError::Api {
            status: 500,
            message: "Internal server error".to_string(),
        };
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RosterClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP
        let client = RosterClient::new("http://127.0.0.1:9").unwrap();
        match client.dashboard_stats().await {
            Err(ClientError::Transport(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
