//! HTTP client for the TGViz post-update API
//!
//! One client maps to one bot token. The identifying headers (token,
//! linked bot library, toolchain version) are resolved once at
//! construction and reused for every call.
//!
//! Used directly, the client propagates every failure to the caller;
//! the best-effort swallowing of errors lives in
//! [`UpdateProcessor`](crate::processor::UpdateProcessor).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

use crate::config::TgvizConfig;
use crate::error::{Error, Result};
use crate::update::Update;

/// Processing directive attached to an API response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotAction {
    /// When true, the bot should drop this update without handling it
    pub skip_update: Option<bool>,

    /// Ad campaign identifier to serve, if any
    pub send_ads: Option<i64>,
}

/// Response from POST /v1/post-update
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Telegram update_id echoed back by the API
    pub update_id: i64,

    /// Optional processing directive
    #[serde(default)]
    pub action: Option<BotAction>,
}

impl ApiResponse {
    /// True when the API asked the bot to drop this update.
    pub fn should_skip(&self) -> bool {
        self.action
            .as_ref()
            .and_then(|action| action.skip_update)
            .unwrap_or(false)
    }
}

const BOT_TOKEN_HEADER: &str = "X-TGViz-Bot-Token";
const CLIENT_LIBRARY_HEADER: &str = "X-TGViz-Client-Library";
const RUST_VERSION_HEADER: &str = "X-TGViz-Rust-Version";

/// Toolchain version reported in the runtime-version header.
fn rust_version() -> &'static str {
    let version = env!("CARGO_PKG_RUST_VERSION");
    if version.is_empty() {
        "unknown"
    } else {
        version
    }
}

/// HTTP client for the TGViz API
///
/// Cheap to clone; all fields are immutable after construction, so
/// clones can be handed to background tasks freely.
#[derive(Debug, Clone)]
pub struct TgvizClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl TgvizClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid or a header
    /// value cannot be built from it.
    pub fn new(config: &TgvizConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut token = HeaderValue::from_str(&config.token)
            .map_err(|e| Error::Config(format!("invalid token: {}", e)))?;
        token.set_sensitive(true);
        headers.insert(BOT_TOKEN_HEADER, token);

        let library = config.client_library.as_deref().unwrap_or("unknown");
        headers.insert(
            CLIENT_LIBRARY_HEADER,
            HeaderValue::from_str(library)
                .map_err(|e| Error::Config(format!("invalid client_library: {}", e)))?,
        );

        headers.insert(
            RUST_VERSION_HEADER,
            HeaderValue::from_str(rust_version())
                .map_err(|e| Error::Config(format!("invalid toolchain version: {}", e)))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
        })
    }

    /// Send one update to the TGViz API and return the validated response.
    ///
    /// The update is serialized as JSON, unmodified. Failure kinds:
    /// [`Error::Transport`] when the request cannot be sent or times
    /// out, [`Error::Status`] for 4xx/5xx replies, [`Error::Validation`]
    /// when the body does not match the expected shape.
    pub async fn send_update(&self, update: &Update) -> Result<ApiResponse> {
        let response = self
            .http_client
            .post(&self.api_url)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_without_action() {
        let response: ApiResponse = serde_json::from_str(r#"{"update_id": 42}"#).unwrap();
        assert_eq!(response.update_id, 42);
        assert!(response.action.is_none());
        assert!(!response.should_skip());
    }

    #[test]
    fn test_parse_response_with_skip_action() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"update_id": 42, "action": {"skip_update": true}}"#).unwrap();
        assert_eq!(response.update_id, 42);
        let action = response.action.as_ref().unwrap();
        assert_eq!(action.skip_update, Some(true));
        assert!(action.send_ads.is_none());
        assert!(response.should_skip());
    }

    #[test]
    fn test_parse_response_with_empty_action() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"update_id": 1, "action": {}}"#).unwrap();
        assert!(!response.should_skip());
    }

    #[test]
    fn test_parse_response_skip_false() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"update_id": 1, "action": {"skip_update": false, "send_ads": 7}}"#)
                .unwrap();
        assert!(!response.should_skip());
        assert_eq!(response.action.unwrap().send_ads, Some(7));
    }

    #[test]
    fn test_parse_response_missing_update_id_fails() {
        let result: std::result::Result<ApiResponse, _> =
            serde_json::from_str(r#"{"action": {"skip_update": true}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_with_valid_config() {
        let config = TgvizConfig::new("tgv_live_test");
        assert!(TgvizClient::new(&config).is_ok());
    }

    #[test]
    fn test_client_rejects_empty_token() {
        let config = TgvizConfig::new("");
        assert!(matches!(TgvizClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_client_rejects_non_ascii_token() {
        let config = TgvizConfig::new("bad\ntoken");
        assert!(matches!(TgvizClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_rust_version_is_set() {
        assert!(!rust_version().is_empty());
    }
}
