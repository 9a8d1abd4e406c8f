//! HTTP backend client.
//!
//! Implements the Backend trait over the `/ask` and `/health` endpoints of a
//! natural-language-to-SQL service.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::api::types::{AskRequest, AskResponse, ErrorBody};
use crate::api::Backend;
use crate::error::{AskError, Result};

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP backend configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Creates a config from environment variables.
    ///
    /// Reads `NL_ASK_URL` for the base URL (defaults to http://localhost:8000)
    /// and `NL_ASK_TIMEOUT_SECS` for the timeout (defaults to none).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("NL_ASK_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = std::env::var("NL_ASK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            base_url,
            timeout_secs,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// HTTP backend client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: HttpConfig,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend client with the given configuration.
    ///
    /// Validates the base URL up front so a typo fails at startup rather
    /// than on the first question.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| AskError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AskError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: HttpConfig {
                base_url,
                timeout_secs: config.timeout_secs,
            },
            client,
        })
    }

    /// Creates a backend client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(HttpConfig::from_env())
    }

    /// Returns the ask endpoint URL.
    fn ask_url(&self) -> String {
        format!("{}/ask", self.config.base_url)
    }

    /// Returns the health endpoint URL.
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    /// Maps a reqwest send error to a transport error with a usable message.
    fn send_error(&self, e: reqwest::Error) -> AskError {
        if e.is_timeout() {
            AskError::transport("Request timed out. Try again.")
        } else if e.is_connect() {
            AskError::transport(format!(
                "Failed to connect to {}. Is the backend running?",
                self.config.base_url
            ))
        } else {
            AskError::transport(format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn ask(&self, question: &str) -> Result<AskResponse> {
        let request = AskRequest::new(question);

        let response = self
            .client
            .post(self.ask_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AskError::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            return Err(match detail {
                Some(detail) => AskError::backend(detail),
                None => AskError::backend(format!("Request failed (HTTP {})", status.as_u16())),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| AskError::transport(format!("Failed to parse response: {}", e)))
    }

    async fn health(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.health_url())
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AskError::transport(format!("Failed to read response: {}", e)))?;

        Ok(serde_json::from_str::<HealthBody>(&body)
            .map(|h| h.ok)
            .unwrap_or(false))
    }

    fn describe(&self) -> String {
        self.config.base_url.clone()
    }
}

// Backend API types

#[derive(Debug, serde::Deserialize)]
struct HealthBody {
    #[serde(default)]
    ok: bool,
}
