//! HTTP plumbing shared by the hosted store and auth adapters.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure talking to the hosted service
#[derive(Error, Debug)]
pub enum HostedError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-success status; `message` comes from the response body when it has one
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HostedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HostedError::Timeout
        } else if e.is_decode() {
            HostedError::Decode(e.to_string())
        } else {
            HostedError::Connection(e.to_string())
        }
    }
}

/// Connection settings for the hosted service
#[derive(Debug, Clone)]
pub struct HostedSettings {
    pub api_uri: String,
    pub app_id: String,
    pub admin_token: Option<String>,
    pub timeout: Option<Duration>,
}

/// Thin JSON-over-HTTP client for the admin API
#[derive(Debug, Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    base: String,
    app_id: String,
    admin_token: Option<String>,
}

impl HostedClient {
    pub fn new(settings: HostedSettings) -> Result<Self, HostedError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "askboard/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: settings.api_uri.trim_end_matches('/').to_string(),
            app_id: settings.app_id,
            admin_token: settings.admin_token,
        })
    }

    /// POST `body` to `path` and return the decoded JSON response.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, HostedError> {
        self.post_with_headers(path, body, &[]).await
    }

    /// Like [`post`](Self::post), with extra request headers such as the
    /// `as-email` impersonation header.
    pub async fn post_with_headers(
        &self,
        path: &str,
        body: Value,
        headers: &[(&'static str, String)],
    ) -> Result<Value, HostedError> {
        let response = self.request(path, body, headers).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(HostedError::Status {
                status: status.as_u16(),
                message: error_message(&text)
                    .unwrap_or_else(|| format!("Request failed with status {}", status)),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| HostedError::Decode(e.to_string()))
    }
}

impl HostedClient {
    fn request(
        &self,
        path: &str,
        body: Value,
        headers: &[(&'static str, String)],
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base, path);
        debug!(url = %url, "POST");

        let mut request = self
            .http
            .post(&url)
            .header("app-id", &self.app_id)
            .json(&body);
        if let Some(token) = &self.admin_token {
            request = request.bearer_auth(token);
        }
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        request
    }
}

/// The `message` field of an error body, if there is one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
