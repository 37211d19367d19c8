//! Client for the hosted backend
//!
//! One [`BackendClient`] talks to the three services of a project:
//!
//! - `auth` - GoTrue endpoints under `{url}/auth/v1`
//! - `rest` - PostgREST tables under `{url}/rest/v1`
//! - `functions` - edge functions under `{url}/functions/v1`
//!
//! Every request carries the project's anon key in the `apikey` header.
//! Data calls additionally carry the caller's access token. Requests are
//! sent once; failures are returned to the caller, never retried.

pub mod auth;
pub mod functions;
pub mod rest;

pub use auth::SignUpOutcome;
pub use rest::{Filter, JOINED_TASK_SELECT};

use crate::config::BackendConfig;
use crate::error::{Result, ZestError};
use crate::models::Session;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use utils::{AuthHelper, ClientConfig, HttpClient};

/// HTTP client bound to one backend project
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: HttpClient,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    /// Create a client for the project at `url`
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let anon_key = anon_key.into();
        let config = ClientConfig::new()
            .with_timeout(timeout)
            .with_user_agent(concat!("zest/", env!("CARGO_PKG_VERSION")))
            .with_header("apikey", anon_key.as_str());

        Ok(Self {
            http: HttpClient::new(config)?,
            base_url: url.into().trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    /// Create a client from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(&config.url, &config.anon_key, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn functions_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name)
    }

    /// Start a request authorized as the session's user, or as the anon
    /// role when there is no session
    pub(crate) fn request(&self, method: Method, url: &str, session: Option<&Session>) -> RequestBuilder {
        let token = session
            .map(|s| s.access_token.as_str())
            .unwrap_or(self.anon_key.as_str());

        self.http
            .request(method, url)
            .header("Authorization", AuthHelper::bearer_token(token))
    }

    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response> {
        Ok(self.http.send(req).await?)
    }
}

/// Error body shapes returned by the backend services
///
/// PostgREST answers `{code, message, details, hint}`; GoTrue answers either
/// `{error, error_description}` or `{code, error_code, msg}`; edge functions
/// answer `{error}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Turn a non-success response body into a [`ZestError::Backend`]
pub(crate) fn backend_error(status: u16, body: &str) -> ZestError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let code = parsed.error_code.or_else(|| match parsed.code {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    });

    let mut message = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());

    if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
        message = format!("{} ({})", message, details);
    }
    if message.is_empty() {
        message = format!("request failed with status {}", status);
    }

    ZestError::Backend { status, code, message }
}

/// Read the body of a response, mapping non-success statuses to errors
pub(crate) async fn read_body(response: Response, context: &str) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let err = backend_error(status.as_u16(), &body);
        tracing::error!(status = status.as_u16(), error = %err, "{}", context);
        return Err(err);
    }

    Ok(body)
}

/// Read and decode a JSON response
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let body = read_body(response, context).await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "{}: undecodable response", context);
        ZestError::Decode(format!("{}: {}", context, e))
    })
}
