//! HTTP client shared by the backend and completion callers.
//!
//! [`HttpClient`] bakes its default headers and timeout into the underlying
//! `reqwest::Client`, so every request built from it carries them. Requests
//! are sent once; there is no retry.
//!
//! ```rust,ignore
//! use utils::client::{ClientConfig, HttpClient};
//!
//! let client = HttpClient::new(
//!     ClientConfig::new()
//!         .with_timeout(Duration::from_secs(30))
//!         .with_header("apikey", anon_key),
//! )?;
//! let response = client.send(client.request(Method::GET, url)).await?;
//! ```

use crate::error::{Result, UtilsError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied to every request of an [`HttpClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| UtilsError::Client(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| UtilsError::Client(format!("invalid value for header '{}': {}", name, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// `reqwest` client carrying a [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.header_map()?);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|e| UtilsError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request once, logging transport failures
    pub async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let response = req.send().await.map_err(|e| {
            tracing::error!(error = %e, "HTTP request failed");
            UtilsError::Http(e)
        })?;

        tracing::debug!(status = %response.status(), url = %response.url(), "HTTP response");
        Ok(response)
    }
}

/// Authorization header values
pub struct AuthHelper;

impl AuthHelper {
    pub fn bearer_token(token: &str) -> String {
        format!("Bearer {}", token)
    }
}
