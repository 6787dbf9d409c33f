// src/api/transport.rs
//! The HTTP seam: issue a request, get JSON back or a transport error.
//!
//! Everything above this module works against [`Transport`]; the production
//! implementation is a thin wrapper around reqwest that handles
//! authentication headers and optional retries.

use crate::config::{HttpConfiguration, RetryPolicy};
use crate::error::NotionClientError;
use crate::error_recovery::retry_with_backoff;
use crate::types::ApiKey;
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Patch => write!(f, "PATCH"),
        }
    }
}

/// Which credentials a request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// The configured access token
    Bearer,
    /// Client credentials, used only by the OAuth token exchange
    Basic { user: String, password: String },
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// e.g. `blocks/{id}/children`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub auth: RequestAuth,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
            auth: RequestAuth::Bearer,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(body))
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, path, Some(body))
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = RequestAuth::Basic {
            user: user.into(),
            password: password.into(),
        };
        self
    }

    /// Value of a query parameter, if present.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-2xx status. `body` is the raw text.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("{message}")]
    Io { message: String },
}

impl TransportError {
    /// Rate limiting and server-side failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::Io { .. } => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Io {
            message: e.to_string(),
        }
    }
}

/// Issues one API request. Implementations must be shareable across the
/// tasks of a recursive block fetch.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

/// The production transport.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ReqwestTransport {
    pub fn new(
        http: &HttpConfiguration,
        access_token: Option<&ApiKey>,
    ) -> Result<Self, NotionClientError> {
        let mut builder = Client::builder()
            .default_headers(Self::create_headers(http, access_token)?)
            .user_agent(http.user_agent.clone());

        if let Some(timeout) = http.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy) = &http.proxy {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| NotionClientError::Client {
                message: format!("Invalid proxy '{}'", proxy),
                source: Some(Box::new(e)),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| NotionClientError::Client {
            message: "Failed to build HTTP client".to_string(),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: http.base_url.as_base().to_string(),
            retry: http.retry,
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(
        http: &HttpConfiguration,
        access_token: Option<&ApiKey>,
    ) -> Result<header::HeaderMap, NotionClientError> {
        let mut headers = header::HeaderMap::new();

        if let Some(api_key) = access_token {
            let auth_header = format!("Bearer {}", api_key.as_str());
            let mut value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
                NotionClientError::client(format!("Invalid API token format: {}", e))
            })?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(&http.notion_version).map_err(|e| {
                NotionClientError::client(format!("Invalid Notion-Version header: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let url = format!("{}/{}", self.base_url, request.path);
        log::debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        // Request headers take precedence over the default Bearer header.
        if let RequestAuth::Basic { user, password } = &request.auth {
            builder = builder.basic_auth(user, Some(password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = extract_response_text(builder.send().await?).await?;
        if !response.status.is_success() {
            log::debug!("{} {} -> {}", request.method, response.url, response.status);
            return Err(TransportError::Status {
                status: response.status.as_u16(),
                body: response.data,
            });
        }

        serde_json::from_str(&response.data).map_err(|e| TransportError::Io {
            message: format!("Invalid JSON in response from {}: {}", response.url, e),
        })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        if self.retry.max_attempts <= 1 {
            return self.send(&request).await;
        }
        retry_with_backoff(
            || self.send(&request),
            self.retry.max_attempts,
            self.retry.initial_delay,
            self.retry.max_delay,
            TransportError::is_retryable,
        )
        .await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(
    response: Response,
) -> Result<ApiResponse<String>, TransportError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
