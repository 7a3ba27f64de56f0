//! API error types for the WhatTheGovDoin query client.

use thiserror::Error;

/// Error type for a single query-client call.
///
/// Every failure is local to the call that produced it. Callers that only
/// care about success can degrade a result with
/// [`ResultExt::or_log`](crate::api::ResultExt::or_log).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: DNS, connection refused, timeout, body read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The response body was not valid JSON, or did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The endpoint could not be resolved to a URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A request parameter was rejected before any I/O.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A fetched configuration document could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::HttpStatus { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ApiError::Parse(_))
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ErrorResponse {
    /// Error text (`{"error": "..."}`)
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Parse an error body, tolerating non-JSON and non-object payloads.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The `error` field, or `fallback` when it is absent or empty.
    pub fn message_or(&self, fallback: &str) -> String {
        self.error
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}
