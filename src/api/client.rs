//! WhatTheGovDoin REST API client implementation.
//!
//! [`QueryClient`] performs exactly one HTTP round trip per call and
//! normalizes the outcome to [`ApiResult`]. No retries, no caching.
//!
//! # Example
//!
//! ```rust,ignore
//! use govdoin::api::{QueryClient, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueryClient::new("http://localhost:5001")?;
//!
//!     let params = QueryParams::new().with("query_text", "tariffs").with("top_k", 5);
//!     let payload = client.fetch_json("/api/articles", &params).await?;
//!     println!("{}", payload);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::outcome::ResultExt;
use crate::api::params::{build_url, QueryParams};
use crate::api::types::*;
use crate::config::RuntimeConfig;
use crate::network::routes;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring [`QueryClient`].
#[derive(Debug, Clone)]
pub struct QueryClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    default_headers: Vec<(String, String)>,
}

impl QueryClientBuilder {
    /// Create a new builder with the given base origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            default_headers: Vec::new(),
        }
    }

    /// Create a builder from an injected runtime configuration.
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Wait on the transport indefinitely.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<QueryClient> {
        let base_url = Url::parse(self.base_url.trim()).map_err(|e| {
            ApiError::InvalidEndpoint(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str()).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = reqwest::header::HeaderValue::from_str(&value).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(10);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(QueryClient {
            http_client: builder.build()?,
            base_url,
        })
    }
}

/// WhatTheGovDoin REST API client.
///
/// Cheap to clone; clones share the connection pool. Concurrent calls are
/// independent of each other.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http_client: Client,
    base_url: Url,
}

impl QueryClient {
    /// Create a new client with the given base origin.
    ///
    /// Uses default settings (30s timeout, connection pooling).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        QueryClientBuilder::new(base_url).build()
    }

    /// Create a client from an injected runtime configuration.
    pub fn from_config(config: &RuntimeConfig) -> ApiResult<Self> {
        QueryClientBuilder::from_config(config).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> QueryClientBuilder {
        QueryClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint and its parameters without sending anything.
    pub fn url_for(&self, endpoint: &str, params: &QueryParams) -> ApiResult<Url> {
        build_url(&self.base_url, endpoint, params)
    }

    // =========================================================================
    // Generic operations
    // =========================================================================

    /// GET `endpoint` with `params` appended and return the parsed JSON body.
    pub async fn fetch_json(&self, endpoint: &str, params: &QueryParams) -> ApiResult<Value> {
        self.fetch_as(endpoint, params).await
    }

    /// GET and decode the body into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> ApiResult<T> {
        let url = self.url_for(endpoint, params)?;
        tracing::debug!(method = "GET", url = %url, "Sending request");
        self.execute(self.http_client.get(url)).await
    }

    /// POST `body` as JSON and return the parsed JSON response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<Value> {
        self.post_as(endpoint, body).await
    }

    /// POST `body` as JSON and decode the response into `T`.
    pub async fn post_as<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url_for(endpoint, &QueryParams::new())?;
        tracing::debug!(method = "POST", url = %url, "Sending request");
        self.execute(self.http_client.post(url).json(body)).await
    }

    /// [`fetch_json`](Self::fetch_json), with failures logged and collapsed to `None`.
    pub async fn fetch_json_opt(&self, endpoint: &str, params: &QueryParams) -> Option<Value> {
        self.fetch_json(endpoint, params)
            .await
            .or_log("fetching results")
    }

    /// [`post_json`](Self::post_json), with failures logged and collapsed to `None`.
    pub async fn post_json_opt<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Option<Value> {
        self.post_json(endpoint, body).await.or_log("posting data")
    }

    /// POST and report only whether the server accepted the write.
    pub async fn post_ok<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> bool {
        self.post_json(endpoint, body).await.succeeded("posting data")
    }

    /// Fetch a key-value configuration document and parse it.
    ///
    /// The document is treated as data; see [`RuntimeConfig::parse`].
    pub async fn load_config(&self, endpoint: &str) -> ApiResult<RuntimeConfig> {
        let url = self.url_for(endpoint, &QueryParams::new())?;
        tracing::debug!(method = "GET", url = %url, "Loading runtime config");
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status, &text));
        }
        Ok(RuntimeConfig::parse(&text)?)
    }

    // =========================================================================
    // Health endpoints
    // =========================================================================

    /// Check API health (GET /api/).
    pub async fn health_check(&self) -> ApiResult<StatusMessage> {
        self.fetch_as(routes::HEALTH, &QueryParams::new()).await
    }

    // =========================================================================
    // Similarity search endpoints
    // =========================================================================

    /// Articles ranked by similarity to `query_text`.
    pub async fn fetch_articles(
        &self,
        query_text: &str,
        top_k: u32,
    ) -> ApiResult<Vec<SimilarityResult>> {
        let params = Self::similarity_params(query_text, top_k)?;
        self.fetch_as(routes::ARTICLES, &params).await
    }

    /// Executive orders ranked by similarity to `query_text`.
    pub async fn fetch_executive(
        &self,
        query_text: &str,
        top_k: u32,
    ) -> ApiResult<Vec<SimilarityResult>> {
        let params = Self::similarity_params(query_text, top_k)?;
        self.fetch_as(routes::EXECUTIVE, &params).await
    }

    /// Articles and executive orders related to a person.
    pub async fn fetch_biography(&self, query_text: &str, top_k: u32) -> ApiResult<BiographyResponse> {
        let params = Self::similarity_params(query_text, top_k)?;
        self.fetch_as(routes::BIOGRAPHY, &params).await
    }

    /// Run any [`SimilarityQuery`] against a similarity route.
    pub async fn search(
        &self,
        endpoint: &str,
        query: &SimilarityQuery,
    ) -> ApiResult<Vec<SimilarityResult>> {
        let params = Self::similarity_params(&query.query_text, query.top_k)?;
        self.fetch_as(endpoint, &params).await
    }

    // =========================================================================
    // Issue endpoints
    // =========================================================================

    /// All tracked issues.
    pub async fn fetch_issues(&self) -> ApiResult<Vec<Issue>> {
        self.fetch_as(routes::ISSUES, &QueryParams::new()).await
    }

    /// Replace an existing issue, returning the server's acknowledgement.
    pub async fn try_replace_issue(&self, issue: &Issue) -> ApiResult<StatusMessage> {
        self.post_as(routes::ISSUES, issue).await
    }

    /// Replace an existing issue. `false` on any failure (logged).
    pub async fn replace_issue(&self, issue: &Issue) -> bool {
        self.try_replace_issue(issue)
            .await
            .succeeded("replacing issue")
    }

    // =========================================================================
    // Summarization endpoints
    // =========================================================================

    /// Ask the service for a political-context summary of `prompt`.
    pub async fn fetch_summary(&self, prompt: &str) -> ApiResult<SummaryResponse> {
        let request = SummarizeRequest {
            prompt: prompt.to_string(),
        };
        let summary: SummaryResponse = self.post_as(routes::SUMMARIZE, &request).await?;
        tracing::debug!(llm_response = ?summary.llm_response, "LLM response");
        Ok(summary)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Send one request and normalize the outcome.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed before a response arrived");
            ApiError::Transport(e)
        })?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = Self::status_error(status, &body);
            tracing::warn!(status = status.as_u16(), error = %error, "Request rejected");
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "Response body is not the expected JSON");
            ApiError::Parse(e)
        })
    }

    /// Map a non-2xx response to an error, preferring the body's `error` field.
    fn status_error(status: reqwest::StatusCode, body: &str) -> ApiError {
        let fallback = status.canonical_reason().unwrap_or("Unknown status");
        ApiError::HttpStatus {
            status: status.as_u16(),
            message: ErrorResponse::from_body(body).message_or(fallback),
        }
    }

    fn similarity_params(query_text: &str, top_k: u32) -> ApiResult<QueryParams> {
        if query_text.is_empty() {
            return Err(ApiError::InvalidParameter(
                "query_text cannot be empty".to_string(),
            ));
        }
        Ok(QueryParams::new()
            .with("query_text", query_text)
            .with("top_k", top_k))
    }
}
