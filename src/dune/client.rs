//! Dune API client implementation.
//!
//! This module provides the HTTP client that talks to the Dune Analytics
//! REST API. Every request carries the `X-Dune-API-Key` header and is bound
//! by the configured per-request timeout. There are no retries: a transport
//! failure surfaces immediately and the tool layer renders it as text.
//!
//! Note: Methods appear unused because they're called by MCP tool implementations.
//!
//! # Example
//!
//! ```ignore
//! use dune_mcp::dune::client::DuneClient;
//!
//! let client = DuneClient::builder().api_key("dqk_...").build()?;
//! let rows = client.get_latest_result(3237025, 100).await?;
//! ```

// Allow dead code warnings - methods are used by MCP server tools
#![allow(dead_code)]

use std::time::Instant;

use tracing::debug;

use crate::config::DuneConfig;
use crate::error::{ConfigError, DuneError};

use super::DuneResult;
use super::types::{
    ExecuteResponse, ExecutionState, ResultsResponse, Row, StatusResponse,
};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "X-Dune-API-Key";

/// Maximum length of an upstream error body quoted in error messages.
const BODY_SNIPPET_LEN: usize = 200;

/// Builder for constructing a Dune API client.
#[derive(Debug, Default)]
pub struct DuneClientBuilder {
    config: DuneConfig,
}

impl DuneClientBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Sets the base URL of the Dune API.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the per-request HTTP timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Sets the delay between execution status polls.
    #[must_use]
    pub fn poll_interval(mut self, interval: std::time::Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Replaces the entire configuration.
    #[must_use]
    pub fn config(mut self, config: DuneConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the client, validating the configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error when the API key is empty, the base URL is blank,
    /// or the underlying HTTP client cannot be constructed.
    pub fn build(mut self) -> crate::error::Result<DuneClient> {
        if self.config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }

        while self.config.base_url.ends_with('/') {
            self.config.base_url.pop();
        }
        if self.config.base_url.is_empty() {
            return Err(ConfigError::InvalidBaseUrl("base URL is empty".to_string()).into());
        }

        let http = reqwest::Client::builder()
            .timeout(self.config.request_timeout)
            .build()
            .map_err(DuneError::Http)?;

        Ok(DuneClient {
            config: self.config,
            http,
        })
    }
}

/// Client for the Dune Analytics REST API.
///
/// Cheap to clone via the shared inner `reqwest::Client`; all state is
/// request-scoped.
#[derive(Debug, Clone)]
pub struct DuneClient {
    config: DuneConfig,
    http: reqwest::Client,
}

impl DuneClient {
    /// Creates a new builder.
    pub fn builder() -> DuneClientBuilder {
        DuneClientBuilder::new()
    }

    /// Returns the configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the fixed delay between execution status polls.
    pub fn poll_interval(&self) -> std::time::Duration {
        self.config.poll_interval
    }

    /// Fetches the most recently materialized results of a query.
    ///
    /// A response without result rows is "no data", not an error. The
    /// `limit` is forwarded verbatim as a server-side row cap.
    ///
    /// ## Errors
    ///
    /// Transport failures, non-2xx responses, and undecodable bodies.
    pub async fn get_latest_result(&self, query_id: u64, limit: u32) -> DuneResult<Vec<Row>> {
        let url = format!("{}/query/{}/results", self.config.base_url, query_id);
        let response: ResultsResponse = self.get_json(&url, Some(limit)).await?;
        Ok(response.into_rows())
    }

    /// Triggers a fresh run of a query and returns the execution handle.
    ///
    /// ## Errors
    ///
    /// As for reads, plus [`DuneError::MissingExecutionId`] when the
    /// response carries no handle.
    pub async fn execute_query(&self, query_id: u64) -> DuneResult<String> {
        let url = format!("{}/query/execute/{}", self.config.base_url, query_id);

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "execute request finished"
        );

        let decoded: ExecuteResponse = Self::decode(response).await?;
        decoded.execution_id.ok_or(DuneError::MissingExecutionId)
    }

    /// Reads the current state of an execution. Single read, no looping;
    /// the poll loop belongs to the caller.
    ///
    /// ## Errors
    ///
    /// Transport failures, non-2xx responses, and undecodable bodies.
    pub async fn get_execution_status(&self, execution_id: &str) -> DuneResult<ExecutionState> {
        let url = format!("{}/execution/{}/status", self.config.base_url, execution_id);
        let response: StatusResponse = self.get_json(&url, None).await?;
        Ok(ExecutionState::from_raw(&response.state))
    }

    /// Fetches the results of a finished execution.
    ///
    /// ## Errors
    ///
    /// Transport failures, non-2xx responses, and undecodable bodies.
    pub async fn get_execution_results(
        &self,
        execution_id: &str,
        limit: u32,
    ) -> DuneResult<Vec<Row>> {
        let url = format!(
            "{}/execution/{}/results",
            self.config.base_url, execution_id
        );
        let response: ResultsResponse = self.get_json(&url, Some(limit)).await?;
        Ok(response.into_rows())
    }

    /// Issues an authenticated GET and decodes the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        limit: Option<u32>,
    ) -> DuneResult<T> {
        let mut request = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let start = Instant::now();
        let response = request.send().await?;
        debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request finished"
        );

        Self::decode(response).await
    }

    /// Checks the status code and decodes the body.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> DuneResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DuneError::UpstreamStatus {
                status,
                message: body_snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| DuneError::UnexpectedShape(e.to_string()))
    }
}

/// Truncates an upstream body for inclusion in an error message.
fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() > BODY_SNIPPET_LEN {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < BODY_SNIPPET_LEN)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &trimmed[..cut])
    } else {
        trimmed.to_string()
    }
}
