//! Server configuration.
//!
//! All tunable settings live in [`DuneConfig`], constructed once in `main`
//! and handed to the client builder. There is no ambient or static
//! configuration state anywhere in the crate.

// Allow dead code warnings - constructors are used by the library surface
#![allow(dead_code)]

use std::time::Duration;

/// Default base URL of the Dune Analytics REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.dune.com/api/v1";

/// Upper bound on a single HTTP request to the Dune API.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Fixed delay between consecutive execution status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Configuration for the Dune API client.
#[derive(Debug, Clone)]
pub struct DuneConfig {
    /// API key sent as `X-Dune-API-Key` on every request.
    pub api_key: String,
    /// Base URL of the Dune REST API, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
    /// Delay between consecutive status polls while an execution runs.
    pub poll_interval: Duration,
}

impl DuneConfig {
    /// Creates a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for DuneConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
