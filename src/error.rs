//! Error types for the dune-mcp server.
//!
//! This module defines all error types used throughout the application,
//! organized by subsystem: the Dune API client and configuration.
//!
//! Tool handlers convert every `DuneError` into descriptive text returned as
//! a successful tool result — upstream failures are data at the protocol
//! boundary, never protocol-level errors.
//!
//! Note: Error variants defined for comprehensive error handling and future use.

// Allow dead code warnings - error types are for comprehensive coverage
#![allow(dead_code)]

use thiserror::Error;

/// Errors produced by the Dune API client.
#[derive(Debug, Error)]
pub enum DuneError {
    /// The HTTP request failed at the transport level (connect, timeout, TLS).
    #[error("request to Dune API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status code.
    #[error("Dune API returned {status}: {message}")]
    UpstreamStatus {
        /// The HTTP status code of the response.
        status: reqwest::StatusCode,
        /// A snippet of the response body, if any.
        message: String,
    },

    /// An execute request came back without an execution id.
    #[error("execute response contained no execution id")]
    MissingExecutionId,

    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// An execution reached a terminal state other than completed.
    #[error("query execution ended in state {state}")]
    ExecutionFailed {
        /// The raw state string reported by the upstream API.
        state: String,
    },
}

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was provided via flag or environment.
    #[error("missing Dune API key")]
    MissingApiKey,

    /// The base URL could not be used to build requests.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// A unified error type for the entire application.
#[derive(Debug, Error)]
pub enum Error {
    /// Dune API client error.
    #[error("Dune API error: {0}")]
    Dune(#[from] DuneError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for dune-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;
