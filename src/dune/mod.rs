//! Dune Analytics API client module.
//!
//! This module implements the HTTP client for the Dune Analytics REST API:
//! fetching materialized query results, triggering executions, reading
//! execution status, and converting result rows to CSV.
//!
//! # Architecture
//!
//! The module is organized into:
//! - `client`: the authenticated HTTP client and its builder
//! - `types`: wire-format response types and the CSV conversion
//!
//! # Usage
//!
//! ```ignore
//! use dune_mcp::dune::client::DuneClient;
//! use dune_mcp::dune::types::rows_to_csv;
//!
//! let client = DuneClient::builder().api_key("dqk_...").build()?;
//! let rows = client.get_latest_result(3237025, 100).await?;
//! let csv = rows_to_csv(&rows);
//! ```

pub mod client;
pub mod types;

// Re-export the client for convenient access
pub use client::DuneClient;
pub use types::{ExecutionState, Row, rows_to_csv};

use crate::error::DuneError;

/// Result type for Dune API operations.
pub type DuneResult<T> = std::result::Result<T, DuneError>;
