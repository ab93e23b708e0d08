//! MCP tool parameter definitions.
//!
//! Each tool exposed by the server takes one of the parameter structs below.
//! The structs double as JSON Schema sources for the MCP tool listing via
//! `schemars`.
//!
//! Note: Types here appear unused because they're consumed by proc macros.

// Allow dead code warnings - types are used by #[tool] and #[tool_router] macros
#![allow(dead_code)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `get_latest_result` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetLatestResultParams {
    /// The query to read results for.
    #[schemars(description = "Numeric id of the Dune query")]
    pub query_id: u64,
    /// Server-side cap on returned rows.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of rows to return (default: 100)")]
    pub limit: u32,
}

/// Parameters for the `run_query` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunQueryParams {
    /// The query to execute.
    #[schemars(description = "Numeric id of the Dune query to execute")]
    pub query_id: u64,
    /// Server-side cap on returned rows.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of rows to return (default: 100)")]
    pub limit: u32,
}

/// Parameters shared by the fixed-list aggregation tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AggregationParams {
    /// Server-side cap on rows returned per query.
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of rows to return per query (default: 100)")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}
