//! Wire-format types for the Dune Analytics REST API.
//!
//! This module defines the response shapes the client deserializes and the
//! row-to-CSV conversion used by every tool. Response structs are tolerant:
//! a body missing `result` or `rows` decodes to an empty row set rather
//! than failing the call.
//!
//! Note: Types here are used by the MCP server layer but may appear
//! unused due to macro-generated code.

// Allow dead code warnings for types used by the MCP layer
#![allow(dead_code)]

use serde::Deserialize;
use serde_json::Value;

/// One record of a query's tabular result: column name to scalar value.
///
/// Column order follows the upstream payload (`serde_json` is built with
/// `preserve_order`).
pub type Row = serde_json::Map<String, Value>;

/// Response body of the `results` endpoints.
#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    /// Result payload; absent when the query has never materialized.
    #[serde(default)]
    pub result: Option<ResultPayload>,
}

impl ResultsResponse {
    /// Extracts the rows, treating a missing payload as an empty result set.
    pub fn into_rows(self) -> Vec<Row> {
        self.result.map(|payload| payload.rows).unwrap_or_default()
    }
}

/// Inner payload of a results response.
#[derive(Debug, Default, Deserialize)]
pub struct ResultPayload {
    /// The result rows; absent rows decode as empty.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Response body of the execute endpoint.
#[derive(Debug, Deserialize)]
pub struct ExecuteResponse {
    /// Opaque handle of the triggered execution.
    #[serde(default)]
    pub execution_id: Option<String>,
}

/// Response body of the execution status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    /// Raw state string, e.g. `QUERY_STATE_EXECUTING`.
    #[serde(default)]
    pub state: String,
}

/// Observed state of a query execution.
///
/// State transitions are owned entirely by the upstream service; this crate
/// only reads them. The raw string is kept for terminal states so failure
/// messages can embed it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    /// Queued, not yet running.
    Pending,
    /// Currently running.
    Executing,
    /// Finished successfully; results can be fetched.
    Completed,
    /// Any other terminal state (failed, cancelled, expired, ...).
    Other(String),
}

impl ExecutionState {
    /// Parses the raw state string reported by the API.
    ///
    /// Dune reports `QUERY_STATE_`-prefixed values; bare values are accepted
    /// as well.
    pub fn from_raw(raw: &str) -> Self {
        match raw.strip_prefix("QUERY_STATE_").unwrap_or(raw) {
            "PENDING" => Self::Pending,
            "EXECUTING" => Self::Executing,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Whether the execution is still in flight and worth polling again.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Executing)
    }
}

impl std::fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "QUERY_STATE_PENDING"),
            Self::Executing => write!(f, "QUERY_STATE_EXECUTING"),
            Self::Completed => write!(f, "QUERY_STATE_COMPLETED"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Converts result rows to CSV text.
///
/// The header row comes from the first row's keys in iteration order; every
/// row contributes one line. Rows are assumed to share a uniform column set.
/// Returns an empty string for an empty row set.
pub fn rows_to_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut csv = String::new();

    let header: Vec<String> = columns.iter().map(|c| escape_csv_field(c)).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for row in rows {
        let line: Vec<String> = columns
            .iter()
            .map(|col| escape_csv_field(&render_scalar(row.get(*col))))
            .collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }

    csv
}

/// Renders a JSON value as a bare CSV cell.
///
/// Strings render unquoted, null as empty, numbers and booleans via their
/// display form. Nested arrays and objects fall back to compact JSON.
fn render_scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// Quotes a field when it contains a delimiter, quote, or line break.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
