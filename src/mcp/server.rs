//! MCP server implementation for dune-mcp.
//!
//! This module contains the `DuneServer` struct that implements the MCP
//! server with Dune Analytics query tools.
//!
//! Every tool returns its outcome as text content. Upstream failures are
//! rendered into that text rather than raised as protocol errors: a broken
//! query must never crash or hang the server process.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use tracing::{debug, info, warn};

use crate::dune::client::DuneClient;
use crate::dune::types::{ExecutionState, Row, rows_to_csv};
use crate::error::DuneError;

use super::tools::{AggregationParams, GetLatestResultParams, RunQueryParams};

/// Sentinel returned when a single query yields no rows.
const NO_DATA: &str = "No data available";

/// Sentinel returned when every query in an aggregation list fails or is empty.
const NO_AGGREGATE_DATA: &str = "No data available from any queries.";

/// Literal failure text when an execute request yields no handle.
const EXECUTION_START_FAILED: &str = "Failed to start query execution.";

/// Query ids backing `get_chainlink_revenue`.
pub const CHAINLINK_REVENUE_QUERIES: &[u64] = &[2615552, 2615580, 2616169, 2616545, 2617035];

/// Query ids backing `get_pumpfun_data`.
pub const PUMPFUN_QUERIES: &[u64] = &[
    3837014, 3837044, 3915674, 3952344, 3837044, 4013882, 4052799, 4120476,
];

/// Query ids backing `get_solana_memecoin_data`.
pub const SOLANA_MEMECOIN_QUERIES: &[u64] = &[
    3421705, 3421789, 3430842, 3445551, 3460779, 3473400, 3481792, 3497046, 3512280, 3528451,
    3544107, 3559923,
];

/// Query ids backing `get_dex_trading_data`.
pub const DEX_TRADING_QUERIES: &[u64] = &[
    1215383, 1221027, 1223504, 1229350, 1234281, 1239241, 1246106, 1252714, 1259023, 1265429,
    1271852, 1278390, 1221027, 1284951, 1291537, 1298148, 1304785, 1311448, 1318137, 1324853,
    1331596, 1338366, 1345164, 1351990,
];

/// MCP server exposing Dune Analytics queries as tools.
#[derive(Clone)]
pub struct DuneServer {
    /// Client for the Dune REST API.
    client: Arc<DuneClient>,
    #[allow(dead_code)]
    tool_router: ToolRouter<DuneServer>,
}

impl DuneServer {
    /// Creates a new `DuneServer` around a configured client.
    pub fn new(client: DuneClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }
}

// Helper functions for rendering tool results.
// Note: These are called by the #[tool_router] macro-generated code,
// but the compiler's dead code analysis doesn't see through macros.

/// Wraps text in a successful tool result.
#[allow(dead_code)]
fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Renders rows as CSV, substituting the no-data sentinel for empty sets.
#[allow(dead_code)]
fn csv_or_sentinel(rows: &[Row]) -> String {
    if rows.is_empty() {
        NO_DATA.to_string()
    } else {
        rows_to_csv(rows)
    }
}

/// Fetches latest results for each query id in order and renders one report.
///
/// Failures and empty results are isolated per id: a bad query is logged and
/// skipped, never aborting the remaining fetches. Duplicated ids are fetched
/// independently and appear once per occurrence.
#[allow(dead_code)]
async fn collect_report(client: &DuneClient, query_ids: &[u64], limit: u32) -> String {
    let mut sections: Vec<String> = Vec::new();

    for &query_id in query_ids {
        match client.get_latest_result(query_id, limit).await {
            Ok(rows) if rows.is_empty() => {
                debug!(query_id, "query returned no rows, omitting from report");
            }
            Ok(rows) => {
                sections.push(format!("=== Query {query_id} ===\n{}", rows_to_csv(&rows)));
            }
            Err(e) => {
                warn!(query_id, error = %e, "query fetch failed, skipping");
            }
        }
    }

    if sections.is_empty() {
        return NO_AGGREGATE_DATA.to_string();
    }

    let mut report = format!(
        "Fetched data from {} of {} queries.\n\n",
        sections.len(),
        query_ids.len()
    );
    report.push_str(&sections.join("\n"));
    report
}

/// Tool implementations for `DuneServer`.
#[tool_router]
impl DuneServer {
    /// Read the latest materialized results of a query.
    #[tool(
        description = "Get the latest results of a Dune query as CSV. Reads the most recent materialized result set without triggering a new execution."
    )]
    pub async fn get_latest_result(
        &self,
        Parameters(params): Parameters<GetLatestResultParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = match self
            .client
            .get_latest_result(params.query_id, params.limit)
            .await
        {
            Ok(rows) => csv_or_sentinel(&rows),
            Err(e) => format!("Error fetching query results: {e}"),
        };

        Ok(text_result(text))
    }

    /// Execute a query, wait for completion, and return its results.
    #[tool(
        description = "Run a Dune query and return fresh results as CSV. Triggers a new execution and polls until it completes; may take a while for heavy queries."
    )]
    pub async fn run_query(
        &self,
        Parameters(params): Parameters<RunQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let execution_id = match self.client.execute_query(params.query_id).await {
            Ok(id) => id,
            Err(DuneError::MissingExecutionId) => {
                return Ok(text_result(EXECUTION_START_FAILED));
            }
            Err(e) => {
                return Ok(text_result(format!("Error starting query execution: {e}")));
            }
        };

        info!(
            query_id = params.query_id,
            execution_id = %execution_id,
            "query execution started"
        );

        loop {
            match self.client.get_execution_status(&execution_id).await {
                Ok(state) if state.is_in_flight() => {
                    debug!(execution_id = %execution_id, state = %state, "execution in flight");
                    tokio::time::sleep(self.client.poll_interval()).await;
                }
                Ok(ExecutionState::Completed) => break,
                Ok(state) => {
                    return Ok(text_result(format!(
                        "Query execution failed with state: {state}"
                    )));
                }
                Err(e) => {
                    return Ok(text_result(format!("Error polling execution status: {e}")));
                }
            }
        }

        let text = match self
            .client
            .get_execution_results(&execution_id, params.limit)
            .await
        {
            Ok(rows) => csv_or_sentinel(&rows),
            Err(e) => format!("Error fetching execution results: {e}"),
        };

        Ok(text_result(text))
    }

    /// Comprehensive Chainlink protocol revenue data.
    #[tool(
        description = "Get comprehensive Chainlink revenue data across curated Dune queries, returned as CSV sections per query."
    )]
    pub async fn get_chainlink_revenue(
        &self,
        Parameters(params): Parameters<AggregationParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = collect_report(&self.client, CHAINLINK_REVENUE_QUERIES, params.limit).await;
        Ok(text_result(report))
    }

    /// Comprehensive pump.fun activity data.
    #[tool(
        description = "Get comprehensive pump.fun market data across curated Dune queries, returned as CSV sections per query."
    )]
    pub async fn get_pumpfun_data(
        &self,
        Parameters(params): Parameters<AggregationParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = collect_report(&self.client, PUMPFUN_QUERIES, params.limit).await;
        Ok(text_result(report))
    }

    /// Comprehensive Solana memecoin market data.
    #[tool(
        description = "Get comprehensive Solana memecoin data across curated Dune queries, returned as CSV sections per query."
    )]
    pub async fn get_solana_memecoin_data(
        &self,
        Parameters(params): Parameters<AggregationParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = collect_report(&self.client, SOLANA_MEMECOIN_QUERIES, params.limit).await;
        Ok(text_result(report))
    }

    /// Comprehensive DEX trading data.
    #[tool(
        description = "Get comprehensive DEX trading data across curated Dune queries, returned as CSV sections per query."
    )]
    pub async fn get_dex_trading_data(
        &self,
        Parameters(params): Parameters<AggregationParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = collect_report(&self.client, DEX_TRADING_QUERIES, params.limit).await;
        Ok(text_result(report))
    }
}

#[tool_handler]
impl ServerHandler for DuneServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dune-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Dune Analytics query results as tools. Read latest results of any query by id, \
                 execute queries and wait for fresh results, or pull curated multi-query reports \
                 for Chainlink revenue, pump.fun, Solana memecoins, and DEX trading. All results \
                 are returned as CSV text."
                    .into(),
            ),
        }
    }
}
