//! Dune MCP Server - Entry Point
//!
//! This is the main entry point for the dune-mcp server.
//! It sets up logging, parses arguments, and starts the server.

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod dune;
mod error;
mod mcp;

use config::DuneConfig;
use dune::client::DuneClient;
use mcp::DuneServer;

/// MCP server exposing Dune Analytics query results as tools.
#[derive(Parser, Debug)]
#[command(name = "dune-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dune API key used to authenticate upstream requests.
    #[arg(long, env = "DUNE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the Dune REST API.
    #[arg(long, env = "DUNE_API_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Shortcut for --log-level debug.
    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        if self.debug {
            return Ok(Level::DEBUG);
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dune_mcp={level},reqwest={level}")));

    // Set up the subscriber
    // Note: We write logs to stderr to keep stdout clean for MCP communication
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let log_level = args.parse_log_level()?;
    init_tracing(log_level)?;

    info!(base_url = %args.base_url, "starting dune-mcp server");

    // Build the Dune API client from an explicit configuration object
    let config = DuneConfig {
        api_key: args.api_key,
        base_url: args.base_url,
        ..DuneConfig::default()
    };
    let client = DuneClient::builder()
        .config(config)
        .build()
        .context("failed to build Dune API client")?;

    // Create DuneServer instance with the client
    let server = DuneServer::new(client);

    info!("starting MCP server with stdio transport");

    // Start the MCP server with stdio transport
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;

    info!("MCP server started, waiting for messages");

    // Wait for the service to complete (handles graceful shutdown)
    service.waiting().await?;

    info!("MCP server shut down gracefully");

    Ok(())
}
