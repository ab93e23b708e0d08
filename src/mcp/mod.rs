//! MCP (Model Context Protocol) server module.
//!
//! This module implements the MCP server that exposes Dune Analytics query
//! tools to LLM applications. The server uses stdio transport to
//! communicate with clients.
//!
//! # Architecture
//!
//! The MCP module is organized into:
//! - `server`: the tool router and handler implementations
//! - `tools`: tool parameter schemas
//!
//! # Usage
//!
//! ```ignore
//! use dune_mcp::mcp::DuneServer;
//! use rmcp::{ServiceExt, transport::stdio};
//!
//! let server = DuneServer::new(client);
//! let service = server.serve(stdio()).await?;
//! service.waiting().await?;
//! ```

pub mod server;
pub mod tools;

// Re-export the DuneServer for convenient access
pub use server::DuneServer;
