//! Dune MCP Server
//!
//! An MCP (Model Context Protocol) server that exposes Dune Analytics query
//! results as callable tools for LLM applications (like Claude Code).
//!
//! # Overview
//!
//! This library provides:
//! - MCP server implementation with stdio transport
//! - HTTP client for the Dune Analytics REST API
//! - Tools for reading, executing, and aggregating query results as CSV
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     stdio      ┌─────────────────┐
//! │   LLM Client    │◄──────────────►│   MCP Server    │
//! │  (Claude Code)  │    (MCP)       │   (dune-mcp)    │
//! └─────────────────┘                └────────┬────────┘
//!                                             │
//!                                      ┌──────▼──────┐
//!                                      │ Dune Client │
//!                                      └──────┬──────┘
//!                                             │ HTTPS/JSON
//!                                      ┌──────▼────────┐
//!                                      │ Dune Analytics│
//!                                      │   REST API    │
//!                                      └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types for the entire application
//! - [`config`] - Server configuration
//! - [`dune`] - Dune API client implementation
//! - [`mcp`] - MCP server implementation

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod dune;
pub mod error;
pub mod mcp;

// Re-export commonly used types at the crate root
pub use config::DuneConfig;
pub use error::{Error, Result};
