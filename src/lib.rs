//! PG MCP Server Library
//!
//! This library provides an MCP (Model Context Protocol) server that exposes
//! a single read-only SQL query tool backed by a PostgreSQL connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::ServerError;
pub use mcp::QueryService;
