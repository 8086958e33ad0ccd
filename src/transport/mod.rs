//! Transport layer for the MCP server.
//!
//! Stdio is the only transport: the server is spawned by an MCP client and
//! speaks the protocol over its standard streams.

pub mod stdio;

pub use stdio::StdioTransport;

use crate::error::ServerResult;
use std::future::Future;

/// Trait for MCP transport implementations.
///
/// Transports handle the low-level communication between the MCP server
/// and clients, abstracting away the protocol details.
pub trait Transport: Send + Sync {
    /// Start the transport and begin handling requests.
    ///
    /// This method should block until the transport is shut down.
    fn run(&self) -> impl Future<Output = ServerResult<()>> + Send;

    /// Get the name of this transport for logging.
    fn name(&self) -> &'static str;
}
