//! PG MCP Server - Main entry point.
//!
//! This server exposes a single MCP (Model Context Protocol) tool,
//! `run_sql_query`, for running read-only SQL against one PostgreSQL
//! database.

use clap::Parser;
use pg_mcp_server::config::Config;
use pg_mcp_server::transport::{StdioTransport, Transport};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr: stdout carries the MCP protocol stream.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from environment variables and command line
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    // Fail fast on incomplete configuration, before any network activity
    let missing = config.missing_required();
    if !missing.is_empty() {
        eprintln!(
            "Missing required environment variables: {}",
            missing.join(", ")
        );
        eprintln!();
        eprintln!("Required: PG_HOST, PG_USER, PG_PASSWORD, PG_DATABASE");
        eprintln!("Optional: PG_PORT (default 5432)");
        std::process::exit(1);
    }

    info!(
        host = %config.host.as_deref().unwrap_or_default(),
        port = config.resolved_port(),
        database = %config.database.as_deref().unwrap_or_default(),
        "Starting PG MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Lazy pool: connections are established on first use, so a down
    // database surfaces as a per-query error rather than a startup failure
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(config.connect_options()?);

    let transport = StdioTransport::new(pool);
    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
