//! Error types for the PG MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Query execution errors keep the driver's message intact so it can
//! be surfaced to the caller verbatim.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// Database-reported failure. Displays as the bare driver message so the
    /// tool response can prefix it without double-wrapping.
    #[error("{message}")]
    Database {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    #[error("Timeout: {operation}")]
    Timeout { operation: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the SQL state code, if the database reported one.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Database { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }
}

/// Convert sqlx errors to ServerError.
impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => ServerError::connection(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                ServerError::database(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut => ServerError::timeout("connection pool acquire"),
            sqlx::Error::PoolClosed => ServerError::connection("Connection pool is closed"),
            sqlx::Error::Io(io_err) => ServerError::connection(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => {
                ServerError::connection(format!("TLS error: {}", tls_err))
            }
            sqlx::Error::Protocol(msg) => {
                ServerError::connection(format!("Protocol error: {}", msg))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                ServerError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                ServerError::internal(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => ServerError::internal("Database worker crashed"),
            _ => ServerError::internal("An unknown error occurred"),
        }
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
