//! The `run_sql_query` tool core.
//!
//! This module implements the read-only policy check and query execution,
//! producing a tagged `QueryOutcome` that the MCP layer maps onto the wire.
//! Policy rejections and execution failures are expected, user-facing
//! outcomes, so they are values here rather than errors.

use crate::db;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::{error, info, warn};

/// Fixed message returned when a statement fails the read-only check.
pub const REJECTION_MESSAGE: &str = "Error: Only SELECT queries are allowed.";

/// Outcome of one tool invocation.
///
/// All three variants travel back to the caller as tool output; only the
/// `Rows` variant reaches the database.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Query ran; rows in the database's returned order (empty for no rows).
    Rows(Vec<serde_json::Map<String, JsonValue>>),
    /// Statement failed the read-only policy check; never executed.
    Rejected,
    /// The driver or database reported a failure during execution.
    Failed(String),
}

/// Syntactic read-only check: does the trimmed statement begin with the
/// keyword `select`, case-insensitively?
///
/// This replicates the prefix test of the original server. It is not a
/// security boundary: statements that begin with `select` but smuggle writes
/// through CTEs or multi-statement strings pass it.
pub fn is_select_statement(sql: &str) -> bool {
    let trimmed = sql.trim();
    trimmed
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select"))
}

/// Handler bridging tool invocations to the connection pool.
///
/// Holds the pool as an explicit handle rather than ambient global state, so
/// tests can construct one against any pool.
#[derive(Clone)]
pub struct SqlQueryHandler {
    pool: PgPool,
}

impl SqlQueryHandler {
    /// Create a handler over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run one query through the policy check and, if allowed, the database.
    pub async fn run(&self, query: &str) -> QueryOutcome {
        let query = query.trim();

        if !is_select_statement(query) {
            warn!("Rejected non-SELECT statement");
            return QueryOutcome::Rejected;
        }

        match db::fetch_rows(&self.pool, query).await {
            Ok(rows) => {
                info!(row_count = rows.len(), "Query executed");
                QueryOutcome::Rows(rows)
            }
            Err(e) => {
                error!(error = %e, sql_state = ?e.sql_state(), "SQL query error");
                QueryOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Format an execution failure the way the tool reports it.
pub fn execution_error_text(message: &str) -> String {
    if message.is_empty() {
        return "SQL Error: An unknown error occurred".to_string();
    }
    format!("SQL Error: {}", message)
}
