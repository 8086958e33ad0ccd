//! Query execution against the connection pool.
//!
//! `fetch_rows` runs one statement end-to-end: acquire a connection from the
//! pool, execute, decode the rows, release. The pool hands the connection
//! back when the returned future completes, whether the query succeeded or
//! failed, so no manual release step exists.

use crate::db::types::RowToJson;
use crate::error::ServerResult;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

/// Execute a statement and return its rows as JSON object maps, preserving
/// the database's row order.
pub async fn fetch_rows(
    pool: &PgPool,
    sql: &str,
) -> ServerResult<Vec<serde_json::Map<String, JsonValue>>> {
    let start = Instant::now();
    let rows = sqlx::query(sql).fetch_all(pool).await?;
    let rows: Vec<_> = rows.iter().map(RowToJson::to_json_map).collect();

    debug!(
        row_count = rows.len(),
        execution_time_ms = start.elapsed().as_millis() as u64,
        "Fetched rows"
    );

    Ok(rows)
}
