//! Tool implementations.
//!
//! One tool exists:
//! - `query`: the `run_sql_query` handler with its read-only policy check

pub mod query;

pub use query::{QueryOutcome, REJECTION_MESSAGE, SqlQueryHandler};
