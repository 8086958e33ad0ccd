//! Database access layer.
//!
//! This module covers everything between the query tool and sqlx:
//! - Query execution against the shared `PgPool`
//! - PostgreSQL column-to-JSON type mappings

pub mod executor;
pub mod types;

pub use executor::fetch_rows;
pub use types::RowToJson;
