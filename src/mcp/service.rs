//! MCP service implementation using rmcp.
//!
//! This module defines the QueryService struct exposing the single
//! `run_sql_query` tool via the MCP protocol using the rmcp framework's
//! macros. Protocol-shape failures (unknown tool, malformed arguments) are
//! handled by the framework's router and typed-parameter layer; everything
//! the tool itself produces - rows, policy rejections, SQL errors - travels
//! back as tool output.

use crate::tools::query::{
    QueryOutcome, REJECTION_MESSAGE, SqlQueryHandler, execution_error_text,
};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use sqlx::PgPool;

/// Input for the run_sql_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunSqlQueryInput {
    /// The SQL SELECT query to execute.
    pub query: String,
}

#[derive(Clone)]
pub struct QueryService {
    /// Handler owning the shared connection pool
    handler: SqlQueryHandler,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl QueryService {
    /// Create a new QueryService over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            handler: SqlQueryHandler::new(pool),
            tool_router: Self::tool_router(),
        }
    }
}

/// Map a query outcome onto the MCP call result shape.
///
/// Rejections and execution failures become successful protocol responses
/// with the error flag set, so callers see them as ordinary tool output
/// rather than transport faults.
pub fn render_outcome(outcome: QueryOutcome) -> Result<CallToolResult, McpError> {
    match outcome {
        QueryOutcome::Rows(rows) => {
            let text = serde_json::to_string_pretty(&rows).map_err(|e| {
                McpError::internal_error(format!("Failed to serialize rows: {}", e), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        QueryOutcome::Rejected => Ok(CallToolResult::error(vec![Content::text(
            REJECTION_MESSAGE,
        )])),
        QueryOutcome::Failed(message) => Ok(CallToolResult::error(vec![Content::text(
            execution_error_text(&message),
        )])),
    }
}

#[tool_router]
impl QueryService {
    #[tool(
        description = "Executes a read-only SQL query (SELECT statements only) against the configured PostgreSQL database."
    )]
    async fn run_sql_query(
        &self,
        Parameters(input): Parameters<RunSqlQueryInput>,
    ) -> Result<CallToolResult, McpError> {
        render_outcome(self.handler.run(&input.query).await)
    }
}

#[tool_handler]
impl ServerHandler for QueryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pg-mcp-server".to_owned(),
                title: Some("PostgreSQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only SQL access to a single PostgreSQL database.\n\
                \n\
                Call `run_sql_query` with a SELECT statement. The result is a\n\
                JSON array of row objects. Statements that do not begin with\n\
                SELECT are refused without reaching the database, and SQL\n\
                errors come back as flagged tool output prefixed with\n\
                `SQL Error:`."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    fn create_test_service() -> QueryService {
        // Lazy pool: no connection is attempted until a query runs
        let pool = PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new());
        QueryService::new(pool)
    }

    fn text_of(result: &CallToolResult) -> &str {
        result
            .content
            .iter()
            .find_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .expect("result should contain a text block")
    }

    #[tokio::test]
    async fn test_service_creation() {
        let _service = create_test_service();
    }

    #[tokio::test]
    async fn test_server_info() {
        let service = create_test_service();
        let info = service.get_info();
        assert_eq!(info.server_info.name, "pg-mcp-server");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_input_deserialization() {
        let input: RunSqlQueryInput =
            serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();
        assert_eq!(input.query, "SELECT 1");
    }

    #[test]
    fn test_input_requires_query_string() {
        assert!(serde_json::from_str::<RunSqlQueryInput>("{}").is_err());
        assert!(serde_json::from_str::<RunSqlQueryInput>(r#"{"query": 42}"#).is_err());
        assert!(serde_json::from_str::<RunSqlQueryInput>(r#"{"query": null}"#).is_err());
    }

    #[test]
    fn test_render_rows() {
        let mut row = serde_json::Map::new();
        row.insert("n".to_string(), serde_json::Value::Number(1.into()));

        let result = render_outcome(QueryOutcome::Rows(vec![row])).unwrap();
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
        assert_eq!(text_of(&result), "[\n  {\n    \"n\": 1\n  }\n]");
    }

    #[test]
    fn test_render_empty_rows() {
        let result = render_outcome(QueryOutcome::Rows(Vec::new())).unwrap();
        assert_eq!(text_of(&result), "[]");
    }

    #[test]
    fn test_render_rejection() {
        let result = render_outcome(QueryOutcome::Rejected).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Only SELECT queries are allowed.");
    }

    #[test]
    fn test_render_execution_failure() {
        let result =
            render_outcome(QueryOutcome::Failed("syntax error".to_string())).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "SQL Error: syntax error");
    }
}
