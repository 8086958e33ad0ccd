//! Integration tests for the tool's wire-level output shapes.
//!
//! These tests verify the mapping from query outcomes to MCP call results:
//! pretty-printed JSON for rows, and flagged text blocks for policy
//! rejections and execution failures.

use pg_mcp_server::mcp::service::render_outcome;
use pg_mcp_server::tools::query::QueryOutcome;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Map, Value, json};

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

fn row(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Test the exact formatting of the canonical `SELECT 1 as n` example.
#[test]
fn test_single_row_formatting_is_exact() {
    let result = render_outcome(QueryOutcome::Rows(vec![row(&[("n", json!(1))])])).unwrap();

    assert_eq!(text_of(&result), "[\n  {\n    \"n\": 1\n  }\n]");
    assert!(result.is_error.is_none() || !result.is_error.unwrap());
}

/// Test that an empty result set renders as an empty JSON array.
#[test]
fn test_empty_result_set() {
    let result = render_outcome(QueryOutcome::Rows(Vec::new())).unwrap();
    assert_eq!(text_of(&result), "[]");
}

/// Test that the output text is valid JSON parsing back to the rows,
/// preserving row order.
#[test]
fn test_rows_round_trip_in_order() {
    let rows = vec![
        row(&[("id", json!(2)), ("name", json!("widget"))]),
        row(&[("id", json!(1)), ("name", json!(Value::Null))]),
    ];
    let result = render_outcome(QueryOutcome::Rows(rows.clone())).unwrap();

    let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
    let array = parsed.as_array().expect("output should be a JSON array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["id"], json!(2));
    assert_eq!(array[1]["id"], json!(1));
    assert_eq!(array[1]["name"], Value::Null);
}

/// Test that a policy rejection is a flagged text block with the fixed
/// message.
#[test]
fn test_rejection_is_flagged_with_fixed_message() {
    let result = render_outcome(QueryOutcome::Rejected).unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(text_of(&result), "Error: Only SELECT queries are allowed.");
}

/// Test that an execution failure is a flagged text block carrying the
/// driver's message behind the fixed prefix.
#[test]
fn test_execution_failure_carries_driver_message() {
    let result = render_outcome(QueryOutcome::Failed(
        r#"relation "nonexistent_table" does not exist"#.to_string(),
    ))
    .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text_of(&result),
        r#"SQL Error: relation "nonexistent_table" does not exist"#
    );
}

/// Test the generic fallback when no driver message is available.
#[test]
fn test_execution_failure_fallback_message() {
    let result = render_outcome(QueryOutcome::Failed(String::new())).unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(text_of(&result), "SQL Error: An unknown error occurred");
}
