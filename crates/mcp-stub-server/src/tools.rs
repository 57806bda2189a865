//! The two fixed test tools exposed for discovery and invocation.
//!
//! The descriptor set is constant for the process lifetime; only the
//! environment-derived substring in the first tool's description varies
//! between runs.

use mcp_stub_types::{error_result, success_result, CallToolParams, Content, ToolCallResult, ToolDescriptor};
use serde_json::{json, Value};

pub const TOOL_ONE: &str = "test_tool_1";
pub const TOOL_TWO: &str = "test_tool_2";

/// Environment variable read at list and call time, used by the caller to
/// verify environment inheritance across process launch.
pub const TEST_ENV_VAR: &str = "TEST_ENV_VAR";
const ENV_NOT_SET: &str = "not_set";

fn test_env_var() -> String {
    std::env::var(TEST_ENV_VAR).unwrap_or_else(|_| ENV_NOT_SET.to_string())
}

/// Build the tool descriptors, in their fixed order.
pub fn descriptors() -> Vec<ToolDescriptor> {
    let test_env_var = test_env_var();

    vec![
        ToolDescriptor {
            name: TOOL_ONE.to_string(),
            title: "Test Tool 1".to_string(),
            description: format!("A test tool that returns environment variable: {test_env_var}"),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": "Test input"
                    }
                },
                "required": []
            }),
        },
        ToolDescriptor {
            name: TOOL_TWO.to_string(),
            title: "Test Tool 2".to_string(),
            description: "Another test tool".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "type": "number",
                        "description": "A numeric value"
                    }
                },
                "required": ["value"]
            }),
        },
    ]
}

/// Execute a tool call. Unknown names come back as `is_error: true` inside a
/// normal result; arguments are used as given, never type-checked.
pub fn call(params: &CallToolParams) -> ToolCallResult {
    match params.name.as_deref() {
        Some(TOOL_ONE) => {
            let input = params
                .arguments
                .get("input")
                .map(render_argument)
                .unwrap_or_else(|| "no input".to_string());
            let test_env_var = test_env_var();
            success_result(vec![Content::text(format!(
                "Test Tool 1 executed with input: {input}, ENV: {test_env_var}"
            ))])
        }
        Some(TOOL_TWO) => {
            let value = params
                .arguments
                .get("value")
                .map(render_argument)
                .unwrap_or_else(|| "0".to_string());
            success_result(vec![Content::text(format!(
                "Test Tool 2 executed with value: {value}"
            ))])
        }
        other => error_result(format!("Unknown tool: {}", other.unwrap_or("null"))),
    }
}

// Strings interpolate bare; everything else in its compact JSON rendering
fn render_argument(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
