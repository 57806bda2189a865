//! MCP Stub Types - protocol data model for the stub server
//!
//! This crate provides the JSON-RPC envelope and the tool-related payload
//! types exchanged over the stdio transport. Only the subset of the MCP
//! protocol exercised by orchestrator integration tests is modeled here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version echoed back by the initialize handler.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub type JsonRpcMessage = serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Success response carrying `result`. The `id` is echoed verbatim;
    /// requests without one get an explicit null.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Protocol-level error response carrying `error`.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// Static description of a callable tool, as returned by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
}

/// A single content block inside a tool-call result. Only text blocks are
/// produced by this server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }
}

/// Result payload of a `tools/call`. Unknown tools are reported through
/// `is_error`, never as a JSON-RPC error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(rename = "isError")]
    pub is_error: bool,
    pub content: Vec<Content>,
}

pub fn success_result(content: Vec<Content>) -> ToolCallResult {
    ToolCallResult {
        is_error: false,
        content,
    }
}

pub fn error_result(message: impl Into<String>) -> ToolCallResult {
    ToolCallResult {
        is_error: true,
        content: vec![Content::text(message)],
    }
}

/// Parameters of a `tools/call` request. Every field is optional on the
/// wire; absent keys fall back to their defaults, no type validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallToolParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl CallToolParams {
    /// Decode from a request's `params` value, treating anything that does
    /// not fit the expected shape as if the parameters were absent.
    pub fn from_value(params: Option<&Value>) -> Self {
        params
            .cloned()
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default()
    }
}

// Error handling utilities
pub mod error {
    /// Common JSON-RPC error codes
    pub mod codes {
        pub const PARSE_ERROR: i32 = -32700;
        pub const INVALID_REQUEST: i32 = -32600;
        pub const METHOD_NOT_FOUND: i32 = -32601;
        pub const INVALID_PARAMS: i32 = -32602;
        pub const INTERNAL_ERROR: i32 = -32603;
    }
}
