//! Stub MCP server: a single read-dispatch-write loop over stdio.
//!
//! Handling is fully synchronous and stateless; the only suspension point
//! is the blocking read of the next input line. Fixture diagnostics go to
//! stderr verbatim so the launching orchestrator can verify log capture.

use crate::error::Result;
use crate::tools;
use crate::transport::Transport;
use mcp_stub_types::{error::codes, CallToolParams, JsonRpcResponse, PROTOCOL_VERSION};
use serde_json::{json, Value};
use std::io::Write;
use tracing::{debug, info};

const SERVER_NAME: &str = "test-mcp-server";
const SERVER_VERSION: &str = "1.0.0";

/// Write one diagnostic line to stderr, flushed immediately. The lines fed
/// through here are test fixtures observed by an external log-format
/// detector; the `| LEVEL | msg` vs `| LEVEL msg` separator variation is
/// deliberate and must stay as-is.
fn diag(line: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{line}");
    let _ = stderr.flush();
}

pub struct StubServer;

impl StubServer {
    pub fn new() -> Self {
        Self
    }

    /// Run the message loop until the input stream is exhausted.
    pub async fn run<T: Transport>(&self, transport: &mut T) -> Result<()> {
        diag("| INFO | Test MCP server starting up");
        diag("| DEBUG Server initialization phase 1");

        loop {
            let line = match transport.receive().await? {
                Some(line) => line,
                None => {
                    info!("End of input - shutting down");
                    break;
                }
            };

            // Malformed lines are swallowed: no response, loop continues
            let message: Value = match serde_json::from_str(line.trim()) {
                Ok(message) => message,
                Err(e) => {
                    debug!("Skipping undecodable input line: {}", e);
                    continue;
                }
            };

            if let Some(response) = self.dispatch(&message) {
                transport.send(response).await?;
            }
        }

        transport.close().await?;
        Ok(())
    }

    /// Dispatch one decoded message. Returns the response to emit, or
    /// `None` for notifications.
    pub fn dispatch(&self, message: &Value) -> Option<Value> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);

        let response = match message.get("method").and_then(Value::as_str) {
            Some("initialize") => self.handle_initialize(id),
            Some("tools/list") => self.handle_list_tools(id),
            Some("tools/call") => self.handle_call_tool(id, message.get("params")),
            Some("notifications/initialized") => {
                // Fire-and-forget acknowledgment, no response
                debug!("Client initialization complete");
                return None;
            }
            _ => {
                let method = match message.get("method") {
                    None => "null".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                JsonRpcResponse::error(
                    id,
                    codes::METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                )
            }
        };

        // Constructed from plain data; serialization cannot fail
        serde_json::to_value(response).ok()
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        diag("| INFO | Test MCP server initializing");
        diag("| WARN | This is a test warning message");
        diag("| DEBUG Test debug message during initialization");

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_list_tools(&self, id: Value) -> JsonRpcResponse {
        diag("| INFO Listing available tools");
        diag("| DEBUG Found 2 tools to list");

        JsonRpcResponse::success(id, json!({ "tools": tools::descriptors() }))
    }

    fn handle_call_tool(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let params = CallToolParams::from_value(params);

        diag("| DEBUG | Received tool call request");
        diag(&format!(
            "| INFO Executing tool '{}' with arguments: {}",
            params.name.as_deref().unwrap_or("null"),
            Value::Object(params.arguments.clone())
        ));

        let result = tools::call(&params);

        // Tool-level failures ride inside a normal result payload
        JsonRpcResponse::success(id, json!(result))
    }
}

impl Default for StubServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use mcp_stub_types::JsonRpcMessage;
    use std::collections::VecDeque;

    struct MockTransport {
        incoming: VecDeque<String>,
        sent: Vec<JsonRpcMessage>,
        connected: bool,
    }

    impl MockTransport {
        fn new(lines: &[&str]) -> Self {
            Self {
                incoming: lines.iter().map(|l| l.to_string()).collect(),
                sent: Vec::new(),
                connected: true,
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&mut self, message: JsonRpcMessage) -> Result<()> {
            self.sent.push(message);
            Ok(())
        }

        async fn receive(&mut self) -> Result<Option<String>> {
            Ok(self.incoming.pop_front())
        }

        async fn close(&mut self) -> Result<()> {
            self.connected = false;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    #[test]
    fn test_initialize_echoes_id() {
        let server = StubServer::new();

        for id in [json!(1), json!("abc"), Value::Null] {
            let response = server
                .dispatch(&json!({"jsonrpc": "2.0", "id": id.clone(), "method": "initialize"}))
                .unwrap();
            assert_eq!(response["id"], id);
            assert_eq!(response["result"]["protocolVersion"], json!("2024-11-05"));
            assert_eq!(response["result"]["capabilities"]["tools"], json!({}));
            assert_eq!(
                response["result"]["serverInfo"]["name"],
                json!("test-mcp-server")
            );
        }
    }

    #[test]
    fn test_initialize_without_id_answers_null() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({"jsonrpc": "2.0", "method": "initialize"}))
            .unwrap();
        assert_eq!(response["id"], Value::Null);
        assert!(response.get("result").is_some());
    }

    #[test]
    fn test_list_tools_returns_two_tools_in_order() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
            .unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], json!("test_tool_1"));
        assert_eq!(tools[1]["name"], json!("test_tool_2"));
        assert_eq!(tools[1]["inputSchema"]["type"], json!("object"));
    }

    #[test]
    fn test_call_tool_rides_in_result_payload() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "test_tool_2", "arguments": {"value": 42}}
            }))
            .unwrap();
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], json!(false));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("42"));
    }

    #[test]
    fn test_call_unknown_tool_is_not_a_protocol_error() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "nonexistent_tool"}
            }))
            .unwrap();
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], json!(true));
        assert_eq!(
            response["result"]["content"][0]["text"],
            json!("Unknown tool: nonexistent_tool")
        );
    }

    #[test]
    fn test_unknown_method() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({"jsonrpc": "2.0", "id": 5, "method": "frobnicate"}))
            .unwrap();
        assert_eq!(response["error"]["code"], json!(-32601));
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("frobnicate"));
    }

    #[test]
    fn test_missing_method() {
        let server = StubServer::new();
        let response = server.dispatch(&json!({"jsonrpc": "2.0", "id": 6})).unwrap();
        assert_eq!(response["error"]["code"], json!(-32601));
        assert_eq!(response["error"]["message"], json!("Method not found: null"));
    }

    #[test]
    fn test_non_string_method() {
        let server = StubServer::new();
        let response = server
            .dispatch(&json!({"jsonrpc": "2.0", "id": 7, "method": 12}))
            .unwrap();
        assert_eq!(response["error"]["code"], json!(-32601));
        assert_eq!(response["error"]["message"], json!("Method not found: 12"));
    }

    #[test]
    fn test_initialized_notification_has_no_response() {
        let server = StubServer::new();
        let response = server.dispatch(&json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }));
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_loop_skips_malformed_lines() {
        let server = StubServer::new();
        let mut transport = MockTransport::new(&[
            "this is not json",
            r#"{"jsonrpc": "2.0", "id": 1, "method": "initialize"}"#,
            "{truncated",
            r#"{"jsonrpc": "2.0", "id": 2, "method": "tools/list"}"#,
        ]);

        server.run(&mut transport).await.unwrap();

        // Malformed lines produce no output at all
        assert_eq!(transport.sent.len(), 2);
        assert_eq!(transport.sent[0]["id"], json!(1));
        assert_eq!(transport.sent[1]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_loop_terminates_on_end_of_stream() {
        let server = StubServer::new();
        let mut transport = MockTransport::new(&[]);

        server.run(&mut transport).await.unwrap();

        assert!(transport.sent.is_empty());
        assert!(!transport.is_connected());
    }

    #[tokio::test]
    async fn test_notification_emits_nothing_on_the_wire() {
        let server = StubServer::new();
        let mut transport = MockTransport::new(&[
            r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#,
        ]);

        server.run(&mut transport).await.unwrap();

        assert!(transport.sent.is_empty());
    }
}
