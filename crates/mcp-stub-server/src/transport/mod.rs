use crate::error::Result;
use async_trait::async_trait;
use mcp_stub_types::JsonRpcMessage;

pub mod stdio;

pub use stdio::StdioTransport;

/// Line-oriented message transport. The server owns JSON decoding; the
/// transport only moves raw lines in and serialized messages out.
#[async_trait]
pub trait Transport: Send {
    /// Serialize and send one message as a single newline-terminated line,
    /// flushed immediately.
    async fn send(&mut self, message: JsonRpcMessage) -> Result<()>;

    /// Receive the next non-empty input line. `Ok(None)` signals a clean
    /// end-of-stream.
    async fn receive(&mut self) -> Result<Option<String>>;

    async fn close(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;
}
