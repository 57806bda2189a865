use crate::error::{Result, ServerError};
use crate::transport::Transport;
use async_trait::async_trait;
use mcp_stub_types::JsonRpcMessage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

pub struct StdioTransport {
    stdin_receiver: mpsc::UnboundedReceiver<String>,
    stdout: tokio::io::Stdout,
    connected: bool,
}

impl StdioTransport {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn a task to read from stdin; dropping the sender on EOF is
        // what signals end-of-stream to receive()
        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }

                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            stdin_receiver: rx,
            stdout: tokio::io::stdout(),
            connected: true,
        }
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&mut self, message: JsonRpcMessage) -> Result<()> {
        if !self.connected {
            return Err(ServerError::ConnectionClosed);
        }

        let json_str = serde_json::to_string(&message)?;

        // One complete line per message, flushed so the peer never waits
        self.stdout.write_all(json_str.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;

        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<String>> {
        if !self.connected {
            return Err(ServerError::ConnectionClosed);
        }

        Ok(self.stdin_receiver.recv().await)
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}
