use clap::Parser;
use mcp_stub_server::{StdioTransport, StubServer};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "mcp-stub-server",
    about = "Stub MCP server for orchestrator integration testing",
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Internal traces stay below the fixture diagnostic lines unless
    // explicitly requested; stdout is reserved for the protocol
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::ERROR
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    debug!("Starting stub MCP server");

    let server = StubServer::new();
    let mut transport = StdioTransport::new();
    server.run(&mut transport).await?;

    debug!("Stub MCP server stopped");
    Ok(())
}
