//! MCP Stub Server - a fixed-behavior MCP server over STDIO
//!
//! This crate implements a stand-in MCP server used to verify that an
//! orchestrating process can launch, initialize, enumerate, and invoke
//! tools against a conforming third-party server. It exposes exactly two
//! test tools and answers four methods; everything else is a JSON-RPC
//! method-not-found error.

pub mod error;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{Result, ServerError};
pub use server::StubServer;
pub use transport::{StdioTransport, Transport};
