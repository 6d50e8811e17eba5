//! linecut MCP Server
//!
//! Standalone binary for MCP clients (Claude Desktop, Cursor, ...) that
//! talk to servers over stdio.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    linecut_mcp::serve_stdio(None).await
}
