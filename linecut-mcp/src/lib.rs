//! linecut MCP server
//!
//! Exposes linecut's editing operations as MCP tools over stdio.

pub mod tools;

use anyhow::Result;
use rmcp::ServiceExt;
use std::path::PathBuf;
use tokio::io::{stdin, stdout};
use tools::LinecutServer;

/// Serve the linecut tools on stdin/stdout until the client disconnects.
///
/// With `root`, every tool refuses paths outside that directory.
///
/// # Errors
///
/// Returns an error if the transport fails to start or breaks.
pub async fn serve_stdio(root: Option<PathBuf>) -> Result<()> {
    let server = root.map_or_else(LinecutServer::new, LinecutServer::with_root);
    let service = server.serve((stdin(), stdout())).await?;
    service.waiting().await?;
    Ok(())
}
