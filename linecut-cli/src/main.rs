//! Command-line interface entry point for linecut.
//!
//! `mcp-server` starts the MCP tool server on stdio; everything else goes
//! through the shared entry point.

use anyhow::Result;
use linecut::entry_point;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Some(server) = entry_point::mcp_server_request(&args) {
        if server.verbose {
            match &server.root {
                Some(root) => eprintln!("[VERBOSE] MCP server confined to {}", root.display()),
                None => eprintln!("[VERBOSE] MCP server started without a root"),
            }
        }
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(linecut_mcp::serve_stdio(server.root))?;
        return Ok(());
    }

    let code = entry_point::run_with_args(args)?;
    std::process::exit(code);
}
