//! `linecut-bin`: the library's own binary.
//!
//! Delegates to the shared `entry_point::run_with_args()` so it behaves
//! exactly like the `linecut` binary (minus `mcp-server`).

use anyhow::Result;

fn main() -> Result<()> {
    let code = linecut::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
