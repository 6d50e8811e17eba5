use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ranges::LineRange;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
LINE NUMBERS:
  Ranges are 1-indexed and inclusive, written `N`, `N-M` or `N:M`.
  Every range refers to the file as it was before the command ran.

CONFIGURATION FILE (.linecut.toml):
  Searched from the target file's directory upward.

  [linecut]
  lenient = false            # Clamp/drop bad ranges instead of failing
  include_attributes = true  # Blocks include #[...] and /// lines above them
  ensure_newline = false     # Append starts on a fresh line
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output for debugging (config lookup, locator used).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Range validation flags shared by `remove` and `blocks`.
#[derive(Args, Debug, Default, Clone)]
pub struct PolicyArgs {
    /// Clamp ranges to the file and skip inverted ones instead of failing.
    #[arg(long, conflicts_with = "strict")]
    pub lenient: bool,

    /// Reject ranges that do not fit the file (overrides config).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `linecut remove`.
#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// File to edit in place.
    pub path: PathBuf,

    /// Line range to remove (`N`, `N-M` or `N:M`). Repeatable.
    #[arg(short, long = "range", value_name = "RANGE", required = true)]
    pub ranges: Vec<LineRange>,

    /// Range validation policy.
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Show the lines that would be removed without touching the file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `linecut append`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "from_file"])))]
pub struct AppendArgs {
    /// File to append to (created if missing).
    pub path: PathBuf,

    /// Literal text to append. Escapes are not interpreted.
    #[arg(long)]
    pub text: Option<String>,

    /// Append the contents of this file.
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Insert a newline first if the file does not end with one.
    #[arg(long)]
    pub ensure_newline: bool,
}

/// Arguments shared by `linecut locate` and `linecut blocks`.
#[derive(Args, Debug, Clone)]
pub struct BlockArgs {
    /// Source file to search.
    pub path: PathBuf,

    /// Function name to look for. Repeatable.
    #[arg(short, long = "name", value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Do not extend blocks over leading attributes and doc comments.
    #[arg(long)]
    pub no_attributes: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linecut - remove line ranges and function blocks from source files in one pass",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Refuse to edit files outside this directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Remove line ranges from a file in a single pass
    Remove(RemoveArgs),
    /// Append text to the end of a file
    Append(AppendArgs),
    /// List the line ranges of named functions
    Locate(BlockArgs),
    /// Remove named functions from a file
    Blocks {
        /// Which functions to remove.
        #[command(flatten)]
        target: BlockArgs,

        /// Range validation policy (lenient: unknown names are skipped).
        #[command(flatten)]
        policy: PolicyArgs,

        /// Show the lines that would be removed without touching the file.
        #[arg(long)]
        dry_run: bool,
    },
    /// List function names defined more than once in a file
    Duplicates {
        /// Source file to check.
        path: PathBuf,

        /// Exit with code 1 if any name is defined more than once.
        #[arg(long)]
        fail_on_duplicates: bool,
    },
    /// Start MCP server for LLM integration
    #[command(name = "mcp-server")]
    McpServer,
}
