use crate::cli::{BlockArgs, Cli, Commands, PolicyArgs};
use crate::commands::{
    run_append, run_blocks, run_duplicates, run_locate, run_remove, AppendCommandOptions,
    AppendSource, BlockCommandOptions, DuplicatesCommandOptions, RemoveCommandOptions,
};
use crate::config::Config;
use crate::ranges::RangePolicy;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Run linecut with the given arguments, writing output to stdout.
///
/// # Errors
///
/// Returns an error only if writing help/version output fails; command
/// failures are reported on stderr and mapped to exit code 1.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run linecut with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing help/version output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["linecut".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    match dispatch(cli_var, writer) {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            Ok(1)
        }
    }
}

/// Settings for `linecut mcp-server`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServerRequest {
    /// Directory the server must keep edits inside.
    pub root: Option<PathBuf>,
    /// Print diagnostics to stderr.
    pub verbose: bool,
}

/// Returns the server settings when `args` ask for `mcp-server`.
///
/// Global flags may appear before or after the subcommand.
#[must_use]
pub fn mcp_server_request(args: &[String]) -> Option<McpServerRequest> {
    let program_args = std::iter::once("linecut").chain(args.iter().map(String::as_str));
    let cli_var = Cli::try_parse_from(program_args).ok()?;
    matches!(cli_var.command, Commands::McpServer).then_some(McpServerRequest {
        root: cli_var.root,
        verbose: cli_var.output.verbose,
    })
}

fn dispatch<W: std::io::Write>(cli_var: Cli, writer: &mut W) -> Result<i32> {
    let verbose = cli_var.output.verbose;
    let json = cli_var.output.json;
    let root = cli_var.root;

    if verbose {
        eprintln!("[VERBOSE] linecut v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Executing subcommand: {:?}", cli_var.command);
    }

    match cli_var.command {
        Commands::Remove(args) => {
            let config = load_config(&args.path, verbose);
            let options = RemoveCommandOptions {
                policy: resolve_policy(&args.policy, &config),
                path: args.path,
                ranges: args.ranges,
                dry_run: args.dry_run,
                json,
                verbose,
                root,
            };
            run_remove(&options, writer)?;
        }
        Commands::Append(args) => {
            let config = load_config(&args.path, verbose);
            let source = match (args.text, args.from_file) {
                (_, Some(file)) => AppendSource::File(file),
                (text, None) => AppendSource::Text(text.unwrap_or_default()),
            };
            let options = AppendCommandOptions {
                ensure_newline: args.ensure_newline
                    || config.linecut.ensure_newline.unwrap_or(false),
                path: args.path,
                source,
                json,
                verbose,
                root,
            };
            run_append(&options, writer)?;
        }
        Commands::Locate(target) => {
            let config = load_config(&target.path, verbose);
            let options = BlockCommandOptions {
                json,
                verbose,
                root,
                ..block_options(target, &config)
            };
            run_locate(&options, writer)?;
        }
        Commands::Blocks {
            target,
            policy,
            dry_run,
        } => {
            let config = load_config(&target.path, verbose);
            let options = BlockCommandOptions {
                policy: resolve_policy(&policy, &config),
                dry_run,
                json,
                verbose,
                root,
                ..block_options(target, &config)
            };
            run_blocks(&options, writer)?;
        }
        Commands::Duplicates {
            path,
            fail_on_duplicates,
        } => {
            let options = DuplicatesCommandOptions {
                path,
                json,
                verbose,
                root,
            };
            let scan = run_duplicates(&options, writer)?;
            if fail_on_duplicates && !scan.duplicates.is_empty() {
                eprintln!(
                    "{} {} function name(s) defined more than once",
                    "Error:".red().bold(),
                    scan.duplicates.len()
                );
                return Ok(1);
            }
        }
        Commands::McpServer => {
            // served by the `linecut` binary, which intercepts this before parsing
            eprintln!(
                "{} mcp-server is only available from the `linecut` binary.",
                "Error:".red().bold()
            );
            return Ok(1);
        }
    }

    Ok(0)
}

fn load_config(path: &Path, verbose: bool) -> Config {
    let config = Config::load_from_path(path);
    if verbose {
        match (&config.config_file_path, &config.warning) {
            (Some(file), _) => eprintln!("[VERBOSE] Using config {}", file.display()),
            (None, Some(warning)) => eprintln!("[VERBOSE] Warning: {warning}"),
            (None, None) => eprintln!("[VERBOSE] No config file found, using defaults"),
        }
    }
    config
}

/// Flags win over config; config wins over the strict default.
fn resolve_policy(flags: &PolicyArgs, config: &Config) -> RangePolicy {
    if flags.lenient {
        RangePolicy::Lenient
    } else if flags.strict {
        RangePolicy::Strict
    } else {
        config.linecut.policy()
    }
}

fn block_options(target: BlockArgs, config: &Config) -> BlockCommandOptions {
    BlockCommandOptions {
        include_attributes: !target.no_attributes
            && config.linecut.include_attributes.unwrap_or(true),
        path: target.path,
        names: target.names,
        ..BlockCommandOptions::default()
    }
}
