//! MCP Tool implementations for linecut.
//!
//! Each tool wraps one library operation and answers with the operation's
//! JSON report, or a tool-level error result carrying the message.

use linecut::append::{append_text_with, AppendOptions};
use linecut::blocks::{
    find_duplicates_in_file, locate_blocks_in_file, remove_blocks, BlockOptions,
    BlockRemoveOptions,
};
use linecut::ranges::{LineRange, RangePolicy};
use linecut::remover::{remove_ranges_with, RemoveOptions};
use linecut::utils::{validate_path_within_root, validate_target_path};
use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Request parameters for `remove_ranges` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct RemoveRangesRequest {
    /// File to edit.
    #[schemars(description = "Path of the file to edit in place")]
    pub path: String,
    /// Ranges such as "3-5", "9" or "10:12".
    #[schemars(
        description = "1-indexed inclusive line ranges like \"3-5\" or \"9\", all numbered against the file before editing"
    )]
    pub ranges: Vec<String>,
    /// Clamp/drop bad ranges instead of failing.
    #[schemars(description = "Clamp ranges past the end and skip inverted ones instead of failing")]
    #[serde(default)]
    pub lenient: bool,
    /// Preview only.
    #[schemars(description = "Return the lines that would be removed without editing the file")]
    #[serde(default)]
    pub dry_run: bool,
}

/// Request parameters for `append_text` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct AppendTextRequest {
    /// File to append to.
    #[schemars(description = "Path of the file to append to (created if missing)")]
    pub path: String,
    /// Text to append verbatim.
    #[schemars(description = "Text to append verbatim")]
    pub text: String,
    /// Start on a fresh line.
    #[schemars(description = "Insert a newline first if the file does not end with one")]
    #[serde(default)]
    pub ensure_newline: bool,
}

/// Request parameters for the block tools.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct BlocksRequest {
    /// Source file.
    #[schemars(description = "Path of the source file")]
    pub path: String,
    /// Function names.
    #[schemars(description = "Names of the functions to find")]
    pub names: Vec<String>,
    /// Include leading attributes and doc comments (default: true).
    #[schemars(description = "Extend each block over #[...] attributes and /// docs above it")]
    #[serde(default = "default_true")]
    pub include_attributes: bool,
    /// Skip unknown names instead of failing (`remove_blocks` only).
    #[schemars(description = "Skip names that match no function instead of failing")]
    #[serde(default)]
    pub lenient: bool,
    /// Preview only (`remove_blocks` only).
    #[schemars(description = "Return the lines that would be removed without editing the file")]
    #[serde(default)]
    pub dry_run: bool,
}

/// Request parameters for `find_duplicates` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct DuplicatesRequest {
    /// Source file.
    #[schemars(description = "Path of the source file to check")]
    pub path: String,
}

fn default_true() -> bool {
    true
}

fn policy(lenient: bool) -> RangePolicy {
    if lenient {
        RangePolicy::Lenient
    } else {
        RangePolicy::Strict
    }
}

fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Serialization error: {e}"}}"#));
    CallToolResult::success(vec![Content::text(json)])
}

fn error_result(message: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// The main MCP server struct for linecut.
#[derive(Debug, Clone)]
pub struct LinecutServer {
    root: Option<PathBuf>,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl LinecutServer {
    /// Creates a server that may edit any path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: None,
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a server confined to files under `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::new()
        }
    }

    fn check(&self, path: &Path, may_be_missing: bool) -> Result<(), String> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let checked = if may_be_missing {
            validate_target_path(path, root)
        } else {
            validate_path_within_root(path, root)
        };
        checked.map(|_| ()).map_err(|e| e.to_string())
    }
}

impl Default for LinecutServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
#[allow(clippy::unused_self, clippy::unnecessary_wraps)]
impl LinecutServer {
    /// Remove line ranges from a file in a single pass.
    ///
    /// # Errors
    ///
    /// Never fails at the protocol level; edit failures become error results.
    #[tool(
        description = "Remove 1-indexed inclusive line ranges from a file in a single pass.\n\
        All ranges refer to the file as it is before this call, so several distant ranges can be\n\
        removed at once without recomputing line numbers. Overlapping ranges are merged.\n\
        Returns JSON with removed/kept line counts and the applied ranges."
    )]
    pub fn remove_ranges(
        &self,
        params: Parameters<RemoveRangesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let path = PathBuf::from(&req.path);
        if let Err(e) = self.check(&path, false) {
            return Ok(error_result(e));
        }

        let ranges: Result<Vec<LineRange>, _> =
            req.ranges.iter().map(|r| r.parse::<LineRange>()).collect();
        let ranges = match ranges {
            Ok(ranges) => ranges,
            Err(e) => return Ok(error_result(e)),
        };

        let options = RemoveOptions {
            policy: policy(req.lenient),
            dry_run: req.dry_run,
        };
        Ok(match remove_ranges_with(&path, &ranges, &options) {
            Ok(report) => json_result(&report),
            Err(e) => error_result(e),
        })
    }

    /// Append text to the end of a file.
    ///
    /// # Errors
    ///
    /// Never fails at the protocol level; edit failures become error results.
    #[tool(description = "Append text verbatim to the end of a file, creating it if needed.")]
    pub fn append_text(
        &self,
        params: Parameters<AppendTextRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let path = PathBuf::from(&req.path);
        if let Err(e) = self.check(&path, true) {
            return Ok(error_result(e));
        }

        let options = AppendOptions {
            ensure_newline: req.ensure_newline,
        };
        Ok(match append_text_with(&path, &req.text, &options) {
            Ok(report) => json_result(&report),
            Err(e) => error_result(e),
        })
    }

    /// Find the line ranges of named functions.
    ///
    /// # Errors
    ///
    /// Never fails at the protocol level; lookup failures become error results.
    #[tool(
        description = "Find the line ranges of named functions (including their attributes and doc\n\
        comments) without editing anything. Unknown names are listed under `missing`."
    )]
    pub fn locate_blocks(
        &self,
        params: Parameters<BlocksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let path = PathBuf::from(&req.path);
        if let Err(e) = self.check(&path, false) {
            return Ok(error_result(e));
        }

        let options = BlockOptions {
            include_attributes: req.include_attributes,
            policy: RangePolicy::Lenient,
        };
        Ok(match locate_blocks_in_file(&path, &req.names, &options) {
            Ok(scan) => json_result(&scan),
            Err(e) => error_result(e),
        })
    }

    /// Remove named functions from a file in a single pass.
    ///
    /// # Errors
    ///
    /// Never fails at the protocol level; edit failures become error results.
    #[tool(
        description = "Remove whole functions by name in a single pass. Each function's range is\n\
        computed from the current file, so no line numbers are needed. Fails without editing if a\n\
        name is not found, unless lenient is set."
    )]
    pub fn remove_blocks(
        &self,
        params: Parameters<BlocksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let path = PathBuf::from(&req.path);
        if let Err(e) = self.check(&path, false) {
            return Ok(error_result(e));
        }

        let options = BlockRemoveOptions {
            block: BlockOptions {
                include_attributes: req.include_attributes,
                policy: policy(req.lenient),
            },
            dry_run: req.dry_run,
        };
        Ok(match remove_blocks(&path, &req.names, &options) {
            Ok(report) => json_result(&report),
            Err(e) => error_result(e),
        })
    }

    /// List function names defined more than once.
    ///
    /// # Errors
    ///
    /// Never fails at the protocol level; read failures become error results.
    #[tool(
        description = "List function names defined more than once in a file, with the line of\n\
        every definition. Run after appending generated stubs to spot bodies that now clash."
    )]
    pub fn find_duplicates(
        &self,
        params: Parameters<DuplicatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let path = PathBuf::from(&params.0.path);
        if let Err(e) = self.check(&path, false) {
            return Ok(error_result(e));
        }

        Ok(match find_duplicates_in_file(&path) {
            Ok(scan) => json_result(&scan),
            Err(e) => error_result(e),
        })
    }
}

#[rmcp::tool_handler]
impl ServerHandler for LinecutServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "linecut edits source files by line range or by function name.\n\n\
                 TOOLS AVAILABLE:\n\
                 • remove_ranges - Delete line ranges in one pass (numbers refer to the unedited file)\n\
                 • append_text - Append text to a file\n\
                 • locate_blocks - Show which lines a function occupies\n\
                 • remove_blocks - Delete functions by name\n\
                 • find_duplicates - List function names defined more than once\n\n\
                 Prefer remove_blocks over remove_ranges when deleting whole functions: it never\n\
                 goes stale after earlier edits shift the line numbers."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub use rmcp::model::Content;
