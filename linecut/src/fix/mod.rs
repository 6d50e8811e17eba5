//! Line-based rewriting shared by every removal path.
//!
//! Range removal and block removal both reduce to "delete these whole
//! lines from the original text". `LineRewriter` performs that in a single
//! pass against the original numbering, so earlier deletions never shift
//! the targets of later ones.

mod rewriter;

pub use rewriter::{LineRewriter, RemovedLine, RewriteError, Rewritten};
