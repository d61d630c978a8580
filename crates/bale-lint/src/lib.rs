//! Semantic analysis of bale specifications.
//!
//! The analyzer runs a fixed battery of checks against one platform-resolved
//! view of a specification and accumulates typed, user-facing diagnostics in
//! a caller-owned sink:
//!
//! - unknown attribute keys (likely misspellings)
//! - absolute file patterns
//! - missing `requires_arc` declarations
//! - fully empty leaf specs
//! - deprecated install hooks
//!
//! The linter fans the analyzer out over every (spec node, platform) pair of
//! a document. Problems with the *document itself* (malformed shapes) are
//! rejected earlier, at load; by the time analysis runs, every check is a
//! pure read.

pub mod analyzer;
pub mod linter;
pub mod result;

// Re-exports for convenience.
pub use analyzer::Analyzer;
pub use linter::Linter;
pub use result::{Diagnostic, Results, Severity};
