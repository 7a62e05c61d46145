//! Textual source transformation engine for the fieldfix tool.
//!
//! The engine rewrites a single source file in three strictly sequential
//! stages:
//!
//! - **Loading** via [`SourceFile`], which keeps line terminators intact
//! - **Anchor injection** via [`inject`], which emits an insertion line after
//!   each line containing an anchor substring
//! - **Pattern rewriting** via [`Rewriter`], which applies an ordered list of
//!   [`RewriteRule`]s across the whole text
//!
//! [`Transformer`] wraps the stages in a read-modify-write cycle whose final
//! step replaces the target atomically.
//!
//! Matching is textual, not syntactic: the engine has no notion of the target
//! language's comments or string literals.
//!
//! # Example
//!
//! ```
//! use fieldfix_engine::{AnchorRule, RewriteRule, RuleSet, SourceFile, Transformer};
//!
//! let rules = RuleSet::new(
//!     vec![AnchorRule::new("\"pkg/cmd\"", "\t\"pkg/storage\"")?],
//!     vec![RewriteRule::literal("fields[8]", "fields[storage.FieldLevel]")?],
//! );
//! let source = SourceFile::from_text(
//!     "status.go",
//!     "import (\n\t\"pkg/cmd\"\n)\n\nlevel := fields[8]\n",
//! );
//!
//! let result = Transformer::new(rules).transform(&source)?;
//! assert_eq!(result.inserted_lines(), 1);
//! assert!(result.text().contains("fields[storage.FieldLevel]"));
//! # Ok::<(), fieldfix_engine::TransformError>(())
//! ```

mod error;
mod injector;
mod pipeline;
mod rewriter;
mod source;
mod writer;

pub use error::{IoOperation, TransformError};
pub use injector::{AnchorRule, Injection, InsertionPolicy, inject};
pub use pipeline::{RuleSet, TransformOptions, TransformReport, TransformResult, Transformer};
pub use rewriter::{PatternKind, RewriteResult, RewriteRule, Rewriter, RuleOutcome};
pub use source::{SourceFile, split_lines};
pub use writer::atomic_write;

#[cfg(test)]
mod tests;
