//! The load, inject, rewrite, write cycle.
//!
//! The stages run strictly in sequence with all intermediate state held in
//! memory. Any failure aborts the run before the target is replaced.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::TransformError;
use crate::injector::{AnchorRule, inject};
use crate::rewriter::{RewriteRule, Rewriter, RuleOutcome};
use crate::source::SourceFile;
use crate::writer::atomic_write;

/// Ordered anchor and rewrite rules for a single invocation.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    anchors: Vec<AnchorRule>,
    rewrites: Vec<RewriteRule>,
}

impl RuleSet {
    /// Creates a rule set. Both lists are applied in the given order.
    #[must_use]
    pub const fn new(anchors: Vec<AnchorRule>, rewrites: Vec<RewriteRule>) -> Self {
        Self { anchors, rewrites }
    }

    /// Returns the anchor rules.
    #[must_use]
    pub fn anchors(&self) -> &[AnchorRule] {
        &self.anchors
    }

    /// Returns the rewrite rules.
    #[must_use]
    pub fn rewrites(&self) -> &[RewriteRule] {
        &self.rewrites
    }

    /// Returns whether the set holds no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.rewrites.is_empty()
    }
}

/// Run-time switches for a [`Transformer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    dry_run: bool,
    require_matches: bool,
}

impl TransformOptions {
    /// Skips the write step when set.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fails the run when any rewrite rule matches nothing.
    #[must_use]
    pub const fn with_require_matches(mut self, require_matches: bool) -> Self {
        self.require_matches = require_matches;
        self
    }

    /// Returns whether the write step is skipped.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether unmatched rewrite rules are fatal.
    #[must_use]
    pub const fn require_matches(&self) -> bool {
        self.require_matches
    }
}

/// Text produced by injecting and rewriting a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    text: String,
    inserted_lines: usize,
    outcomes: Vec<RuleOutcome>,
    changed: bool,
}

impl TransformResult {
    /// Returns the final text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns how many lines the anchor rules inserted.
    #[must_use]
    pub const fn inserted_lines(&self) -> usize {
        self.inserted_lines
    }

    /// Returns one outcome per rewrite rule, in application order.
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Returns the total number of replacements.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.outcomes
            .iter()
            .fold(0usize, |total, outcome| total.saturating_add(outcome.replacements()))
    }

    /// Returns whether the final text differs from the input.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }
}

/// Summary of a completed run against a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    path: PathBuf,
    result: TransformResult,
    written: bool,
}

impl TransformReport {
    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the transformation result.
    #[must_use]
    pub const fn result(&self) -> &TransformResult {
        &self.result
    }

    /// Returns whether the target was replaced on disk.
    #[must_use]
    pub const fn written(&self) -> bool {
        self.written
    }
}

/// Drives a [`RuleSet`] over a single file.
#[derive(Debug, Clone)]
pub struct Transformer {
    rules: RuleSet,
    options: TransformOptions,
}

impl Transformer {
    /// Creates a transformer with default options.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            options: TransformOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub const fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> TransformOptions {
        self.options
    }

    /// Injects and rewrites `source` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnmatchedRule`] when matches are required and
    /// a rewrite rule matched nothing.
    pub fn transform(&self, source: &SourceFile) -> Result<TransformResult, TransformError> {
        let injection = inject(source.lines(), self.rules.anchors());
        let inserted_lines = injection.inserted();
        let joined = injection.into_lines().concat();

        let rewritten = Rewriter::new(self.rules.rewrites().to_vec()).apply(&joined);
        for outcome in rewritten.outcomes().iter().filter(|o| o.is_unmatched()) {
            warn!(pattern = outcome.pattern(), "rewrite rule matched nothing");
        }
        if self.options.require_matches {
            if let Some(unmatched) = rewritten.outcomes().iter().find(|o| o.is_unmatched()) {
                return Err(TransformError::unmatched_rule(unmatched.pattern()));
            }
        }

        let outcomes = rewritten.outcomes().to_vec();
        let text = rewritten.into_output();
        let changed = text != source.text();
        Ok(TransformResult {
            text,
            inserted_lines,
            outcomes,
            changed,
        })
    }

    /// Loads `path`, transforms it, and writes the result back atomically.
    ///
    /// The write is skipped for dry runs and when the text is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotFound`] or [`TransformError::Io`] when
    /// loading fails, [`TransformError::UnmatchedRule`] in strict mode, and
    /// [`TransformError::Io`] when the write fails. The target is untouched
    /// in every error case.
    pub fn run(&self, path: &Path) -> Result<TransformReport, TransformError> {
        let source = SourceFile::load(path)?;
        let result = self.transform(&source)?;

        let written = !self.options.dry_run && result.changed;
        if written {
            atomic_write(path, &result.text)?;
        }

        info!(
            path = %path.display(),
            inserted_lines = result.inserted_lines,
            replacements = result.replacements(),
            written,
            dry_run = self.options.dry_run,
            "transformation complete"
        );

        Ok(TransformReport {
            path: path.to_path_buf(),
            result,
            written,
        })
    }
}
