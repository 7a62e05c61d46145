//! Ordered whole-text pattern rewriting.
//!
//! Each rule replaces every non-overlapping match across the entire text and
//! hands its output to the next rule. Matching is purely textual: occurrences
//! inside comments or string literals are rewritten like any other.

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::TransformError;

/// How a rule's pattern and replacement are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternKind {
    /// The pattern is a regular expression; the replacement may reference
    /// captures as `$1` or `${name}`.
    #[default]
    Regex,
    /// The pattern is matched verbatim and the replacement is inserted
    /// verbatim, `$` included.
    Literal,
}

/// A compiled `(pattern, replacement)` rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: String,
    replacement: String,
    kind: PatternKind,
    matcher: Regex,
}

impl RewriteRule {
    /// Compiles a rewrite rule.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRule`] for an empty pattern and
    /// [`TransformError::Pattern`] when a regular expression fails to compile.
    pub fn new(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        kind: PatternKind,
    ) -> Result<Self, TransformError> {
        let pattern_text = pattern.into();
        if pattern_text.is_empty() {
            return Err(TransformError::invalid_rule("pattern must not be empty"));
        }

        let source = match kind {
            PatternKind::Regex => pattern_text.clone(),
            PatternKind::Literal => regex::escape(&pattern_text),
        };
        let matcher =
            Regex::new(&source).map_err(|err| TransformError::pattern(pattern_text.clone(), err))?;

        Ok(Self {
            pattern: pattern_text,
            replacement: replacement.into(),
            kind,
            matcher,
        })
    }

    /// Compiles a regular-expression rule.
    ///
    /// # Errors
    ///
    /// See [`RewriteRule::new`].
    pub fn regex(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, TransformError> {
        Self::new(pattern, replacement, PatternKind::Regex)
    }

    /// Creates a literal rule.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRule`] for an empty pattern.
    pub fn literal(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, TransformError> {
        Self::new(pattern, replacement, PatternKind::Literal)
    }

    /// Returns the pattern as configured.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the replacement template.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns how the pattern is interpreted.
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Replaces every match in `source`, returning the new text and the
    /// number of replacements.
    #[must_use]
    pub fn apply(&self, source: &str) -> (String, usize) {
        let mut count = 0usize;
        let output = self.matcher.replace_all(source, |caps: &Captures<'_>| {
            count = count.saturating_add(1);
            let mut expanded = String::new();
            match self.kind {
                PatternKind::Regex => caps.expand(&self.replacement, &mut expanded),
                PatternKind::Literal => expanded.push_str(&self.replacement),
            }
            expanded
        });
        (output.into_owned(), count)
    }
}

/// Per-rule audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pattern: String,
    replacements: usize,
}

impl RuleOutcome {
    /// Returns the rule's pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns how many matches the rule replaced.
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }

    /// Returns whether the rule matched nothing.
    #[must_use]
    pub const fn is_unmatched(&self) -> bool {
        self.replacements == 0
    }
}

/// Engine applying an ordered list of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
}

impl Rewriter {
    /// Creates a rewriter over the given rules, applied in order.
    #[must_use]
    pub const fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Applies every rule in sequence.
    ///
    /// Each rule is applied to the result of the previous rule.
    #[must_use]
    pub fn apply(&self, source: &str) -> RewriteResult {
        let mut current = source.to_owned();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (output, replacements) = rule.apply(&current);
            debug!(pattern = rule.pattern(), replacements, "applied rewrite rule");
            outcomes.push(RuleOutcome {
                pattern: rule.pattern.clone(),
                replacements,
            });
            current = output;
        }

        RewriteResult {
            output: current,
            outcomes,
        }
    }
}

/// Result of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    output: String,
    outcomes: Vec<RuleOutcome>,
}

impl RewriteResult {
    /// Returns the transformed text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the result, returning the transformed text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns one outcome per rule, in application order.
    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Returns the total number of replacements made.
    #[must_use]
    pub fn num_replacements(&self) -> usize {
        self.outcomes
            .iter()
            .fold(0usize, |total, outcome| total.saturating_add(outcome.replacements))
    }

    /// Returns whether any replacements were made.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.num_replacements() > 0
    }
}
