//! Line-anchored insertion.
//!
//! The injector copies lines in order and, right after each line containing
//! an anchor substring, emits the anchor rule's insertion line. Inserted
//! lines are never re-scanned for anchors.

use crate::error::TransformError;
use crate::source::line_terminator;

/// Controls how often an anchor rule fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertionPolicy {
    /// Insert after every line containing the anchor.
    #[default]
    EveryMatch,
    /// Insert only after the first line containing the anchor.
    FirstMatchOnly,
}

/// An `(anchor, insertion)` pair with its firing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRule {
    anchor: String,
    insertion: String,
    policy: InsertionPolicy,
}

impl AnchorRule {
    /// Creates a rule that inserts `insertion` after every line containing
    /// `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRule`] when the anchor is empty, since
    /// an empty substring would match every line.
    pub fn new(
        anchor: impl Into<String>,
        insertion: impl Into<String>,
    ) -> Result<Self, TransformError> {
        let anchor_text = anchor.into();
        if anchor_text.is_empty() {
            return Err(TransformError::invalid_rule("anchor must not be empty"));
        }
        Ok(Self {
            anchor: anchor_text,
            insertion: insertion.into(),
            policy: InsertionPolicy::EveryMatch,
        })
    }

    /// Returns the rule with the given insertion policy.
    #[must_use]
    pub fn with_policy(mut self, policy: InsertionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the anchor substring.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Returns the insertion text as configured.
    #[must_use]
    pub fn insertion(&self) -> &str {
        &self.insertion
    }

    /// Returns the insertion policy.
    #[must_use]
    pub const fn policy(&self) -> InsertionPolicy {
        self.policy
    }

    /// Renders the insertion as a terminated line.
    fn line(&self, terminator: &str) -> String {
        if self.insertion.ends_with('\n') {
            self.insertion.clone()
        } else {
            format!("{}{terminator}", self.insertion)
        }
    }
}

/// Lines produced by [`inject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    lines: Vec<String>,
    inserted: usize,
}

impl Injection {
    /// Returns the resulting lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the injection, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Returns the number of inserted lines.
    #[must_use]
    pub const fn inserted(&self) -> usize {
        self.inserted
    }
}

/// Copies `lines`, emitting each matching rule's insertion after the line
/// that triggered it.
///
/// Rules are evaluated per line in declaration order. A matched line without
/// a terminator (the last line of a file) gains a `\n` so the insertion lands
/// on a line of its own; otherwise the insertion reuses the matched line's
/// terminator.
#[must_use]
pub fn inject(lines: &[String], rules: &[AnchorRule]) -> Injection {
    let mut output = Vec::with_capacity(lines.len());
    let mut fired = vec![false; rules.len()];
    let mut inserted = 0usize;

    for line in lines {
        let due: Vec<&AnchorRule> = rules
            .iter()
            .zip(fired.iter_mut())
            .filter_map(|(rule, has_fired)| {
                if !line.contains(rule.anchor.as_str()) {
                    return None;
                }
                if rule.policy == InsertionPolicy::FirstMatchOnly && *has_fired {
                    return None;
                }
                *has_fired = true;
                Some(rule)
            })
            .collect();

        if due.is_empty() {
            output.push(line.clone());
            continue;
        }

        let terminator = match line_terminator(line) {
            Some(terminator) => {
                output.push(line.clone());
                terminator
            }
            None => {
                output.push(format!("{line}\n"));
                "\n"
            }
        };

        for rule in due {
            output.push(rule.line(terminator));
            inserted = inserted.saturating_add(1);
        }
    }

    Injection {
        lines: output,
        inserted,
    }
}
