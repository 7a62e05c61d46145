//! The YAML rule-set document and its conversion into engine rules.
//!
//! A rule file lists anchor rules and rewrite rules in application order:
//!
//! ```yaml
//! require_matches: true
//! anchors:
//!   - anchor: '"example.com/app/cmd"'
//!     insert: "\t\"example.com/app/internal/storage\""
//!     policy: first_match_only
//! rewrites:
//!   - pattern: 'fields\[8\]'
//!     replace: 'fields[storage.FieldLevel]'
//!   - pattern: 'fields[3]'
//!     replace: 'fields[storage.FieldSession]'
//!     kind: literal
//! ```

use std::fs;

use camino::Utf8Path;
use fieldfix_engine::{AnchorRule, InsertionPolicy, PatternKind, RewriteRule, RuleSet};
use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;

/// Serialized form of [`InsertionPolicy`].
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicySetting {
    /// Insert after every matching line.
    #[default]
    EveryMatch,
    /// Insert after the first matching line only.
    FirstMatchOnly,
}

impl From<PolicySetting> for InsertionPolicy {
    fn from(value: PolicySetting) -> Self {
        match value {
            PolicySetting::EveryMatch => Self::EveryMatch,
            PolicySetting::FirstMatchOnly => Self::FirstMatchOnly,
        }
    }
}

/// Serialized form of [`PatternKind`].
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KindSetting {
    /// Regular expression with `$1`-style capture references.
    #[default]
    Regex,
    /// Verbatim text.
    Literal,
}

impl From<KindSetting> for PatternKind {
    fn from(value: KindSetting) -> Self {
        match value {
            KindSetting::Regex => Self::Regex,
            KindSetting::Literal => Self::Literal,
        }
    }
}

/// One anchor rule entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AnchorEntry {
    /// Substring that triggers the insertion.
    pub anchor: String,
    /// Line inserted after each triggering line.
    pub insert: String,
    /// How often the rule fires.
    #[serde(default)]
    pub policy: PolicySetting,
}

/// One rewrite rule entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RewriteEntry {
    /// Text or regular expression to match.
    pub pattern: String,
    /// Replacement text.
    pub replace: String,
    /// How `pattern` and `replace` are interpreted.
    #[serde(default)]
    pub kind: KindSetting,
}

impl RewriteEntry {
    fn regex(pattern: &str, replace: &str) -> Self {
        Self {
            pattern: pattern.to_owned(),
            replace: replace.to_owned(),
            kind: KindSetting::Regex,
        }
    }
}

/// A rule-set document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
    /// Fails the run when a rewrite rule matches nothing.
    #[serde(default)]
    pub require_matches: Option<bool>,
    /// Anchor rules, applied per line in order.
    #[serde(default)]
    pub anchors: Vec<AnchorEntry>,
    /// Rewrite rules, applied to the whole text in order.
    #[serde(default)]
    pub rewrites: Vec<RewriteEntry>,
}

impl RuleFile {
    /// Parses a YAML document. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::Parse`] when the document is malformed or has
    /// unknown keys.
    pub fn from_yaml(origin: &Utf8Path, text: &str) -> Result<Self, RuleSetError> {
        serde_saphyr::from_str(text).map_err(|err| RuleSetError::parse(origin, err.to_string()))
    }

    /// Reads and parses the YAML rule file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::Read`] when the file cannot be read and
    /// [`RuleSetError::Parse`] when it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, RuleSetError> {
        let text = fs::read_to_string(path).map_err(|err| RuleSetError::read(path, err))?;
        Self::from_yaml(path, &text)
    }

    /// Compiles the entries into an engine [`RuleSet`].
    ///
    /// Every pattern is compiled here, so a malformed pattern is reported
    /// before any target file is opened.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::Invalid`] naming the first rule that fails.
    pub fn to_rule_set(&self) -> Result<RuleSet, RuleSetError> {
        let anchors = self
            .anchors
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                AnchorRule::new(entry.anchor.as_str(), entry.insert.as_str())
                    .map(|rule| rule.with_policy(entry.policy.into()))
                    .map_err(|source| RuleSetError::Invalid {
                        section: "anchors",
                        index: position.saturating_add(1),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rewrites = self
            .rewrites
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                RewriteRule::new(entry.pattern.as_str(), entry.replace.as_str(), entry.kind.into())
                    .map_err(|source| RuleSetError::Invalid {
                        section: "rewrites",
                        index: position.saturating_add(1),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet::new(anchors, rewrites))
    }

    /// The rule list for moving tmux-intray's status command onto the named
    /// storage field constants.
    pub(crate) fn storage_fields() -> Self {
        Self {
            require_matches: None,
            anchors: vec![AnchorEntry {
                anchor: "\"github.com/cristianoliveira/tmux-intray/cmd\"".to_owned(),
                insert: "\t\"github.com/cristianoliveira/tmux-intray/internal/storage\""
                    .to_owned(),
                policy: PolicySetting::EveryMatch,
            }],
            // Bounds checks come before the indexes they guard.
            rewrites: vec![
                RewriteEntry::regex(r"len\(fields\) <= 8", "len(fields) <= storage.FieldLevel"),
                RewriteEntry::regex(r"fields\[8\]", "fields[storage.FieldLevel]"),
                RewriteEntry::regex(r"len\(fields\) <= 5", "len(fields) <= storage.FieldPane"),
                RewriteEntry::regex(r"fields\[3\]", "fields[storage.FieldSession]"),
                RewriteEntry::regex(r"fields\[4\]", "fields[storage.FieldWindow]"),
                RewriteEntry::regex(r"fields\[5\]", "fields[storage.FieldPane]"),
            ],
        }
    }
}
