//! Shared configuration for the fieldfix tool.
//!
//! This crate owns the rule-set document format, the built-in presets, and
//! the logging settings consumed by the binary. Rule sets resolve in one of
//! two ways: from a YAML file named on the command line, or from a preset.

mod defaults;
mod error;
mod logging;
mod presets;
mod rules;

use camino::Utf8PathBuf;
use fieldfix_engine::RuleSet;

pub use defaults::{
    DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, default_log_filter, default_log_format,
    default_preset,
};
pub use error::RuleSetError;
pub use logging::{LogFormat, LogFormatParseError};
pub use presets::Preset;
pub use rules::{AnchorEntry, KindSetting, PolicySetting, RewriteEntry, RuleFile};

/// Logging settings shared by the binary's telemetry setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    log_filter: String,
    log_format: LogFormat,
}

impl Config {
    /// Creates a configuration with the given logging settings.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
        }
    }

    /// Returns the `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_log_filter(), default_log_format())
    }
}

/// Where the rules for a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// A YAML rule file.
    File(Utf8PathBuf),
    /// A built-in preset.
    Preset(Preset),
}

impl Default for RuleSource {
    fn default() -> Self {
        Self::Preset(default_preset())
    }
}

/// A compiled rule set together with the settings its document carried.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    rule_set: RuleSet,
    require_matches: Option<bool>,
}

impl LoadedRules {
    /// Returns the compiled rules.
    #[must_use]
    pub const fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Consumes the value, returning the compiled rules.
    #[must_use]
    pub fn into_rule_set(self) -> RuleSet {
        self.rule_set
    }

    /// Returns the document's `require_matches` setting, if present.
    #[must_use]
    pub const fn require_matches(&self) -> Option<bool> {
        self.require_matches
    }
}

impl RuleSource {
    /// Reads (for files) and compiles the rule set.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleSetError`] when the file cannot be read or parsed, or
    /// when any rule fails to compile.
    pub fn load(&self) -> Result<LoadedRules, RuleSetError> {
        let document = match self {
            Self::File(path) => RuleFile::load(path)?,
            Self::Preset(preset) => preset.rule_file(),
        };
        Ok(LoadedRules {
            rule_set: document.to_rule_set()?,
            require_matches: document.require_matches,
        })
    }
}
