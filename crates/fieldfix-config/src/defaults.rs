use crate::logging::LogFormat;
use crate::presets::Preset;

/// Default log filter expression used by the binary.
///
/// Only zero-match warnings and failures surface unless the operator asks
/// for more.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable overriding the log filter.
pub const LOG_FILTER_ENV: &str = "FIELDFIX_LOG_FILTER";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "FIELDFIX_LOG_FORMAT";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Preset applied when no rule file is given.
#[must_use]
pub const fn default_preset() -> Preset {
    Preset::StorageFields
}
