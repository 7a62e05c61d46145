//! CLI argument definitions for fieldfix.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::Parser;
use fieldfix_config::{
    Config, DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, LogFormat, Preset, RuleSource,
    default_log_format,
};

/// Injects a missing import and replaces magic field indexes with named
/// constants in a single source file.
#[derive(Parser, Debug)]
#[command(name = "fieldfix", version)]
pub(crate) struct Cli {
    /// Source file to rewrite in place.
    #[arg(value_name = "TARGET")]
    pub(crate) target: PathBuf,
    /// YAML rule file to apply instead of a built-in preset.
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub(crate) rules: Option<Utf8PathBuf>,
    /// Built-in rule set to apply (default `storage-fields`).
    #[arg(long, value_name = "NAME", value_parser = parse_preset)]
    pub(crate) preset: Option<Preset>,
    /// Prints the transformed text instead of writing it back.
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Fails when any rewrite rule matches nothing.
    #[arg(long)]
    pub(crate) require_matches: bool,
    /// `tracing` filter expression for diagnostics on stderr.
    #[arg(long, value_name = "FILTER", env = LOG_FILTER_ENV, default_value = DEFAULT_LOG_FILTER)]
    pub(crate) log_filter: String,
    /// Diagnostic output format.
    #[arg(
        long,
        value_name = "FORMAT",
        env = LOG_FORMAT_ENV,
        default_value_t = default_log_format()
    )]
    pub(crate) log_format: LogFormat,
}

impl Cli {
    /// Returns the logging configuration selected on the command line.
    pub(crate) fn config(&self) -> Config {
        Config::new(self.log_filter.as_str(), self.log_format)
    }

    /// Returns where the rules come from; a rule file beats the preset.
    pub(crate) fn rule_source(&self) -> RuleSource {
        match (&self.rules, self.preset) {
            (Some(path), _) => RuleSource::File(path.clone()),
            (None, Some(preset)) => RuleSource::Preset(preset),
            (None, None) => RuleSource::default(),
        }
    }
}

fn parse_preset(value: &str) -> Result<Preset, String> {
    Preset::named(value).map_err(|error| error.to_string())
}
