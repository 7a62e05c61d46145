//! Command-line runtime for fieldfix.
//!
//! The module owns argument parsing, telemetry bootstrapping, rule-set
//! resolution, and the single transformation run. It is exercised both from
//! the binary entrypoint and from tests, where the IO streams are
//! substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use fieldfix_engine::{TransformOptions, TransformReport, Transformer};
use tracing::info;

mod cli;
mod errors;
pub mod telemetry;

use cli::Cli;
use errors::AppError;

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns [`ExitCode::SUCCESS`] only when the whole run completed. Any
/// failure is reported as a single line on `stderr`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage(error, stdout, stderr),
    };

    match execute(&cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "fieldfix: {error}");
            ExitCode::FAILURE
        }
    }
}

fn report_usage<W: Write, E: Write>(
    error: clap::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    if matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        let _ = write!(stdout, "{}", error.render());
        return ExitCode::SUCCESS;
    }
    let _ = write!(stderr, "{}", AppError::CliUsage(error));
    ExitCode::FAILURE
}

fn execute<W: Write>(cli: &Cli, stdout: &mut W) -> Result<(), AppError> {
    telemetry::initialise(&cli.config())?;

    let loaded = cli.rule_source().load()?;
    let require_matches = cli.require_matches || loaded.require_matches().unwrap_or(false);
    let options = TransformOptions::default()
        .with_dry_run(cli.dry_run)
        .with_require_matches(require_matches);

    let report = Transformer::new(loaded.into_rule_set())
        .with_options(options)
        .run(&cli.target)?;

    if cli.dry_run {
        stdout
            .write_all(report.result().text().as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(AppError::EmitOutput)?;
    }
    log_summary(&report);
    Ok(())
}

fn log_summary(report: &TransformReport) {
    for outcome in report.result().outcomes() {
        info!(
            pattern = outcome.pattern(),
            replacements = outcome.replacements(),
            "rule summary"
        );
    }
    info!(
        path = %report.path().display(),
        changed = report.result().changed(),
        written = report.written(),
        "done"
    );
}

#[cfg(test)]
mod tests;
