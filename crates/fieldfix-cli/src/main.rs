//! CLI entrypoint for the fieldfix source transformer.
//!
//! The binary delegates to [`fieldfix_cli::run`], which parses arguments,
//! installs telemetry, resolves the rule set, and rewrites the target file.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    fieldfix_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
