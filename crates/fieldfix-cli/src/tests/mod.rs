//! Unit tests for the CLI runtime.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use fieldfix_config::{LogFormat, Preset, RuleSource};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::cli::Cli;
use crate::run;

const SOURCE: &str = "import (\n\t\"github.com/cristianoliveira/tmux-intray/cmd\"\n)\n\nif len(fields) <= 8 {\n\treturn fields[8]\n}\n";

const EXPECTED: &str = "import (\n\t\"github.com/cristianoliveira/tmux-intray/cmd\"\n\t\"github.com/cristianoliveira/tmux-intray/internal/storage\"\n)\n\nif len(fields) <= storage.FieldLevel {\n\treturn fields[storage.FieldLevel]\n}\n";

struct Harness {
    dir: TempDir,
    target: PathBuf,
}

impl Harness {
    fn path_arg(path: &Path) -> OsString {
        path.as_os_str().to_owned()
    }

    fn write_rules(&self, yaml: &str) -> PathBuf {
        let path = self.dir.path().join("rules.yaml");
        fs::write(&path, yaml).expect("write rules");
        path
    }

    fn content(&self) -> String {
        fs::read_to_string(&self.target).expect("read target")
    }

    fn run(&self, extra: &[OsString]) -> (ExitCode, String, String) {
        let mut args = vec![OsString::from("fieldfix")];
        args.extend(extra.iter().cloned());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run(args, &mut stdout, &mut stderr);
        (
            exit,
            String::from_utf8(stdout).expect("stdout utf8"),
            String::from_utf8(stderr).expect("stderr utf8"),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    let dir = TempDir::new().expect("temp dir");
    let target = dir.path().join("status.go");
    fs::write(&target, SOURCE).expect("write target");
    Harness { dir, target }
}

#[rstest]
fn default_preset_rewrites_target(harness: Harness) {
    let (exit, stdout, stderr) = harness.run(&[Harness::path_arg(&harness.target)]);

    assert_eq!(exit, ExitCode::SUCCESS, "stderr: {stderr}");
    assert!(stdout.is_empty());
    assert_eq!(harness.content(), EXPECTED);
}

#[rstest]
fn dry_run_prints_and_preserves_target(harness: Harness) {
    let (exit, stdout, _) = harness.run(&[
        OsString::from("--dry-run"),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::SUCCESS);
    assert_eq!(stdout, EXPECTED);
    assert_eq!(harness.content(), SOURCE);
}

#[rstest]
fn missing_target_reports_not_found(harness: Harness) {
    let missing = harness.dir.path().join("absent.go");
    let (exit, _, stderr) = harness.run(&[Harness::path_arg(&missing)]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("target file not found"), "stderr: {stderr}");
    assert!(!missing.exists());
}

#[rstest]
fn malformed_rule_file_leaves_target_untouched(harness: Harness) {
    let rules = harness.write_rules("rewrites:\n  - pattern: 'fields\\[8'\n    replace: 'x'\n");
    let before = fs::metadata(&harness.target)
        .and_then(|m| m.modified())
        .expect("mtime");

    let (exit, _, stderr) = harness.run(&[
        OsString::from("--rules"),
        Harness::path_arg(&rules),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("failed to load rules"), "stderr: {stderr}");
    assert_eq!(harness.content(), SOURCE);
    let after = fs::metadata(&harness.target)
        .and_then(|m| m.modified())
        .expect("mtime");
    assert_eq!(before, after);
}

#[rstest]
fn require_matches_fails_on_unmatched_preset_rule(harness: Harness) {
    let (exit, _, stderr) = harness.run(&[
        OsString::from("--require-matches"),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("matched nothing"), "stderr: {stderr}");
    assert_eq!(harness.content(), SOURCE);
}

#[rstest]
fn rule_file_require_matches_applies_without_flag(harness: Harness) {
    let rules = harness.write_rules(
        "require_matches: true\nrewrites:\n  - pattern: 'fields[42]'\n    replace: 'x'\n    kind: literal\n",
    );

    let (exit, _, stderr) = harness.run(&[
        OsString::from("--rules"),
        Harness::path_arg(&rules),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("`fields[42]` matched nothing"), "stderr: {stderr}");
}

#[rstest]
fn rules_and_preset_conflict(harness: Harness) {
    let rules = harness.write_rules("rewrites: []\n");
    let (exit, _, stderr) = harness.run(&[
        OsString::from("--rules"),
        Harness::path_arg(&rules),
        OsString::from("--preset"),
        OsString::from("storage-fields"),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("cannot be used with"), "stderr: {stderr}");
}

#[rstest]
fn unknown_preset_is_a_usage_error(harness: Harness) {
    let (exit, _, stderr) = harness.run(&[
        OsString::from("--preset"),
        OsString::from("nope"),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("unknown preset: nope"), "stderr: {stderr}");
}

#[rstest]
fn invalid_log_filter_fails_before_touching_target(harness: Harness) {
    let (exit, _, stderr) = harness.run(&[
        OsString::from("--log-filter"),
        OsString::from("fieldfix=notalevel"),
        Harness::path_arg(&harness.target),
    ]);

    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("invalid log filter"), "stderr: {stderr}");
    assert_eq!(harness.content(), SOURCE);
}

#[rstest]
fn help_goes_to_stdout(harness: Harness) {
    let (exit, stdout, _) = harness.run(&[OsString::from("--help")]);

    assert_eq!(exit, ExitCode::SUCCESS);
    assert!(stdout.contains("Usage"));
}

#[rstest]
#[case(&["fieldfix", "a.go"], RuleSource::Preset(Preset::StorageFields))]
#[case(
    &["fieldfix", "--preset", "storage-fields", "a.go"],
    RuleSource::Preset(Preset::StorageFields)
)]
#[case(
    &["fieldfix", "--rules", "r.yaml", "a.go"],
    RuleSource::File(Utf8PathBuf::from("r.yaml"))
)]
fn rule_source_selection(#[case] args: &[&str], #[case] expected: RuleSource) {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("parse");
    assert_eq!(cli.rule_source(), expected);
}

#[test]
fn logging_flags_build_config() {
    let cli = Cli::try_parse_from([
        "fieldfix",
        "--log-filter",
        "debug",
        "--log-format",
        "json",
        "a.go",
    ])
    .expect("parse");

    let config = cli.config();
    assert_eq!(config.log_filter(), "debug");
    assert_eq!(config.log_format(), LogFormat::Json);
}
