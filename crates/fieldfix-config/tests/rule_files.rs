//! Integration tests for resolving rule sets from files and presets.

use std::fs;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use fieldfix_config::{Preset, RuleSetError, RuleSource};
use fieldfix_engine::{InsertionPolicy, PatternKind, SourceFile, Transformer};

struct RuleDir {
    dir: TempDir,
}

impl RuleDir {
    fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = self.dir.path().join(name);
        if let Err(error) = fs::write(&path, content) {
            panic!("failed to write rule file: {error}");
        }
        match Utf8PathBuf::from_path_buf(path) {
            Ok(path) => path,
            Err(path) => panic!("non UTF-8 temp path: {}", path.display()),
        }
    }
}

#[fixture]
fn rule_dir() -> RuleDir {
    match TempDir::new() {
        Ok(dir) => RuleDir { dir },
        Err(error) => panic!("failed to create temporary directory: {error}"),
    }
}

#[rstest]
fn file_source_compiles_rules_in_order(rule_dir: RuleDir) {
    let path = rule_dir.write(
        "rules.yaml",
        r#"
require_matches: true
anchors:
  - anchor: 'pkg/cmd'
    insert: 'import "pkg/storage"'
    policy: first_match_only
rewrites:
  - pattern: 'len\(fields\) <= 8'
    replace: 'len(fields) <= storage.FieldLevel'
  - pattern: 'fields[8]'
    replace: 'fields[storage.FieldLevel]'
    kind: literal
"#,
    );

    let loaded = RuleSource::File(path)
        .load()
        .unwrap_or_else(|err| panic!("load: {err}"));

    assert_eq!(loaded.require_matches(), Some(true));
    let rules = loaded.rule_set();
    let Some(anchor) = rules.anchors().first() else {
        panic!("expected one anchor rule");
    };
    assert_eq!(anchor.anchor(), "pkg/cmd");
    assert_eq!(anchor.policy(), InsertionPolicy::FirstMatchOnly);
    let kinds: Vec<PatternKind> = rules.rewrites().iter().map(|rule| rule.kind()).collect();
    assert_eq!(kinds, [PatternKind::Regex, PatternKind::Literal]);
}

#[rstest]
fn malformed_pattern_in_file_is_reported(rule_dir: RuleDir) {
    let path = rule_dir.write(
        "broken.yaml",
        "rewrites:\n  - pattern: 'fields\\[8'\n    replace: 'x'\n",
    );

    let result = RuleSource::File(path).load();

    assert!(matches!(
        result,
        Err(RuleSetError::Invalid { section: "rewrites", index: 1, .. })
    ));
}

#[rstest]
fn empty_anchor_in_file_is_reported(rule_dir: RuleDir) {
    let path = rule_dir.write("empty.yaml", "anchors:\n  - anchor: ''\n    insert: 'x'\n");

    let result = RuleSource::File(path).load();

    assert!(matches!(
        result,
        Err(RuleSetError::Invalid { section: "anchors", index: 1, .. })
    ));
}

#[test]
fn missing_rule_file_is_a_read_error() {
    let result = RuleSource::File(Utf8PathBuf::from("/nonexistent/fieldfix/rules.yaml")).load();
    assert!(matches!(result, Err(RuleSetError::Read { .. })));
}

#[test]
fn default_source_is_storage_fields_preset() {
    assert_eq!(RuleSource::default(), RuleSource::Preset(Preset::StorageFields));

    let loaded = RuleSource::default()
        .load()
        .unwrap_or_else(|err| panic!("load: {err}"));
    assert_eq!(loaded.require_matches(), None);
    assert_eq!(loaded.rule_set().rewrites().len(), 6);
}

#[test]
fn storage_fields_preset_keeps_crlf_line_endings() {
    let source = SourceFile::from_text(
        "status.go",
        "import (\r\n\t\"github.com/cristianoliveira/tmux-intray/cmd\"\r\n)\r\n\r\nlevel := fields[8]\r\n",
    );
    let loaded = RuleSource::Preset(Preset::StorageFields)
        .load()
        .unwrap_or_else(|err| panic!("load: {err}"));

    let result = Transformer::new(loaded.into_rule_set())
        .transform(&source)
        .unwrap_or_else(|err| panic!("transform: {err}"));

    assert_eq!(
        result.text(),
        "import (\r\n\t\"github.com/cristianoliveira/tmux-intray/cmd\"\r\n\t\"github.com/cristianoliveira/tmux-intray/internal/storage\"\r\n)\r\n\r\nlevel := fields[storage.FieldLevel]\r\n"
    );
    assert!(
        !result.text().replace("\r\n", "").contains('\n'),
        "no bare LF line endings"
    );
}
