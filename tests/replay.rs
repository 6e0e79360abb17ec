//! Replay script tests
//!
//! Scripts are loaded from disk the same way the `replay` subcommand does.

use omnibar::script::{replay, Script, ScriptError};
use omnibar::TypeaheadConfig;

fn write_script(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.yaml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_replay_from_file() {
    let (_dir, path) = write_script(
        r#"
text: "Ask "
candidates:
  - { id: u1, label: Alice, value: "@alice " }
  - { id: u2, label: Bob, value: "@bob " }
steps:
  - "/b"
  - key: enter
  - "hi"
"#,
    );

    let script = Script::load(&path).unwrap();
    let report = replay(&script, TypeaheadConfig::default()).unwrap();

    assert_eq!(report.text, "Ask @bob hi");
    assert_eq!(report.query, None);
    assert!(report.events.contains(&"select u2".to_string()));
}

#[test]
fn test_fuzzy_source_ranks_matches() {
    let script = Script::parse(
        r#"
source: fuzzy
candidates: [heading, help, hello]
steps:
  - "/hlp"
"#,
    )
    .unwrap();

    let report = replay(&script, TypeaheadConfig::default()).unwrap();

    assert_eq!(report.query.as_deref(), Some("hlp"));
    assert_eq!(report.menu.first().map(String::as_str), Some("help"));
}

#[test]
fn test_substring_source() {
    let script = Script::parse(
        r#"
source: substring
candidates: [spreadsheet, table, tablet]
steps:
  - "/abl"
"#,
    )
    .unwrap();

    let report = replay(&script, TypeaheadConfig::default()).unwrap();

    assert_eq!(report.menu, vec!["table", "tablet"]);
    assert_eq!(report.highlighted, Some(0));
}

#[test]
fn test_report_serializes_to_json() {
    let script = Script::parse("candidates: [help]\nsteps: [\"/he\"]\n").unwrap();
    let report = replay(&script, TypeaheadConfig::default()).unwrap();

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["text"], "/he");
    assert_eq!(json["query"], "he");
    assert_eq!(json["menu"][0], "help");
}

#[test]
fn test_missing_script_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Script::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ScriptError::Io(_)));
}

#[test]
fn test_malformed_script_is_parse_error() {
    let err = Script::parse("steps: {not: [a list").unwrap_err();
    assert!(matches!(err, ScriptError::Parse(_)));
}
