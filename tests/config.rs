//! Configuration system tests
//!
//! Tests for config paths, typeahead config persistence, and how configured
//! triggers and bindings reach a running typeahead.

mod common;

use common::{commands, menu_labels, omnibar_with};
use omnibar::config_paths;
use omnibar::keymap::{BindingConfig, KeyCode, Keystroke, Modifiers};
use omnibar::trigger::TriggerSpec;
use omnibar::TypeaheadConfig;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("omnibar"));
    }
}

#[test]
fn test_typeahead_file_ends_with_yaml() {
    if let Some(path) = config_paths::typeahead_file() {
        assert!(path.to_string_lossy().ends_with("typeahead.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("typeahead.yaml");

    let config = TypeaheadConfig {
        triggers: vec![
            TriggerSpec::new("/").with_max_length(20),
            TriggerSpec::new("@#").with_whitespace(true),
        ],
        enable_tab_commit: true,
        max_visible_items: 5,
        ..TypeaheadConfig::default()
    };
    config.save_to(&path).unwrap();

    let loaded = TypeaheadConfig::read(&path).unwrap();
    assert_eq!(loaded.triggers.len(), 2);
    assert_eq!(loaded.triggers[0].max_length, 20);
    assert_eq!(loaded.triggers[1].trigger, "@#");
    assert!(loaded.triggers[1].allow_whitespace);
    assert!(loaded.enable_tab_commit);
    assert_eq!(loaded.max_visible_items, 5);
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TypeaheadConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config.triggers.len(), 1);
    assert_eq!(config.triggers[0].trigger, "/");
}

#[test]
fn test_load_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typeahead.yaml");
    std::fs::write(&path, "triggers: [unterminated").unwrap();

    assert!(TypeaheadConfig::read(&path).is_err());
    let config = TypeaheadConfig::load_from(&path);
    assert_eq!(config.max_visible_items, 8);
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typeahead.yaml");
    std::fs::write(&path, "{}").unwrap();

    let config = TypeaheadConfig::read(&path).unwrap();
    assert_eq!(config.triggers.len(), 1);
    assert!(config.problems().is_empty());
}

// ========================================================================
// Configured Behavior Tests
// ========================================================================

#[test]
fn test_boundary_pattern_from_yaml() {
    let yaml = r##"
triggers:
  - trigger: "#"
    boundary_pattern: "^#[0-9]+$"
"##;
    let config: TypeaheadConfig = serde_yaml::from_str(yaml).unwrap();
    let issues = vec![
        omnibar::candidates::CandidateItem::new("12", "#12 Crash on save", "#12"),
        omnibar::candidates::CandidateItem::new("13", "#13 Slow startup", "#13"),
    ];

    let (mut bar, _hooks) = omnibar_with("", config.clone(), issues.clone());
    bar.type_text("#ab");
    assert!(!bar.typeahead().is_active());

    let (mut bar, _hooks) = omnibar_with("", config, issues);
    bar.type_text("#1");
    assert!(bar.typeahead().is_active());
}

#[test]
fn test_configured_binding_moves_highlight() {
    let config = TypeaheadConfig {
        bindings: vec![BindingConfig {
            key: "ctrl+n".into(),
            action: "next".into(),
            platform: None,
        }],
        ..TypeaheadConfig::default()
    };
    let (mut bar, _hooks) = omnibar_with("", config, commands());

    bar.type_text("/h");
    assert_eq!(menu_labels(&bar).len(), 3);
    bar.press(Keystroke::new(KeyCode::Char('n'), Modifiers::CTRL));

    assert_eq!(bar.typeahead().menu().highlighted_index(), Some(1));
    assert_eq!(bar.surface().text(), "/h");
}

#[test]
fn test_max_visible_items_limits_viewport() {
    let config = TypeaheadConfig {
        max_visible_items: 2,
        ..TypeaheadConfig::default()
    };
    let (mut bar, _hooks) = omnibar_with("", config, commands());

    bar.type_text("/h");
    bar.press(Keystroke::key(KeyCode::Up));

    let viewport = bar.typeahead().menu().viewport();
    assert_eq!(viewport.visible_rows, 2);
    assert!(viewport.is_row_visible(2));
    assert!(!viewport.is_row_visible(0));
}

#[test]
fn test_oversized_max_length_still_matches() {
    let yaml = "triggers:\n  - trigger: \"/\"\n    max_length: 18446744073709551615\n";
    let config: TypeaheadConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(!config.problems().is_empty());

    let (mut bar, _hooks) = omnibar_with("", config, commands());
    bar.type_text("/he");

    assert!(bar.typeahead().is_active());
    assert_eq!(menu_labels(&bar), vec!["help", "hello", "heading"]);
}
