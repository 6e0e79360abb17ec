//! Typeahead configuration persistence
//!
//! Stored in `~/.config/omnibar/typeahead.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keymap::{default_menu_bindings, parse_bindings, BindingConfig, MenuBinding};
use crate::menu::MenuOptions;
use crate::trigger::{TriggerSpec, MAX_QUERY_LENGTH};

/// Typeahead behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadConfig {
    /// Trigger definitions, evaluated in order
    pub triggers: Vec<TriggerSpec>,
    /// Committing with Enter clears the surface instead of inserting the value
    pub clear_editor_on_enter: bool,
    /// Enter on an idle surface submits instead of inserting a newline
    pub prevent_default_on_enter: bool,
    /// Space commits the highlighted item
    pub enable_spacebar_trigger: bool,
    /// Tab commits the highlighted item
    pub enable_tab_commit: bool,
    /// Enter never commits
    pub disable_enter_key_press: bool,
    /// Nothing is highlighted until the user navigates
    pub no_default_selected_item: bool,
    pub max_visible_items: usize,
    /// Minimum characters read before the cursor; raised automatically to cover
    /// every trigger's `max_length`
    pub lookback: usize,
    /// Extra menu key bindings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingConfig>,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            triggers: vec![TriggerSpec::default()],
            clear_editor_on_enter: false,
            prevent_default_on_enter: false,
            enable_spacebar_trigger: false,
            enable_tab_commit: false,
            disable_enter_key_press: false,
            no_default_selected_item: false,
            max_visible_items: 8,
            lookback: 0,
            bindings: Vec::new(),
        }
    }
}

impl TypeaheadConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::typeahead_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`. Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Strictly read and parse a config file
    pub fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::typeahead_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Trigger specs with their boundary patterns compiled.
    ///
    /// Specs with an invalid pattern or an empty trigger set are skipped.
    pub fn trigger_specs(&self) -> Vec<TriggerSpec> {
        self.triggers
            .iter()
            .filter_map(|spec| {
                let mut spec = spec.clone();
                if spec.trigger.is_empty() {
                    tracing::warn!("Skipping trigger with no trigger characters");
                    return None;
                }
                if let Err(e) = spec.compile_boundary() {
                    tracing::warn!(
                        "Skipping trigger {:?}: invalid boundary pattern: {}",
                        spec.trigger,
                        e
                    );
                    return None;
                }
                Some(spec)
            })
            .collect()
    }

    pub fn menu_options(&self) -> MenuOptions {
        MenuOptions {
            no_default_selected_item: self.no_default_selected_item,
            disable_enter_key_press: self.disable_enter_key_press,
            max_visible_items: self.max_visible_items.max(1),
        }
    }

    /// Default bindings plus the configured extras. Invalid extras are dropped
    /// as a whole with a warning.
    pub fn menu_bindings(&self) -> Vec<MenuBinding> {
        let mut bindings =
            default_menu_bindings(self.enable_tab_commit, self.enable_spacebar_trigger);
        match parse_bindings(&self.bindings) {
            Ok(extra) => bindings.extend(extra),
            Err(e) => tracing::warn!("Ignoring configured menu bindings: {}", e),
        }
        bindings
    }

    /// Every problem a strict check finds, empty when the config is valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.triggers.is_empty() {
            problems.push("no triggers configured".to_string());
        }
        for (idx, spec) in self.triggers.iter().enumerate() {
            if spec.trigger.is_empty() {
                problems.push(format!("trigger #{}: no trigger characters", idx));
            }
            if spec.min_length > spec.max_length {
                problems.push(format!(
                    "trigger #{}: min_length {} exceeds max_length {}",
                    idx, spec.min_length, spec.max_length
                ));
            }
            if spec.max_length > MAX_QUERY_LENGTH {
                problems.push(format!(
                    "trigger #{}: max_length {} exceeds the limit of {}",
                    idx, spec.max_length, MAX_QUERY_LENGTH
                ));
            }
            if let Some(pattern) = &spec.boundary_pattern {
                if let Err(e) = regex::Regex::new(pattern) {
                    problems.push(format!("trigger #{}: invalid boundary pattern: {}", idx, e));
                }
            }
        }
        if let Err(e) = parse_bindings(&self.bindings) {
            problems.push(e.to_string());
        }
        if self.max_visible_items == 0 {
            problems.push("max_visible_items must be at least 1".to_string());
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TypeaheadConfig::default();
        assert_eq!(config.triggers.len(), 1);
        assert!(!config.clear_editor_on_enter);
        assert!(!config.prevent_default_on_enter);
        assert!(!config.enable_spacebar_trigger);
        assert!(!config.disable_enter_key_press);
        assert!(!config.no_default_selected_item);
        assert_eq!(config.max_visible_items, 8);
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
triggers:
  - trigger: "@"
    allow_whitespace: true
enable_tab_commit: true
bindings:
  - key: ctrl+n
    action: next
"#;
        let config: TypeaheadConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.triggers[0].trigger, "@");
        assert!(config.triggers[0].allow_whitespace);
        assert!(config.enable_tab_commit);
        assert_eq!(config.max_visible_items, 8);
        // 4 defaults + tab + ctrl+n
        assert_eq!(config.menu_bindings().len(), 6);
    }

    #[test]
    fn test_invalid_pattern_skips_spec() {
        let yaml = r#"
triggers:
  - trigger: "/"
    boundary_pattern: "(unclosed"
  - trigger: "@"
"#;
        let config: TypeaheadConfig = serde_yaml::from_str(yaml).unwrap();
        let specs = config.trigger_specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].trigger, "@");
        assert_eq!(config.problems().len(), 1);
    }

    #[test]
    fn test_invalid_bindings_are_dropped() {
        let config = TypeaheadConfig {
            bindings: vec![BindingConfig {
                key: "ctrl+n".into(),
                action: "explode".into(),
                platform: None,
            }],
            ..TypeaheadConfig::default()
        };
        assert_eq!(config.menu_bindings().len(), 4);
        assert_eq!(config.problems().len(), 1);
    }

    #[test]
    fn test_min_exceeds_max_is_a_problem() {
        let config = TypeaheadConfig {
            triggers: vec![TriggerSpec::new("/").with_min_length(5).with_max_length(2)],
            ..TypeaheadConfig::default()
        };
        assert_eq!(config.problems().len(), 1);
    }

    #[test]
    fn test_huge_max_length_is_a_problem() {
        let config: TypeaheadConfig =
            serde_yaml::from_str("triggers:\n  - trigger: \"/\"\n    max_length: 18446744073709551615\n")
                .unwrap();
        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("max_length"));
    }
}
