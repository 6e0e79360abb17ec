//! Menu binding: a keystroke mapped to a menu action

use super::action::{CommitKey, MenuAction};
use super::types::{KeyCode, Keystroke};

/// A single menu binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBinding {
    pub keystroke: Keystroke,
    pub action: MenuAction,
}

impl MenuBinding {
    pub fn new(keystroke: Keystroke, action: MenuAction) -> Self {
        Self { keystroke, action }
    }

    /// Get display string for this binding
    pub fn display_string(&self) -> String {
        self.keystroke.display_string()
    }
}

/// Bindings the arbiter always installs while a match is active.
///
/// Tab and Space are only added when their flags are set.
pub fn default_menu_bindings(enable_tab: bool, enable_space: bool) -> Vec<MenuBinding> {
    let mut bindings = vec![
        MenuBinding::new(Keystroke::key(KeyCode::Up), MenuAction::MovePrevious),
        MenuBinding::new(Keystroke::key(KeyCode::Down), MenuAction::MoveNext),
        MenuBinding::new(
            Keystroke::key(KeyCode::Enter),
            MenuAction::Commit(CommitKey::Enter),
        ),
        MenuBinding::new(Keystroke::key(KeyCode::Escape), MenuAction::Cancel),
    ];
    if enable_tab {
        bindings.push(MenuBinding::new(
            Keystroke::key(KeyCode::Tab),
            MenuAction::Commit(CommitKey::Tab),
        ));
    }
    if enable_space {
        bindings.push(MenuBinding::new(
            Keystroke::key(KeyCode::Space),
            MenuAction::Commit(CommitKey::Space),
        ));
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_minimal() {
        let bindings = default_menu_bindings(false, false);
        assert_eq!(bindings.len(), 4);
        assert!(!bindings
            .iter()
            .any(|b| b.keystroke.key == KeyCode::Tab || b.keystroke.key == KeyCode::Space));
    }

    #[test]
    fn test_default_bindings_with_flags() {
        let bindings = default_menu_bindings(true, true);
        assert!(bindings
            .iter()
            .any(|b| b.action == MenuAction::Commit(CommitKey::Tab)));
        assert!(bindings
            .iter()
            .any(|b| b.action == MenuAction::Commit(CommitKey::Space)));
    }
}
