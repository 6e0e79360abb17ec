//! Actions a keystroke can be routed to while the selection menu is open

use std::str::FromStr;

/// What caused a commit. Some commit paths are gated by configuration flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitKey {
    /// Enter / Return (blocked by `disable_enter_key_press`)
    Enter,
    /// Tab (only bound when `enable_tab_commit` is set)
    Tab,
    /// Spacebar (only bound when `enable_spacebar_trigger` is set)
    Space,
    /// Click on a menu row
    Pointer,
    /// A user-configured shortcut
    Shortcut,
}

/// Menu action bound to a keystroke by the event arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    MovePrevious,
    MoveNext,
    Commit(CommitKey),
    Cancel,
}

impl MenuAction {
    /// Navigation actions never change the surface text
    pub fn is_navigation(self) -> bool {
        matches!(self, MenuAction::MovePrevious | MenuAction::MoveNext)
    }
}

impl FromStr for MenuAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MovePrevious" | "move_previous" | "previous" | "up" => Ok(MenuAction::MovePrevious),
            "MoveNext" | "move_next" | "next" | "down" => Ok(MenuAction::MoveNext),
            "Commit" | "commit" | "select" => Ok(MenuAction::Commit(CommitKey::Shortcut)),
            "Cancel" | "cancel" | "dismiss" => Ok(MenuAction::Cancel),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("MoveNext".parse(), Ok(MenuAction::MoveNext));
        assert_eq!("previous".parse(), Ok(MenuAction::MovePrevious));
        assert_eq!(
            "commit".parse(),
            Ok(MenuAction::Commit(CommitKey::Shortcut))
        );
        assert_eq!("dismiss".parse(), Ok(MenuAction::Cancel));
        assert_eq!("SaveFile".parse::<MenuAction>(), Err(()));
    }

    #[test]
    fn test_is_navigation() {
        assert!(MenuAction::MoveNext.is_navigation());
        assert!(!MenuAction::Cancel.is_navigation());
        assert!(!MenuAction::Commit(CommitKey::Enter).is_navigation());
    }
}
