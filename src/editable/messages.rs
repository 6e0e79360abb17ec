//! Editing messages understood by the reference surface.

use crate::keymap::{KeyCode, Keystroke};

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one line (node) up
    Up,
    /// Move one line (node) down
    Down,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
}

/// Editing operations applied by the surface's default key handling.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEditMsg {
    // === Movement ===
    Move(MoveTarget),

    // === Insertion ===
    /// Insert a single character
    InsertChar(char),
    /// Insert a string (e.g., from paste)
    InsertText(String),
    /// Split the current line
    InsertNewline,

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,
}

impl TextEditMsg {
    /// Check if this message modifies the content
    pub fn is_editing(&self) -> bool {
        !self.is_movement()
    }

    /// Check if this message is a movement operation
    pub fn is_movement(&self) -> bool {
        matches!(self, TextEditMsg::Move(_))
    }

    /// Default mapping from a keystroke to an edit.
    ///
    /// Keys with command modifiers held produce nothing.
    pub fn from_keystroke(keystroke: &Keystroke) -> Option<TextEditMsg> {
        let mods = keystroke.mods;
        let msg = match keystroke.key {
            KeyCode::Char(ch) if mods.is_text_input() => {
                let ch = if mods.shift() {
                    ch.to_uppercase().next().unwrap_or(ch)
                } else {
                    ch
                };
                TextEditMsg::InsertChar(ch)
            }
            KeyCode::Space if mods.is_text_input() => TextEditMsg::InsertChar(' '),
            KeyCode::Enter if mods.is_text_input() => TextEditMsg::InsertNewline,
            KeyCode::Backspace => TextEditMsg::DeleteBackward,
            KeyCode::Delete => TextEditMsg::DeleteForward,
            KeyCode::Left => TextEditMsg::Move(MoveTarget::Left),
            KeyCode::Right => TextEditMsg::Move(MoveTarget::Right),
            KeyCode::Up => TextEditMsg::Move(MoveTarget::Up),
            KeyCode::Down => TextEditMsg::Move(MoveTarget::Down),
            KeyCode::Home if mods.ctrl() => TextEditMsg::Move(MoveTarget::DocumentStart),
            KeyCode::End if mods.ctrl() => TextEditMsg::Move(MoveTarget::DocumentEnd),
            KeyCode::Home => TextEditMsg::Move(MoveTarget::LineStart),
            KeyCode::End => TextEditMsg::Move(MoveTarget::LineEnd),
            _ => return None,
        };
        Some(msg)
    }
}
