//! Text to keystroke mapping for scripted input
//!
//! Typed text goes through the same handler lookup as real key presses, so a
//! space or newline in typed text can be claimed by the menu like the physical
//! key would be.

use crate::keymap::{parse_key_string, KeyCode, KeymapError, Keystroke, Modifiers};

/// The keystroke that types `ch`
pub fn keystroke_for_char(ch: char) -> Keystroke {
    match ch {
        '\n' => Keystroke::key(KeyCode::Enter),
        '\t' => Keystroke::key(KeyCode::Tab),
        c if c.is_uppercase() => Keystroke::char_with_mods(c, Modifiers::SHIFT),
        c => Keystroke::char(c),
    }
}

/// Keystrokes that type `text`, in order
pub fn keystrokes_for_text(text: &str) -> Vec<Keystroke> {
    text.chars().map(keystroke_for_char).collect()
}

/// Parse a named key from a script step, e.g. "down", "ctrl+n" or "Enter"
pub fn parse_script_key(key: &str) -> Result<Keystroke, KeymapError> {
    parse_key_string(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_shifted_chars() {
        assert_eq!(keystroke_for_char('a'), Keystroke::char('a'));
        assert_eq!(
            keystroke_for_char('H'),
            Keystroke::new(KeyCode::Char('h'), Modifiers::SHIFT)
        );
        assert_eq!(keystroke_for_char('/'), Keystroke::char('/'));
    }

    #[test]
    fn test_whitespace_maps_to_named_keys() {
        assert_eq!(keystroke_for_char(' '), Keystroke::key(KeyCode::Space));
        assert_eq!(keystroke_for_char('\n'), Keystroke::key(KeyCode::Enter));
        assert_eq!(keystroke_for_char('\t'), Keystroke::key(KeyCode::Tab));
    }

    #[test]
    fn test_text_to_keystrokes() {
        let keys = keystrokes_for_text("/He");
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[1].mods, Modifiers::SHIFT);
    }

    #[test]
    fn test_parse_script_key() {
        assert_eq!(
            parse_script_key("down").unwrap(),
            Keystroke::key(KeyCode::Down)
        );
        assert_eq!(
            parse_script_key("ctrl+n").unwrap(),
            Keystroke::new(KeyCode::Char('n'), Modifiers::CTRL)
        );
        assert!(parse_script_key("hyper").is_err());
    }
}
