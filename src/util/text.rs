//! Character classification helpers shared by the trigger scanner and the committer

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
            | '_'
    )
}

/// Characters that may sit directly before a trigger without making it "mid-word".
///
/// Whitespace always qualifies; an opening parenthesis does too so that
/// `(@name` still triggers.
pub fn is_leading_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '('
}

/// Whether the character at `idx` is escaped by an odd run of backslashes before it
pub fn is_escaped(chars: &[char], idx: usize) -> bool {
    let backslashes = chars[..idx]
        .iter()
        .rev()
        .take_while(|&&c| c == '\\')
        .count();
    backslashes % 2 == 1
}

/// Number of characters in a string (not bytes)
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation() {
        assert!(is_punctuation('/'));
        assert!(is_punctuation('@'));
        assert!(!is_punctuation('a'));
        assert!(!is_punctuation(' '));
    }

    #[test]
    fn test_leading_boundary() {
        assert!(is_leading_boundary(' '));
        assert!(is_leading_boundary('\t'));
        assert!(is_leading_boundary('('));
        assert!(!is_leading_boundary('a'));
        assert!(!is_leading_boundary('/'));
    }

    #[test]
    fn test_escaped() {
        let chars: Vec<char> = r"a\/b".chars().collect();
        assert!(is_escaped(&chars, 2));
        assert!(!is_escaped(&chars, 1));

        // Double backslash escapes itself, not the trigger
        let chars: Vec<char> = r"\\/".chars().collect();
        assert!(!is_escaped(&chars, 2));
    }

    #[test]
    fn test_char_len_utf8() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len(""), 0);
    }
}
