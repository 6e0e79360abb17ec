//! Backward trigger scan over the text before the cursor.
//!
//! The scan walks from the cursor towards the start of the window. The first
//! (rightmost) unescaped trigger character decides the outcome for a spec; any
//! prohibited character or exceeding `max_length` before reaching one ends the
//! scan with no match. Index 0 of the window is treated as a line start: callers
//! pass either a whole node prefix or a window wider than every `max_length`,
//! so a trigger at index 0 of a truncated window is never reachable.

use super::boundary::BoundaryContext;
use super::spec::TriggerSpec;
use crate::util::{char_len, is_escaped, is_leading_boundary};

/// A trigger occurrence that satisfied one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    /// Index of the trigger definition that matched
    pub spec_index: usize,
    pub trigger: char,
    /// Character index of the trigger within the scanned text
    pub trigger_index: usize,
    /// Query: the text between the trigger and the cursor
    pub leading_text: String,
    /// Trigger plus query, the text a commit replaces
    pub replaceable_text: String,
}

impl TriggerMatch {
    /// Number of characters from the trigger to the cursor
    pub fn replaceable_len(&self) -> usize {
        char_len(&self.replaceable_text)
    }
}

/// Evaluate specs in priority order; the first one with a valid occurrence wins.
pub fn match_trigger(text: &str, specs: &[TriggerSpec]) -> Option<TriggerMatch> {
    let chars: Vec<char> = text.chars().collect();
    specs
        .iter()
        .enumerate()
        .find_map(|(index, spec)| match_spec(text, &chars, index, spec))
}

fn match_spec(
    text: &str,
    chars: &[char],
    spec_index: usize,
    spec: &TriggerSpec,
) -> Option<TriggerMatch> {
    let end = chars.len();

    for pos in (0..end).rev() {
        let query_len = end - pos - 1;
        if query_len > spec.max_length {
            return None;
        }

        let ch = chars[pos];
        if spec.is_trigger(ch) && !is_escaped(chars, pos) {
            return validate(text, chars, spec_index, spec, pos);
        }
        if spec.is_prohibited(ch) {
            return None;
        }
    }

    None
}

/// Checks applied once the rightmost trigger occurrence is known
fn validate(
    text: &str,
    chars: &[char],
    spec_index: usize,
    spec: &TriggerSpec,
    pos: usize,
) -> Option<TriggerMatch> {
    if spec.require_leading_boundary && pos > 0 && !is_leading_boundary(chars[pos - 1]) {
        return None;
    }

    let query: String = chars[pos + 1..].iter().collect();
    let query_len = chars.len() - pos - 1;
    if query_len < spec.min_length {
        return None;
    }

    if let Some(check) = &spec.boundary {
        let ctx = BoundaryContext {
            text,
            trigger_index: pos,
            trigger: chars[pos],
            query: &query,
        };
        if !check.accepts(&ctx) {
            tracing::trace!(
                "boundary check rejected trigger {:?} at {}",
                chars[pos],
                pos
            );
            return None;
        }
    }

    Some(TriggerMatch {
        spec_index,
        trigger: chars[pos],
        trigger_index: pos,
        replaceable_text: chars[pos..].iter().collect(),
        leading_text: query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::RegexBoundary;

    fn slash() -> Vec<TriggerSpec> {
        vec![TriggerSpec::new("/")]
    }

    #[test]
    fn test_basic_match() {
        let m = match_trigger("hello /ab", &slash()).unwrap();
        assert_eq!(m.leading_text, "ab");
        assert_eq!(m.replaceable_text, "/ab");
        assert_eq!(m.trigger_index, 6);
        assert_eq!(m.replaceable_len(), 3);
    }

    #[test]
    fn test_empty_query_with_zero_min_length() {
        let specs = vec![TriggerSpec::new("/").with_min_length(0).with_max_length(50)];
        let m = match_trigger("/", &specs).unwrap();
        assert_eq!(m.leading_text, "");

        let m = match_trigger("some text /", &specs).unwrap();
        assert_eq!(m.leading_text, "");
    }

    #[test]
    fn test_empty_query_rejected_by_default_min_length() {
        assert!(match_trigger("/", &slash()).is_none());
    }

    #[test]
    fn test_mid_word_rejected() {
        assert!(match_trigger("foo/bar", &slash()).is_none());
        assert!(match_trigger("a/b", &slash()).is_none());
    }

    #[test]
    fn test_mid_word_allowed_without_leading_boundary() {
        let specs = vec![TriggerSpec::new("/").with_leading_boundary(false)];
        let m = match_trigger("foo/bar", &specs).unwrap();
        assert_eq!(m.leading_text, "bar");
    }

    #[test]
    fn test_paren_is_leading_boundary() {
        let specs = vec![TriggerSpec::new("@")];
        let m = match_trigger("(@ann", &specs).unwrap();
        assert_eq!(m.leading_text, "ann");
    }

    #[test]
    fn test_whitespace_ends_query() {
        assert!(match_trigger("/foo bar", &slash()).is_none());

        let specs = vec![TriggerSpec::new("/").with_whitespace(true)];
        let m = match_trigger("/foo bar", &specs).unwrap();
        assert_eq!(m.leading_text, "foo bar");
    }

    #[test]
    fn test_newline_always_ends_query() {
        let specs = vec![TriggerSpec::new("/").with_whitespace(true)];
        assert!(match_trigger("/foo\nbar", &specs).is_none());
    }

    #[test]
    fn test_forbidden_chars() {
        let specs = vec![TriggerSpec::new("@").with_forbidden(".")];
        assert!(match_trigger("@a.b", &specs).is_none());

        let specs = vec![TriggerSpec::new("@").with_punctuation_forbidden()];
        assert!(match_trigger("@a,b", &specs).is_none());
        assert!(match_trigger("@ab", &specs).is_some());
    }

    #[test]
    fn test_rightmost_trigger_wins() {
        let m = match_trigger("/one /two", &slash()).unwrap();
        assert_eq!(m.leading_text, "two");
        assert_eq!(m.trigger_index, 5);
    }

    #[test]
    fn test_unescaped_trigger_inside_query_blocks_earlier_trigger() {
        // The rightmost '/' is mid-word, and the earlier one would include it
        assert!(match_trigger("/a/b", &slash()).is_none());
    }

    #[test]
    fn test_escaped_trigger() {
        assert!(match_trigger(r"\/help", &slash()).is_none());
        // An escaped backslash does not escape the trigger
        let specs = vec![TriggerSpec::new("/").with_leading_boundary(false)];
        let m = match_trigger(r"\\/help", &specs).unwrap();
        assert_eq!(m.leading_text, "help");
    }

    #[test]
    fn test_max_length_bounds_scan() {
        let specs = vec![TriggerSpec::new("/").with_max_length(3)];
        assert!(match_trigger("/abc", &specs).is_some());
        assert!(match_trigger("/abcd", &specs).is_none());
    }

    #[test]
    fn test_specs_in_priority_order() {
        let specs = vec![TriggerSpec::new("@"), TriggerSpec::new("/")];
        let m = match_trigger("/cmd", &specs).unwrap();
        assert_eq!(m.spec_index, 1);
        assert_eq!(m.trigger, '/');

        let specs = vec![TriggerSpec::new("@/")];
        let m = match_trigger("hi @bo", &specs).unwrap();
        assert_eq!(m.trigger, '@');
    }

    #[test]
    fn test_first_spec_wins_even_if_later_also_matches() {
        let specs = vec![
            TriggerSpec::new("/").with_whitespace(true),
            TriggerSpec::new("/"),
        ];
        let m = match_trigger("/a b", &specs).unwrap();
        assert_eq!(m.spec_index, 0);
        assert_eq!(m.leading_text, "a b");
    }

    #[test]
    fn test_boundary_check() {
        let specs = vec![TriggerSpec::new("/").with_boundary(RegexBoundary::reject(r"^>").unwrap())];
        assert!(match_trigger("> /quote", &specs).is_none());
        assert!(match_trigger("x /quote", &specs).is_some());
    }

    #[test]
    fn test_unicode_offsets_are_chars() {
        let m = match_trigger("héllo /wö", &slash()).unwrap();
        assert_eq!(m.trigger_index, 6);
        assert_eq!(m.leading_text, "wö");
    }
}
