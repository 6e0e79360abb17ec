//! Replaces the matched text with a committed value.

use std::cmp::Ordering;
use std::fmt;

use crate::editable::{EditableSurface, SurfaceError, TextOffset, TextRange};

/// Why a commit did not touch the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The range no longer covers the text it was computed for
    RangeInvalidated { range: TextRange, reason: String },
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::RangeInvalidated { range, reason } => {
                write!(f, "replace range {} invalidated: {}", range, reason)
            }
        }
    }
}

impl std::error::Error for CommitError {}

/// What a successful commit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The range was replaced; the cursor sits right after the value
    Replaced { cursor: TextOffset },
    /// The whole surface was cleared
    Cleared,
}

/// Performs the bounded range replacement for a committed item
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCommitter;

impl TextCommitter {
    /// Replace `range` (which must still read `expected`) with `value`.
    ///
    /// With `clear_surface` the surface is emptied instead of replaced. Either
    /// way the edit runs in one transaction.
    pub fn commit<S: EditableSurface>(
        &self,
        surface: &mut S,
        range: TextRange,
        expected: &str,
        value: &str,
        clear_surface: bool,
    ) -> Result<CommitOutcome, CommitError> {
        validate(surface, range, expected)?;

        if clear_surface {
            surface.clear();
            return Ok(CommitOutcome::Cleared);
        }

        let (range, value) = collapse_seams(surface, range, value);

        let cursor = surface
            .transact(|s| -> Result<TextOffset, SurfaceError> {
                let end = s.replace_range(range, &value)?;
                s.set_cursor(end)?;
                Ok(end)
            })
            .map_err(|err| CommitError::RangeInvalidated {
                range,
                reason: err.to_string(),
            })?;

        Ok(CommitOutcome::Replaced { cursor })
    }
}

/// Check the range is still live and still covers the matched text
fn validate<S: EditableSurface>(
    surface: &S,
    range: TextRange,
    expected: &str,
) -> Result<(), CommitError> {
    let invalid = |reason: String| CommitError::RangeInvalidated { range, reason };

    match surface.compare(range.start, range.end) {
        Ok(Ordering::Greater) => return Err(invalid("range is inverted".to_string())),
        Ok(_) => {}
        Err(err) => return Err(invalid(err.to_string())),
    }

    match surface.text_in_range(range) {
        Ok(text) if text == expected => Ok(()),
        Ok(text) => Err(invalid(format!(
            "expected {:?}, found {:?}",
            expected, text
        ))),
        Err(err) => Err(invalid(err.to_string())),
    }
}

/// Avoid a double space at either edge of the inserted value.
///
/// A leading space in the value is dropped when a space already precedes the
/// range; a space following the range is swallowed when the inserted text
/// already ends in one.
fn collapse_seams<S: EditableSurface>(
    surface: &S,
    mut range: TextRange,
    value: &str,
) -> (TextRange, String) {
    let mut value = value.to_string();
    let before = char_before(surface, range.start);

    if before == Some(' ') && value.starts_with(' ') {
        value.remove(0);
    }

    let last = value.chars().last().or(before);
    if last == Some(' ') && char_at(surface, range.end) == Some(' ') {
        if let Some(end) = range.end.shifted(1) {
            range.end = end;
        }
    }

    (range, value)
}

fn char_before<S: EditableSurface>(surface: &S, at: TextOffset) -> Option<char> {
    let prev = at.shifted(-1)?;
    surface
        .text_in_range(TextRange::new(prev, at))
        .ok()?
        .chars()
        .next()
}

fn char_at<S: EditableSurface>(surface: &S, at: TextOffset) -> Option<char> {
    let next = at.shifted(1)?;
    surface
        .text_in_range(TextRange::new(at, next))
        .ok()?
        .chars()
        .next()
}
