//! Text ranges bounded by two offsets.

use std::fmt;

use super::offset::TextOffset;

/// A half-open text range `[start, end)`.
///
/// `start` must not come after `end`; for ranges spanning nodes that ordering is
/// checked by the surface when the range is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: TextOffset,
    pub end: TextOffset,
}

impl TextRange {
    pub fn new(start: TextOffset, end: TextOffset) -> Self {
        Self { start, end }
    }

    /// Create a collapsed range (a caret position)
    pub fn collapsed(at: TextOffset) -> Self {
        Self { start: at, end: at }
    }

    /// Check if the range is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if both endpoints are in the same node
    pub fn is_single_node(&self) -> bool {
        self.start.same_node(&self.end)
    }

    /// Length in characters, when the range lies within one node
    pub fn len_in_node(&self) -> Option<usize> {
        if self.is_single_node() {
            self.end.offset().checked_sub(self.start.offset())
        } else {
            None
        }
    }

    /// Check if an offset falls inside the range (inclusive of `end`).
    /// Only answers for offsets in the range's node.
    pub fn contains(&self, offset: TextOffset) -> bool {
        self.is_single_node()
            && offset.same_node(&self.start)
            && self.start.offset() <= offset.offset()
            && offset.offset() <= self.end.offset()
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
