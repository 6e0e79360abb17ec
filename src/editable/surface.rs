//! The editable surface interface the typeahead engine consumes.
//!
//! Anything that can report the text before its cursor, map offsets to screen
//! rectangles, replace a bounded range, notify about changes and host
//! prioritized key handlers can drive the engine. [`InlineSurface`] is the
//! bundled implementation.
//!
//! [`InlineSurface`]: super::InlineSurface

use std::cmp::Ordering;
use std::fmt;

use super::offset::{NodeId, TextOffset};
use super::range::TextRange;
use crate::keymap::{HandlerId, Keystroke, Priority};
use crate::overlay::Rect;

/// Text immediately before the cursor, limited to the cursor's node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    /// Offset of the first character of `text`
    pub start: TextOffset,
    pub text: String,
    /// True if `start` is the beginning of the node (a line start)
    pub at_node_start: bool,
}

impl TextWindow {
    /// Offset of the character at `char_idx` within the window
    pub fn offset_at(&self, char_idx: usize) -> TextOffset {
        TextOffset::new(self.start.node(), self.start.offset() + char_idx)
    }

    /// The cursor position the window ends at
    pub fn end(&self) -> TextOffset {
        self.offset_at(self.text.chars().count())
    }
}

/// What kind of change a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Text content changed (the cursor may have moved too)
    Content,
    /// Only the cursor or selection moved
    Selection,
}

/// A change notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Surface revision after the change
    pub revision: u64,
}

/// Subscription handle for change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Errors reported by a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has no cursor (e.g. it is not focused)
    NoCursor,
    /// The node no longer exists
    UnknownNode(NodeId),
    /// The offset is past the end of its node
    OffsetOutOfBounds { offset: TextOffset, len: usize },
    /// The range end comes before its start
    InvertedRange(TextRange),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NoCursor => write!(f, "surface has no cursor"),
            SurfaceError::UnknownNode(node) => write!(f, "unknown text node {}", node),
            SurfaceError::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {} out of bounds (node length {})", offset, len)
            }
            SurfaceError::InvertedRange(range) => write!(f, "inverted range {}", range),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Editable rich-text surface consumed by the typeahead engine
pub trait EditableSurface {
    // === Reading ===

    /// Up to `max_lookback` characters before the cursor, never crossing into
    /// the previous node
    fn text_before_cursor(&self, max_lookback: usize) -> Result<TextWindow, SurfaceError>;

    /// Current (collapsed) cursor position
    fn cursor(&self) -> Result<TextOffset, SurfaceError>;

    /// Screen rectangle of the cursor
    fn cursor_rect(&self) -> Result<Rect, SurfaceError> {
        let cursor = self.cursor()?;
        self.offset_rect(cursor)
    }

    /// Screen rectangle of a caret placed at `offset`
    fn offset_rect(&self, offset: TextOffset) -> Result<Rect, SurfaceError>;

    /// Text covered by a range
    fn text_in_range(&self, range: TextRange) -> Result<String, SurfaceError>;

    /// Document order of two offsets, which may live in different nodes
    fn compare(&self, a: TextOffset, b: TextOffset) -> Result<Ordering, SurfaceError>;

    /// Monotonic revision, bumped once per emitted change notification
    fn revision(&self) -> u64;

    // === Writing ===

    /// Replace a range with `text`, returning the offset right after the
    /// inserted text. The cursor is left at that offset.
    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<TextOffset, SurfaceError>;

    /// Move the cursor
    fn set_cursor(&mut self, at: TextOffset) -> Result<(), SurfaceError>;

    /// Remove all content
    fn clear(&mut self);

    /// Start batching changes; nested calls are allowed
    fn begin_transaction(&mut self);

    /// Finish a batch. The outermost call emits at most one notification.
    fn end_transaction(&mut self);

    /// Run `f` inside a transaction so its edits produce a single notification
    fn transact<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.begin_transaction();
        let result = f(self);
        self.end_transaction();
        result
    }

    // === Notifications ===

    fn subscribe(&mut self) -> SubscriptionId;

    /// Returns false if the subscription was not active
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Take all notifications queued for a subscription since the last drain
    fn drain_changes(&mut self, id: SubscriptionId) -> Vec<ChangeEvent>;

    // === Key handling ===

    /// Register a handler that sees `keystroke` before default editing
    fn register_key_handler(&mut self, keystroke: Keystroke, priority: Priority) -> HandlerId;

    fn unregister_key_handler(&mut self, id: HandlerId) -> bool;

    /// Handlers for a keystroke, highest priority first
    fn key_handlers(&self, keystroke: &Keystroke) -> Vec<HandlerId>;

    /// The surface's own default behavior for a key nobody claimed.
    /// Returns true if the key did something.
    fn handle_default_key(&mut self, keystroke: &Keystroke) -> bool;
}
