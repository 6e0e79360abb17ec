//! Reference editable surface: a list of paragraph nodes with one caret.
//!
//! Each paragraph is a [`ropey::Rope`] with a stable [`NodeId`]; inserting a
//! newline splits the paragraph into two nodes. Screen geometry comes from fixed
//! character metrics, which is enough to anchor a menu in tests and the replay
//! tool.

use std::cmp::Ordering;
use std::collections::HashMap;

use ropey::Rope;

use super::messages::{MoveTarget, TextEditMsg};
use super::offset::{NodeId, TextOffset};
use super::range::TextRange;
use super::surface::{
    ChangeEvent, ChangeKind, EditableSurface, SubscriptionId, SurfaceError, TextWindow,
};
use crate::keymap::{HandlerId, KeyRegistry, Keystroke, Priority};
use crate::overlay::Rect;

/// Fixed-width character metrics used to compute screen rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharMetrics {
    pub char_width: f32,
    pub line_height: f32,
    /// Top-left corner of the first line
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 18.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: NodeId,
    text: Rope,
}

/// In-memory editable surface
#[derive(Debug, Clone)]
pub struct InlineSurface {
    nodes: Vec<Node>,
    next_node: u64,
    cursor: TextOffset,
    revision: u64,
    metrics: CharMetrics,
    keys: KeyRegistry,
    subscribers: HashMap<SubscriptionId, Vec<ChangeEvent>>,
    next_subscription: u64,
    /// Nesting depth of open transactions
    tx_depth: usize,
    /// Change accumulated while a transaction is open
    pending: Option<ChangeKind>,
}

impl Default for InlineSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineSurface {
    /// Create an empty surface with a single empty paragraph
    pub fn new() -> Self {
        let first = NodeId::new(1);
        Self {
            nodes: vec![Node {
                id: first,
                text: Rope::new(),
            }],
            next_node: 2,
            cursor: TextOffset::new(first, 0),
            revision: 0,
            metrics: CharMetrics::default(),
            keys: KeyRegistry::new(),
            subscribers: HashMap::new(),
            next_subscription: 0,
            tx_depth: 0,
            pending: None,
        }
    }

    /// Create a surface holding `text`, with the cursor at the end
    pub fn from_text(text: &str) -> Self {
        let mut surface = Self::new();
        surface.insert_at_cursor(text);
        surface.revision = 0;
        surface.pending = None;
        surface
    }

    /// Set the character metrics (builder pattern)
    pub fn with_metrics(mut self, metrics: CharMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Full text, paragraphs joined with '\n'
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.text.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of paragraph nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Cursor position as (paragraph index, character offset)
    pub fn cursor_position(&self) -> (usize, usize) {
        let line = self.node_index(self.cursor.node()).unwrap_or(0);
        (line, self.cursor.offset())
    }

    /// Node id of the paragraph at `index`
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).map(|n| n.id)
    }

    /// Number of live key handler registrations
    pub fn key_handler_count(&self) -> usize {
        self.keys.len()
    }

    /// Apply an editing message at the cursor. Returns true if anything changed.
    pub fn apply(&mut self, msg: TextEditMsg) -> bool {
        match msg {
            TextEditMsg::InsertChar(ch) => {
                let mut buf = [0u8; 4];
                self.insert_at_cursor(ch.encode_utf8(&mut buf))
            }
            TextEditMsg::InsertText(text) => self.insert_at_cursor(&text),
            TextEditMsg::InsertNewline => self.insert_at_cursor("\n"),
            TextEditMsg::DeleteBackward => self.delete_backward(),
            TextEditMsg::DeleteForward => self.delete_forward(),
            TextEditMsg::Move(target) => self.move_cursor(target),
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn node_index(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == node)
    }

    fn node(&self, node: NodeId) -> Result<(usize, &Node), SurfaceError> {
        self.node_index(node)
            .map(|idx| (idx, &self.nodes[idx]))
            .ok_or(SurfaceError::UnknownNode(node))
    }

    /// Resolve an offset to (node index, char offset), checking bounds
    fn locate(&self, offset: TextOffset) -> Result<(usize, usize), SurfaceError> {
        let (idx, node) = self.node(offset.node())?;
        let len = node.text.len_chars();
        if offset.offset() > len {
            return Err(SurfaceError::OffsetOutOfBounds { offset, len });
        }
        Ok((idx, offset.offset()))
    }

    fn alloc_node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        id
    }

    /// Record a change, emitting it now unless a transaction is open
    fn mark_changed(&mut self, kind: ChangeKind) {
        self.pending = Some(match (self.pending, kind) {
            (Some(ChangeKind::Content), _) | (_, ChangeKind::Content) => ChangeKind::Content,
            _ => ChangeKind::Selection,
        });
        if self.tx_depth == 0 {
            self.flush_pending();
        }
    }

    fn flush_pending(&mut self) {
        if let Some(kind) = self.pending.take() {
            self.revision += 1;
            let event = ChangeEvent {
                kind,
                revision: self.revision,
            };
            for queue in self.subscribers.values_mut() {
                queue.push(event);
            }
        }
    }

    /// Insert text at an offset, splitting nodes on '\n'.
    /// Returns the offset right after the inserted text.
    fn insert_at(&mut self, at: TextOffset, text: &str) -> Result<TextOffset, SurfaceError> {
        let (mut idx, mut offset) = self.locate(at)?;
        let mut segments = text.split('\n');

        if let Some(first) = segments.next() {
            self.nodes[idx].text.insert(offset, first);
            offset += first.chars().count();
        }

        for segment in segments {
            let tail = self.nodes[idx].text.split_off(offset);
            let id = self.alloc_node();
            self.nodes.insert(idx + 1, Node { id, text: tail });
            idx += 1;
            self.nodes[idx].text.insert(0, segment);
            offset = segment.chars().count();
        }

        Ok(TextOffset::new(self.nodes[idx].id, offset))
    }

    /// Remove a validated range, merging nodes it spans. Returns the start offset.
    fn remove_range(&mut self, range: TextRange) -> Result<TextOffset, SurfaceError> {
        let (start_idx, start_off) = self.locate(range.start)?;
        let (end_idx, end_off) = self.locate(range.end)?;

        match start_idx.cmp(&end_idx) {
            Ordering::Greater => return Err(SurfaceError::InvertedRange(range)),
            Ordering::Equal if start_off > end_off => {
                return Err(SurfaceError::InvertedRange(range))
            }
            Ordering::Equal => {
                self.nodes[start_idx].text.remove(start_off..end_off);
            }
            Ordering::Less => {
                let tail = self.nodes[end_idx].text.slice(end_off..).to_string();
                let start_len = self.nodes[start_idx].text.len_chars();
                self.nodes[start_idx].text.remove(start_off..start_len);
                self.nodes[start_idx].text.insert(start_off, &tail);
                self.nodes.drain(start_idx + 1..=end_idx);
            }
        }

        Ok(range.start)
    }

    fn insert_at_cursor(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match self.insert_at(self.cursor, text) {
            Ok(end) => {
                self.cursor = end;
                self.mark_changed(ChangeKind::Content);
                true
            }
            Err(err) => {
                tracing::warn!("insert at invalid cursor {}: {}", self.cursor, err);
                false
            }
        }
    }

    fn delete_backward(&mut self) -> bool {
        let Ok((idx, offset)) = self.locate(self.cursor) else {
            return false;
        };
        let range = if offset > 0 {
            TextRange::new(self.cursor.shifted(-1).unwrap_or(self.cursor), self.cursor)
        } else if idx > 0 {
            let prev = &self.nodes[idx - 1];
            TextRange::new(
                TextOffset::new(prev.id, prev.text.len_chars()),
                self.cursor,
            )
        } else {
            return false;
        };
        match self.remove_range(range) {
            Ok(start) => {
                self.cursor = start;
                self.mark_changed(ChangeKind::Content);
                true
            }
            Err(_) => false,
        }
    }

    fn delete_forward(&mut self) -> bool {
        let Ok((idx, offset)) = self.locate(self.cursor) else {
            return false;
        };
        let len = self.nodes[idx].text.len_chars();
        let range = if offset < len {
            TextRange::new(self.cursor, TextOffset::new(self.cursor.node(), offset + 1))
        } else if idx + 1 < self.nodes.len() {
            TextRange::new(self.cursor, TextOffset::new(self.nodes[idx + 1].id, 0))
        } else {
            return false;
        };
        match self.remove_range(range) {
            Ok(_) => {
                self.mark_changed(ChangeKind::Content);
                true
            }
            Err(_) => false,
        }
    }

    fn move_cursor(&mut self, target: MoveTarget) -> bool {
        let Ok((idx, offset)) = self.locate(self.cursor) else {
            return false;
        };
        let len = self.nodes[idx].text.len_chars();
        let last = self.nodes.len() - 1;

        let (new_idx, new_off) = match target {
            MoveTarget::Left if offset > 0 => (idx, offset - 1),
            MoveTarget::Left if idx > 0 => (idx - 1, self.nodes[idx - 1].text.len_chars()),
            MoveTarget::Right if offset < len => (idx, offset + 1),
            MoveTarget::Right if idx < last => (idx + 1, 0),
            MoveTarget::Up if idx > 0 => (idx - 1, offset.min(self.nodes[idx - 1].text.len_chars())),
            MoveTarget::Down if idx < last => (idx + 1, offset.min(self.nodes[idx + 1].text.len_chars())),
            MoveTarget::LineStart => (idx, 0),
            MoveTarget::LineEnd => (idx, len),
            MoveTarget::DocumentStart => (0, 0),
            MoveTarget::DocumentEnd => (last, self.nodes[last].text.len_chars()),
            _ => (idx, offset),
        };

        let moved = TextOffset::new(self.nodes[new_idx].id, new_off);
        if moved == self.cursor {
            return false;
        }
        self.cursor = moved;
        self.mark_changed(ChangeKind::Selection);
        true
    }
}

impl EditableSurface for InlineSurface {
    fn text_before_cursor(&self, max_lookback: usize) -> Result<TextWindow, SurfaceError> {
        let (idx, offset) = self.locate(self.cursor)?;
        let start = offset.saturating_sub(max_lookback);
        let text = self.nodes[idx].text.slice(start..offset).to_string();
        Ok(TextWindow {
            start: TextOffset::new(self.cursor.node(), start),
            text,
            at_node_start: start == 0,
        })
    }

    fn cursor(&self) -> Result<TextOffset, SurfaceError> {
        Ok(self.cursor)
    }

    fn offset_rect(&self, offset: TextOffset) -> Result<Rect, SurfaceError> {
        let (idx, off) = self.locate(offset)?;
        let m = &self.metrics;
        Ok(Rect::new(
            m.origin_x + off as f32 * m.char_width,
            m.origin_y + idx as f32 * m.line_height,
            1.0,
            m.line_height,
        ))
    }

    fn text_in_range(&self, range: TextRange) -> Result<String, SurfaceError> {
        let (start_idx, start_off) = self.locate(range.start)?;
        let (end_idx, end_off) = self.locate(range.end)?;

        if (start_idx, start_off) > (end_idx, end_off) {
            return Err(SurfaceError::InvertedRange(range));
        }
        if start_idx == end_idx {
            return Ok(self.nodes[start_idx]
                .text
                .slice(start_off..end_off)
                .to_string());
        }

        let mut out = self.nodes[start_idx].text.slice(start_off..).to_string();
        for node in &self.nodes[start_idx + 1..end_idx] {
            out.push('\n');
            out.push_str(&node.text.to_string());
        }
        out.push('\n');
        out.push_str(&self.nodes[end_idx].text.slice(..end_off).to_string());
        Ok(out)
    }

    fn compare(&self, a: TextOffset, b: TextOffset) -> Result<Ordering, SurfaceError> {
        let a = self.locate(a)?;
        let b = self.locate(b)?;
        Ok(a.cmp(&b))
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<TextOffset, SurfaceError> {
        // Validate both endpoints before touching anything
        self.locate(range.start)?;
        self.locate(range.end)?;

        let start = self.remove_range(range)?;
        let end = self.insert_at(start, text)?;
        self.cursor = end;
        self.mark_changed(ChangeKind::Content);
        Ok(end)
    }

    fn set_cursor(&mut self, at: TextOffset) -> Result<(), SurfaceError> {
        self.locate(at)?;
        if at != self.cursor {
            self.cursor = at;
            self.mark_changed(ChangeKind::Selection);
        }
        Ok(())
    }

    fn clear(&mut self) {
        let id = self.alloc_node();
        self.nodes = vec![Node {
            id,
            text: Rope::new(),
        }];
        self.cursor = TextOffset::new(id, 0);
        self.mark_changed(ChangeKind::Content);
    }

    fn begin_transaction(&mut self) {
        self.tx_depth += 1;
    }

    fn end_transaction(&mut self) {
        self.tx_depth = self.tx_depth.saturating_sub(1);
        if self.tx_depth == 0 {
            self.flush_pending();
        }
    }

    fn subscribe(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.insert(id, Vec::new());
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    fn drain_changes(&mut self, id: SubscriptionId) -> Vec<ChangeEvent> {
        self.subscribers
            .get_mut(&id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn register_key_handler(&mut self, keystroke: Keystroke, priority: Priority) -> HandlerId {
        self.keys.register(keystroke, priority)
    }

    fn unregister_key_handler(&mut self, id: HandlerId) -> bool {
        self.keys.unregister(id)
    }

    fn key_handlers(&self, keystroke: &Keystroke) -> Vec<HandlerId> {
        self.keys.handlers_for(keystroke)
    }

    fn handle_default_key(&mut self, keystroke: &Keystroke) -> bool {
        match TextEditMsg::from_keystroke(keystroke) {
            Some(msg) => self.apply(msg),
            None => false,
        }
    }
}
