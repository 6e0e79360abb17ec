//! Opaque, node-relative text positions.
//!
//! The surface is a tree of text nodes, not a flat string, so a position is a
//! node handle plus a character offset inside that node. Two offsets in the same
//! node compare directly; ordering across nodes is only known to the surface
//! (see [`EditableSurface::compare`](super::EditableSurface::compare)).

use std::cmp::Ordering;
use std::fmt;

/// Stable identifier of a text node within one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position inside the surface: node plus character offset within that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextOffset {
    node: NodeId,
    offset: usize,
}

impl TextOffset {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Character offset within the node
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// True if both offsets live in the same node
    pub fn same_node(&self, other: &TextOffset) -> bool {
        self.node == other.node
    }

    /// Offset moved by `delta` characters within the same node.
    ///
    /// Returns None when moving backward past the node start.
    pub fn shifted(&self, delta: isize) -> Option<TextOffset> {
        let offset = self.offset.checked_add_signed(delta)?;
        Some(TextOffset::new(self.node, offset))
    }
}

impl PartialOrd for TextOffset {
    /// Offsets are only ordered within a node
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.node == other.node {
            Some(self.offset.cmp(&other.offset))
        } else {
            None
        }
    }
}

impl fmt::Display for TextOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.offset)
    }
}
