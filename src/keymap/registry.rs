//! Priority-ordered key handler registry
//!
//! The editable surface owns one registry. Anything that wants to see a key
//! before the surface's own default editing behavior registers a handler here.
//! Handlers are consulted from highest to lowest priority; the surface's default
//! handling only runs when every handler for the key passed it through.

use std::collections::HashMap;

use super::types::Keystroke;

/// Handler priority. Every registered priority runs before default editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

/// Opaque handle returned by [`KeyRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

#[derive(Debug, Clone, Copy)]
struct Registration {
    id: HandlerId,
    priority: Priority,
}

/// Key handler registry
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    /// Registrations per keystroke, kept sorted: highest priority first, newest
    /// first within a priority
    by_key: HashMap<Keystroke, Vec<Registration>>,
    next_id: u64,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a keystroke
    pub fn register(&mut self, keystroke: Keystroke, priority: Priority) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        let list = self.by_key.entry(keystroke).or_default();
        // Insert before the first registration with lower or equal priority so that
        // the newest handler wins ties
        let pos = list
            .iter()
            .position(|r| r.priority <= priority)
            .unwrap_or(list.len());
        list.insert(pos, Registration { id, priority });
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let mut removed = false;
        self.by_key.retain(|_, list| {
            let before = list.len();
            list.retain(|r| r.id != id);
            removed |= list.len() != before;
            !list.is_empty()
        });
        removed
    }

    /// Handlers for a keystroke in the order they must be consulted
    pub fn handlers_for(&self, keystroke: &Keystroke) -> Vec<HandlerId> {
        self.by_key
            .get(keystroke)
            .map(|list| list.iter().map(|r| r.id).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.by_key
            .values()
            .any(|list| list.iter().any(|r| r.id == id))
    }

    /// Total number of live registrations
    pub fn len(&self) -> usize {
        self.by_key.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
