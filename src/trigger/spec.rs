//! Trigger definitions

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::boundary::{BoundaryCheck, RegexBoundary};
use crate::util::is_punctuation;

/// Longest query length a config may ask for. Every edit reads this many
/// characters back from the cursor.
pub const MAX_QUERY_LENGTH: usize = 4096;

/// One trigger definition.
///
/// `trigger` is a set of characters, any of which opens a match. The text
/// between the trigger and the cursor is the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSpec {
    /// Characters that open a match (e.g. "/" or "@#")
    pub trigger: String,
    pub min_length: usize,
    pub max_length: usize,
    /// Trigger must follow whitespace, '(' or a line start
    pub require_leading_boundary: bool,
    /// Query may contain whitespace
    pub allow_whitespace: bool,
    /// Additional characters that end a query
    pub forbidden: String,
    /// Treat punctuation as ending a query
    pub forbid_punctuation: bool,
    /// Regex re-check applied to the text before the cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_pattern: Option<String>,
    #[serde(skip)]
    pub boundary: Option<Arc<dyn BoundaryCheck>>,
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self {
            trigger: "/".to_string(),
            min_length: 1,
            max_length: 75,
            require_leading_boundary: true,
            allow_whitespace: false,
            forbidden: String::new(),
            forbid_punctuation: false,
            boundary_pattern: None,
            boundary: None,
        }
    }
}

impl TriggerSpec {
    /// Spec with default bounds for the given trigger characters
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_leading_boundary(mut self, required: bool) -> Self {
        self.require_leading_boundary = required;
        self
    }

    pub fn with_whitespace(mut self, allowed: bool) -> Self {
        self.allow_whitespace = allowed;
        self
    }

    pub fn with_forbidden(mut self, chars: impl Into<String>) -> Self {
        self.forbidden = chars.into();
        self
    }

    pub fn with_punctuation_forbidden(mut self) -> Self {
        self.forbid_punctuation = true;
        self
    }

    /// Attach a secondary boundary predicate
    pub fn with_boundary(mut self, check: impl BoundaryCheck + 'static) -> Self {
        self.boundary = Some(Arc::new(check));
        self
    }

    /// Compile `boundary_pattern` into a required-match [`RegexBoundary`].
    /// A spec without a pattern is left untouched.
    pub fn compile_boundary(&mut self) -> Result<(), regex::Error> {
        if let Some(pattern) = &self.boundary_pattern {
            self.boundary = Some(Arc::new(RegexBoundary::require(pattern)?));
        }
        Ok(())
    }

    #[inline]
    pub fn is_trigger(&self, ch: char) -> bool {
        self.trigger.contains(ch)
    }

    /// Whether `ch` ends a query for this spec
    pub fn is_prohibited(&self, ch: char) -> bool {
        ch == '\n'
            || (!self.allow_whitespace && ch.is_whitespace())
            || self.forbidden.contains(ch)
            || (self.forbid_punctuation && is_punctuation(ch))
    }
}
