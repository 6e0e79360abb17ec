//! Trigger detection
//!
//! - [`TriggerSpec`]: which characters open a match and what the query may contain
//! - [`match_trigger`]: pure backward scan of the text before the cursor
//! - [`BoundaryCheck`] / [`RegexBoundary`]: optional secondary validation

mod boundary;
mod matcher;
mod spec;

pub use boundary::{BoundaryCheck, BoundaryContext, RegexBoundary, RegexMode};
pub use matcher::{match_trigger, TriggerMatch};
pub use spec::{TriggerSpec, MAX_QUERY_LENGTH};

/// Characters of lookback the resolver needs so every spec's scan is bounded
/// by `max_length` rather than by the window edge
pub fn required_lookback(specs: &[TriggerSpec]) -> usize {
    specs
        .iter()
        .map(|s| s.max_length)
        .max()
        .unwrap_or(0)
        .saturating_add(2)
}
