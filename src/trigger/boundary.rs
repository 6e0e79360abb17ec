//! Pluggable secondary validation of a trigger candidate.
//!
//! After the scanner has found a trigger occurrence that passes the length and
//! character rules, a spec may re-check the candidate with an extra predicate.
//! Integrations that need a stricter boundary policy (for example "the trigger
//! must follow a sentence start") plug one in here.

use std::fmt;

use regex::Regex;

/// What a boundary check gets to look at
#[derive(Debug, Clone, Copy)]
pub struct BoundaryContext<'a> {
    /// Window of text before the cursor the scan ran over
    pub text: &'a str,
    /// Character index of the trigger within `text`
    pub trigger_index: usize,
    pub trigger: char,
    /// Candidate text between the trigger and the cursor
    pub query: &'a str,
}

/// Secondary predicate re-validating a trigger candidate
pub trait BoundaryCheck: fmt::Debug + Send + Sync {
    fn accepts(&self, ctx: &BoundaryContext<'_>) -> bool;
}

/// Whether a regex match accepts or rejects a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexMode {
    Require,
    Reject,
}

/// Regex-backed boundary check.
///
/// The pattern is tested against the window text from the start of the line
/// fragment up to the cursor, so anchoring with `$` targets the cursor end.
#[derive(Debug, Clone)]
pub struct RegexBoundary {
    regex: Regex,
    mode: RegexMode,
}

impl RegexBoundary {
    /// Accept only candidates whose window matches `pattern`
    pub fn require(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            mode: RegexMode::Require,
        })
    }

    /// Reject candidates whose window matches `pattern`
    pub fn reject(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            mode: RegexMode::Reject,
        })
    }

    pub fn mode(&self) -> RegexMode {
        self.mode
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl BoundaryCheck for RegexBoundary {
    fn accepts(&self, ctx: &BoundaryContext<'_>) -> bool {
        let hit = self.regex.is_match(ctx.text);
        match self.mode {
            RegexMode::Require => hit,
            RegexMode::Reject => !hit,
        }
    }
}
