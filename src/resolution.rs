//! Match resolution: turns the surface's current state into `NoMatch` or an
//! active match, and tracks session boundaries between evaluations.
//!
//! Every evaluation starts from scratch. The only state carried between
//! evaluations is the previous result (to classify the transition) and an
//! optional suppression marker set after a cancel or commit.

use crate::candidates::SessionId;
use crate::editable::{EditableSurface, SurfaceError, TextOffset, TextRange};
use crate::overlay::Rect;
use crate::trigger::{match_trigger, required_lookback, TriggerSpec};

/// A resolved, active match
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMatch {
    pub session: SessionId,
    /// Index of the trigger spec that matched
    pub spec_index: usize,
    pub trigger: char,
    /// Query text between the trigger and the cursor
    pub leading_text: String,
    /// Trigger plus query
    pub replaceable_text: String,
    /// From the trigger to the cursor at computation time
    pub replaceable_range: TextRange,
    /// Screen rectangle spanning the replaceable text
    pub anchor_rect: Rect,
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MatchResult {
    #[default]
    NoMatch,
    Active(ActiveMatch),
}

impl MatchResult {
    pub fn active(&self) -> Option<&ActiveMatch> {
        match self {
            MatchResult::Active(active) => Some(active),
            MatchResult::NoMatch => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, MatchResult::Active(_))
    }
}

/// How an evaluation changed the resolution state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Still no match
    Idle,
    /// `NoMatch → ActiveMatch`
    Triggered,
    /// Same session recomputed
    Updated { query_changed: bool },
    /// A different trigger occurrence replaced the previous session
    Restarted { previous: SessionId },
    /// `ActiveMatch → NoMatch`
    Untriggered { previous: SessionId },
}

/// A trigger occurrence located on the surface, before a session is assigned
#[derive(Debug, Clone, PartialEq)]
struct Located {
    spec_index: usize,
    trigger: char,
    leading_text: String,
    replaceable_text: String,
    range: TextRange,
    anchor_rect: Rect,
}

/// Match state for one surface
#[derive(Debug, Clone, Default)]
pub struct MatchResolution {
    current: MatchResult,
    last_session: u64,
    /// Extra lookback requested by configuration
    lookback: usize,
    /// (revision, cursor) at which re-triggering is suppressed
    suppressed: Option<(u64, TextOffset)>,
}

impl MatchResolution {
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            ..Self::default()
        }
    }

    pub fn current(&self) -> &MatchResult {
        &self.current
    }

    pub fn active(&self) -> Option<&ActiveMatch> {
        self.current.active()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_active()
    }

    /// Window size used when reading text before the cursor
    pub fn lookback_for(&self, specs: &[TriggerSpec]) -> usize {
        self.lookback.max(required_lookback(specs))
    }

    /// Recompute the match for the surface's current state
    pub fn evaluate<S: EditableSurface + ?Sized>(
        &mut self,
        surface: &S,
        specs: &[TriggerSpec],
    ) -> Transition {
        if self.is_suppressed(surface) {
            tracing::debug!("re-trigger suppressed at revision {}", surface.revision());
            return Transition::Idle;
        }

        let located = match self.locate(surface, specs) {
            Ok(located) => located,
            Err(err) => {
                tracing::debug!("match computation failed, treating as no match: {}", err);
                None
            }
        };

        let previous = self.current.active().cloned();
        match (previous, located) {
            (None, None) => Transition::Idle,
            (None, Some(found)) => {
                self.current = MatchResult::Active(self.start_session(found));
                Transition::Triggered
            }
            (Some(prev), None) => {
                self.current = MatchResult::NoMatch;
                Transition::Untriggered {
                    previous: prev.session,
                }
            }
            (Some(prev), Some(found)) => {
                let same_occurrence = prev.spec_index == found.spec_index
                    && prev.replaceable_range.start == found.range.start;
                if same_occurrence {
                    let query_changed = prev.leading_text != found.leading_text;
                    self.current = MatchResult::Active(ActiveMatch {
                        session: prev.session,
                        spec_index: found.spec_index,
                        trigger: found.trigger,
                        leading_text: found.leading_text,
                        replaceable_text: found.replaceable_text,
                        replaceable_range: found.range,
                        anchor_rect: found.anchor_rect,
                    });
                    Transition::Updated { query_changed }
                } else {
                    self.current = MatchResult::Active(self.start_session(found));
                    Transition::Restarted {
                        previous: prev.session,
                    }
                }
            }
        }
    }

    /// Force `NoMatch`. Returns the session that ended, if any.
    ///
    /// With `suppress_at`, evaluations at that exact (revision, cursor) report
    /// no match so a cancelled trigger does not immediately reopen.
    pub fn end_session(&mut self, suppress_at: Option<(u64, TextOffset)>) -> Option<SessionId> {
        self.suppressed = suppress_at;
        match std::mem::take(&mut self.current) {
            MatchResult::Active(active) => Some(active.session),
            MatchResult::NoMatch => None,
        }
    }

    fn is_suppressed<S: EditableSurface + ?Sized>(&mut self, surface: &S) -> bool {
        let Some((revision, cursor)) = self.suppressed else {
            return false;
        };
        let still_there =
            surface.revision() == revision && surface.cursor().map_or(false, |c| c == cursor);
        if !still_there {
            self.suppressed = None;
        }
        still_there
    }

    fn start_session(&mut self, found: Located) -> ActiveMatch {
        self.last_session += 1;
        ActiveMatch {
            session: SessionId(self.last_session),
            spec_index: found.spec_index,
            trigger: found.trigger,
            leading_text: found.leading_text,
            replaceable_text: found.replaceable_text,
            replaceable_range: found.range,
            anchor_rect: found.anchor_rect,
        }
    }

    fn locate<S: EditableSurface + ?Sized>(
        &self,
        surface: &S,
        specs: &[TriggerSpec],
    ) -> Result<Option<Located>, SurfaceError> {
        if specs.is_empty() {
            return Ok(None);
        }

        let window = surface.text_before_cursor(self.lookback_for(specs))?;
        let Some(found) = match_trigger(&window.text, specs) else {
            tracing::trace!("no trigger in {:?}", window.text);
            return Ok(None);
        };

        let start = window.offset_at(found.trigger_index);
        let end = window.end();
        let start_rect = surface.offset_rect(start)?;
        let end_rect = surface.cursor_rect()?;

        Ok(Some(Located {
            spec_index: found.spec_index,
            trigger: found.trigger,
            leading_text: found.leading_text,
            replaceable_text: found.replaceable_text,
            range: TextRange::new(start, end),
            anchor_rect: Rect::new(
                start_rect.x,
                start_rect.y,
                (end_rect.x - start_rect.x).max(0.0),
                start_rect.height,
            ),
        }))
    }
}
