//! Integrator callbacks
//!
//! Every method has a no-op default, so an integrator only implements what it
//! cares about. `()` is the "no hooks" implementation.

use crate::candidates::CandidateItem;
use crate::resolution::ActiveMatch;

/// What `on_enter` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnterOutcome {
    /// Continue with the normal text commit
    #[default]
    Commit,
    /// The integrator took care of it; do not touch the text
    Handled,
}

/// Callbacks fired by the typeahead engine
pub trait TypeaheadHooks {
    /// A new match session started
    fn on_trigger(&mut self, _active: &ActiveMatch) {}

    /// The match was recomputed while active
    fn on_match_change(&mut self, _active: &ActiveMatch) {}

    /// The session ended
    fn on_untrigger(&mut self) {}

    /// The leading text changed; `None` when the match went away
    fn on_query_change(&mut self, _query: Option<&str>) {}

    /// An item was chosen for commit
    fn on_select(&mut self, _item: &CandidateItem) {}

    /// Enter was pressed. `query` is the leading text while a match is active and
    /// `None` when Enter is intercepted on an idle surface.
    fn on_enter(&mut self, _query: Option<&str>) -> EnterOutcome {
        EnterOutcome::Commit
    }
}

impl TypeaheadHooks for () {}

impl<H: TypeaheadHooks + ?Sized> TypeaheadHooks for Box<H> {
    fn on_trigger(&mut self, active: &ActiveMatch) {
        (**self).on_trigger(active)
    }

    fn on_match_change(&mut self, active: &ActiveMatch) {
        (**self).on_match_change(active)
    }

    fn on_untrigger(&mut self) {
        (**self).on_untrigger()
    }

    fn on_query_change(&mut self, query: Option<&str>) {
        (**self).on_query_change(query)
    }

    fn on_select(&mut self, item: &CandidateItem) {
        (**self).on_select(item)
    }

    fn on_enter(&mut self, query: Option<&str>) -> EnterOutcome {
        (**self).on_enter(query)
    }
}
