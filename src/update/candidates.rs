//! Candidate responses, with stale-response discard

use crate::candidates::{CandidateItem, CandidateRequest};
use crate::commands::Cmd;
use crate::model::Typeahead;

/// Apply items for a request, unless the request no longer matches the active
/// query. Responses are ordered by the query they were issued for, not by
/// arrival.
pub fn update_candidates(
    model: &mut Typeahead,
    request: CandidateRequest,
    items: Vec<CandidateItem>,
) -> Option<Cmd> {
    let Some(active) = model.resolution.active() else {
        tracing::debug!(
            "Discarding candidates for {:?}: no active match",
            request.query
        );
        return None;
    };

    if request.session != active.session {
        tracing::debug!(
            "Discarding stale candidates: session {} ended (active session {})",
            request.session.0,
            active.session.0
        );
        return None;
    }

    if request.query != active.leading_text {
        tracing::debug!(
            "Discarding stale candidates: query {:?} != active query {:?}",
            request.query,
            active.leading_text
        );
        return None;
    }

    model.menu.set_items(items, false);
    Some(Cmd::Redraw)
}
