//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod candidates;
mod menu;
mod session;

use crate::commands::Cmd;
use crate::editable::EditableSurface;
use crate::messages::TypeaheadMsg;
use crate::model::Typeahead;

#[cfg(debug_assertions)]
use crate::tracing::MatchSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use candidates::update_candidates;
pub use menu::{update_menu, update_pointer, update_submit};
pub use session::update_surface;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    msg: TypeaheadMsg,
) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, surface, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, surface, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    msg: TypeaheadMsg,
) -> Option<Cmd> {
    match msg {
        TypeaheadMsg::SurfaceChanged => session::update_surface(model, surface),
        TypeaheadMsg::Key(action) => menu::update_menu(model, surface, action),
        TypeaheadMsg::Submit => menu::update_submit(model, surface),
        TypeaheadMsg::CandidatesLoaded { request, items } => {
            candidates::update_candidates(model, request, items)
        }
        TypeaheadMsg::PointerHover(index) => menu::update_pointer(model, surface, index, false),
        TypeaheadMsg::PointerSelect(index) => menu::update_pointer(model, surface, index, true),
        TypeaheadMsg::Dismiss => session::end_session(model, surface, true),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after match state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    msg: TypeaheadMsg,
) -> Option<Cmd> {
    let msg_name = msg.name();
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = MatchSnapshot::from_typeahead(model);
    tracing::trace!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, surface, msg);

    let after = MatchSnapshot::from_typeahead(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "typeahead", %diff, "state changed");
    }

    result
}
