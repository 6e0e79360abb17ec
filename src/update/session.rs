//! Session lifecycle: reacting to surface changes and ending matches

use crate::candidates::SessionId;
use crate::commands::Cmd;
use crate::editable::EditableSurface;
use crate::model::Typeahead;
use crate::resolution::Transition;

/// Re-resolve the match after a surface change
pub fn update_surface<S: EditableSurface>(model: &mut Typeahead, surface: &mut S) -> Option<Cmd> {
    let transition = model.resolution.evaluate(surface, &model.specs);
    apply_transition(model, surface, transition)
}

/// Fire hooks and wire up the menu for a resolution transition
pub(super) fn apply_transition<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    transition: Transition,
) -> Option<Cmd> {
    match transition {
        Transition::Idle => None,
        Transition::Triggered => begin_session(model, surface),
        Transition::Updated { query_changed } => {
            let active = model.resolution.active()?.clone();
            model.hooks.on_match_change(&active);
            if !query_changed {
                // The anchor may have moved
                return Some(Cmd::Redraw);
            }
            model.hooks.on_query_change(Some(&active.leading_text));
            let fetch = model.request_candidates(&active);
            Some(Cmd::batch(vec![fetch, Cmd::Redraw]))
        }
        Transition::Restarted { previous } => {
            tracing::debug!("new trigger occurrence supersedes session {}", previous.0);
            finish_session(model, surface, previous);
            begin_session(model, surface)
        }
        Transition::Untriggered { previous } => {
            finish_session(model, surface, previous);
            Some(Cmd::Redraw)
        }
    }
}

/// Force `NoMatch`. With `suppress`, the current text does not re-trigger until
/// the surface changes again.
pub(super) fn end_session<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    suppress: bool,
) -> Option<Cmd> {
    let marker = if suppress {
        surface.cursor().ok().map(|cursor| (surface.revision(), cursor))
    } else {
        None
    };
    let session = model.resolution.end_session(marker)?;
    finish_session(model, surface, session);
    Some(Cmd::Redraw)
}

fn begin_session<S: EditableSurface>(model: &mut Typeahead, surface: &mut S) -> Option<Cmd> {
    let active = model.resolution.active()?.clone();
    tracing::debug!(
        "session {} triggered by {:?} (query {:?})",
        active.session.0,
        active.trigger,
        active.leading_text
    );

    model.menu.reset();
    model.arbiter.install(surface);
    model.hooks.on_trigger(&active);
    model.hooks.on_query_change(Some(&active.leading_text));

    let fetch = model.request_candidates(&active);
    Some(Cmd::batch(vec![fetch, Cmd::Redraw]))
}

fn finish_session<S: EditableSurface>(model: &mut Typeahead, surface: &mut S, session: SessionId) {
    tracing::debug!("session {} ended", session.0);
    model.arbiter.uninstall(surface);
    model.menu.reset();
    model.hooks.on_query_change(None);
    model.hooks.on_untrigger();
}
