//! Menu navigation, pointer input and committing the highlighted item

use crate::commands::Cmd;
use crate::editable::EditableSurface;
use crate::hooks::EnterOutcome;
use crate::keymap::{CommitKey, MenuAction};
use crate::model::Typeahead;

use super::session::{end_session, update_surface};

/// Handle a claimed menu key
pub fn update_menu<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    action: MenuAction,
) -> Option<Cmd> {
    if !model.is_active() {
        return None;
    }

    match action {
        MenuAction::MoveNext => model.menu.move_next().then_some(Cmd::Redraw),
        MenuAction::MovePrevious => model.menu.move_previous().then_some(Cmd::Redraw),
        MenuAction::Commit(key) => commit(model, surface, key),
        MenuAction::Cancel => end_session(model, surface, true),
    }
}

/// Enter on a surface where the idle intercept claimed it
pub fn update_submit<S: EditableSurface>(model: &mut Typeahead, surface: &mut S) -> Option<Cmd> {
    let query = model.active_match().map(|active| active.leading_text.clone());
    let outcome = model.hooks.on_enter(query.as_deref());

    if outcome == EnterOutcome::Handled || !model.config.clear_editor_on_enter {
        return None;
    }

    surface.clear();
    if model.is_active() {
        end_session(model, surface, true)
    } else {
        Some(Cmd::Redraw)
    }
}

/// Pointer over a row highlights it; a click also commits it
pub fn update_pointer<S: EditableSurface>(
    model: &mut Typeahead,
    surface: &mut S,
    index: usize,
    select: bool,
) -> Option<Cmd> {
    if !model.is_active() {
        return None;
    }

    let moved = model.menu.hover(index);
    if !select {
        return moved.then_some(Cmd::Redraw);
    }

    if model.menu.highlighted_index() != Some(index) {
        return None;
    }
    commit(model, surface, CommitKey::Pointer)
}

fn commit<S: EditableSurface>(model: &mut Typeahead, surface: &mut S, key: CommitKey) -> Option<Cmd> {
    // Nothing highlighted (or an empty list) is a no-op
    let item = model.menu.commit(key)?.clone();
    let active = model.active_match()?.clone();

    model.hooks.on_select(&item);
    if model.hooks.on_enter(Some(&active.leading_text)) == EnterOutcome::Handled {
        tracing::debug!("commit of {:?} handled by on_enter", item.id);
        return end_session(model, surface, true);
    }

    let clear = key == CommitKey::Enter && model.config.clear_editor_on_enter;
    let result = model.committer.commit(
        surface,
        active.replaceable_range,
        &active.replaceable_text,
        &item.value,
        clear,
    );

    match result {
        Ok(outcome) => {
            tracing::debug!("committed {:?} via {:?}: {:?}", item.value, key, outcome);
            end_session(model, surface, true)
        }
        Err(err) => {
            tracing::debug!("commit aborted: {}", err);
            let ended = end_session(model, surface, false);
            let restarted = update_surface(model, surface);
            let cmds = [ended, restarted].into_iter().flatten().collect();
            Some(Cmd::batch(cmds))
        }
    }
}
