//! Message types for the Elm-style architecture

use crate::candidates::{CandidateItem, CandidateRequest};
use crate::keymap::MenuAction;

/// Everything the typeahead reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum TypeaheadMsg {
    /// The surface's content or cursor changed
    SurfaceChanged,
    /// A claimed key mapped to a menu action
    Key(MenuAction),
    /// Enter on an idle surface with `prevent_default_on_enter`
    Submit,
    /// Items for an earlier request
    CandidatesLoaded {
        request: CandidateRequest,
        items: Vec<CandidateItem>,
    },
    /// Pointer moved over a menu row
    PointerHover(usize),
    /// Pointer clicked a menu row
    PointerSelect(usize),
    /// Close the menu without committing (e.g. focus lost)
    Dismiss,
}

impl TypeaheadMsg {
    /// Short name for logging
    pub fn name(&self) -> String {
        match self {
            TypeaheadMsg::CandidatesLoaded { request, items } => format!(
                "CandidatesLoaded({:?}, {} items)",
                request.query,
                items.len()
            ),
            other => format!("{:?}", other),
        }
    }
}
