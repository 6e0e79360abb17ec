//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::candidates::CandidateRequest;

/// Side effects returned by [`update`](crate::update::update)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The menu or match changed and should be redrawn
    Redraw,
    /// Ask the candidate source for items.
    /// Ready items come back as `TypeaheadMsg::CandidatesLoaded`.
    FetchCandidates(CandidateRequest),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening trivial cases
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Loading state changes what the menu shows
            Cmd::FetchCandidates(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Candidate requests contained in this command, in order
    pub fn fetches(&self) -> Vec<&CandidateRequest> {
        match self {
            Cmd::FetchCandidates(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.fetches()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{RequestId, SessionId};

    fn fetch(query: &str) -> Cmd {
        Cmd::FetchCandidates(CandidateRequest {
            id: RequestId(1),
            session: SessionId(1),
            query: query.into(),
        })
    }

    #[test]
    fn test_batch_flattens() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw);
        assert!(matches!(
            Cmd::batch(vec![Cmd::Redraw, fetch("a")]),
            Cmd::Batch(ref cmds) if cmds.len() == 2
        ));
    }

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::batch(vec![Cmd::None, fetch("a")]).needs_redraw());
    }

    #[test]
    fn test_fetches() {
        let cmd = Cmd::Batch(vec![Cmd::Redraw, fetch("a"), Cmd::Batch(vec![fetch("b")])]);
        let queries: Vec<&str> = cmd.fetches().iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "b"]);
    }
}
