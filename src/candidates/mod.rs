//! Candidate items and the sources that provide them
//!
//! A [`CandidateSource`] is asked for items every time the query changes while a
//! match is active. Sources answer immediately with [`CandidateResponse::Ready`]
//! or defer with [`CandidateResponse::Pending`] and deliver later through
//! [`TypeaheadMsg::CandidatesLoaded`](crate::messages::TypeaheadMsg::CandidatesLoaded).
//! Every request carries the query and session it was issued for so late
//! responses can be recognised as stale.

mod sources;

pub use sources::{DeferredSource, FilterMode, FuzzySource, StaticSource};

use serde::{Deserialize, Serialize};

/// A selectable menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Identity of the item
    pub id: String,
    /// Text shown in the menu
    pub label: String,
    /// Text inserted on commit
    pub value: String,
    /// Secondary text shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CandidateItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
            detail: None,
        }
    }

    /// Item whose id, label and value are all `value`
    pub fn simple(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value.clone(), value)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Identifies one match session (trigger to untrigger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct SessionId(pub u64);

/// Identifies one candidate request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct RequestId(pub u64);

/// A request for candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRequest {
    pub id: RequestId,
    pub session: SessionId,
    /// Leading text of the match at the time of the request
    pub query: String,
}

/// Outcome of asking a source for candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateResponse {
    Ready(Vec<CandidateItem>),
    /// Items will arrive later as a `CandidatesLoaded` message
    Pending,
}

/// Provider of candidate items for a query
pub trait CandidateSource {
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse;
}

impl<F> CandidateSource for F
where
    F: FnMut(&str) -> Vec<CandidateItem>,
{
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse {
        CandidateResponse::Ready(self(&request.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let mut source = |query: &str| vec![CandidateItem::simple(format!("{query}!"))];
        let request = CandidateRequest {
            id: RequestId(1),
            session: SessionId(1),
            query: "hi".into(),
        };
        assert_eq!(
            source.request(&request),
            CandidateResponse::Ready(vec![CandidateItem::simple("hi!")])
        );
    }

    #[test]
    fn test_item_yaml() {
        let item: CandidateItem =
            serde_yaml::from_str("id: h1\nlabel: Help\nvalue: help\n").unwrap();
        assert_eq!(item, CandidateItem::new("h1", "Help", "help"));
        assert_eq!(item.detail, None);
    }
}
