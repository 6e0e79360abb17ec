//! Bundled candidate sources

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

use super::{CandidateItem, CandidateRequest, CandidateResponse, CandidateSource, RequestId};

/// How [`StaticSource`] compares the query with item labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Prefix,
    Substring,
}

/// Case-insensitive filter over a fixed item list. Source order is preserved.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<CandidateItem>,
    mode: FilterMode,
}

impl StaticSource {
    pub fn new(items: Vec<CandidateItem>) -> Self {
        Self {
            items,
            mode: FilterMode::Prefix,
        }
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn filter(&self, query: &str) -> Vec<CandidateItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                let label = item.label.to_lowercase();
                match self.mode {
                    FilterMode::Prefix => label.starts_with(&needle),
                    FilterMode::Substring => label.contains(&needle),
                }
            })
            .cloned()
            .collect()
    }
}

impl CandidateSource for StaticSource {
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse {
        CandidateResponse::Ready(self.filter(&request.query))
    }
}

/// Fuzzy-ranked source backed by `nucleo-matcher`.
///
/// Items are ranked by score, best first; equal scores keep source order. An
/// empty query returns every item unranked.
pub struct FuzzySource {
    items: Vec<CandidateItem>,
    haystacks: Vec<Utf32String>,
    matcher: Matcher,
    limit: Option<usize>,
}

impl std::fmt::Debug for FuzzySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzySource")
            .field("items", &self.items.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl FuzzySource {
    pub fn new(items: Vec<CandidateItem>) -> Self {
        let haystacks = items
            .iter()
            .map(|item| Utf32String::from(item.label.as_str()))
            .collect();
        Self {
            items,
            haystacks,
            matcher: Matcher::new(Config::DEFAULT),
            limit: None,
        }
    }

    /// Cap the number of returned items
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn rank(&mut self, query: &str) -> Vec<CandidateItem> {
        let limit = self.limit.unwrap_or(usize::MAX);
        if query.is_empty() {
            return self.items.iter().take(limit).cloned().collect();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut scored: Vec<(u32, usize)> = self
            .haystacks
            .iter()
            .enumerate()
            .filter_map(|(idx, haystack)| {
                pattern
                    .score(haystack.slice(..), &mut self.matcher)
                    .map(|score| (score, idx))
            })
            .collect();

        // Higher score first, then source order
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, idx)| self.items[idx].clone())
            .collect()
    }
}

impl CandidateSource for FuzzySource {
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse {
        CandidateResponse::Ready(self.rank(&request.query))
    }
}

/// Source that answers every request with `Pending` and lets the caller decide
/// when (and in which order) responses arrive.
///
/// Items for a resolved request come from the wrapped source. Only one session
/// is live per surface, so a request for a new session drops the requests left
/// over from earlier ones.
#[derive(Debug)]
pub struct DeferredSource<S> {
    inner: S,
    pending: Vec<CandidateRequest>,
}

impl<S: CandidateSource> DeferredSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    /// Requests not yet resolved, oldest first
    pub fn pending(&self) -> &[CandidateRequest] {
        &self.pending
    }

    /// Resolve one request, removing it from the pending list
    pub fn resolve(&mut self, id: RequestId) -> Option<(CandidateRequest, Vec<CandidateItem>)> {
        let pos = self.pending.iter().position(|r| r.id == id)?;
        let request = self.pending.remove(pos);
        let items = match self.inner.request(&request) {
            CandidateResponse::Ready(items) => items,
            CandidateResponse::Pending => Vec::new(),
        };
        Some((request, items))
    }

    /// Resolve the request issued for `query`, most recent first
    pub fn resolve_query(&mut self, query: &str) -> Option<(CandidateRequest, Vec<CandidateItem>)> {
        let id = self.pending.iter().rev().find(|r| r.query == query)?.id;
        self.resolve(id)
    }

    /// Resolve every pending request in issue order
    pub fn resolve_all(&mut self) -> Vec<(CandidateRequest, Vec<CandidateItem>)> {
        let ids: Vec<RequestId> = self.pending.iter().map(|r| r.id).collect();
        ids.into_iter().filter_map(|id| self.resolve(id)).collect()
    }
}

impl<S: CandidateSource> CandidateSource for DeferredSource<S> {
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse {
        let before = self.pending.len();
        self.pending.retain(|r| r.session == request.session);
        if self.pending.len() < before {
            tracing::debug!(
                "dropped {} pending requests from ended sessions",
                before - self.pending.len()
            );
        }
        self.pending.push(request.clone());
        CandidateResponse::Pending
    }
}
