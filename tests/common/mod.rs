//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use omnibar::candidates::{CandidateItem, CandidateSource, StaticSource};
use omnibar::editable::InlineSurface;
use omnibar::hooks::{EnterOutcome, TypeaheadHooks};
use omnibar::resolution::ActiveMatch;
use omnibar::{Omnibar, TypeaheadConfig};

/// A hook call, as recorded by [`RecordingHooks`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    Trigger(String),
    MatchChange(String),
    Untrigger,
    Query(Option<String>),
    Select(String),
    Enter(Option<String>),
}

/// Hooks that record every call. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    events: Rc<RefCell<Vec<HookEvent>>>,
    enter_outcome: Rc<RefCell<EnterOutcome>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `on_enter` report the event as handled
    pub fn handling_enter(self) -> Self {
        *self.enter_outcome.borrow_mut() = EnterOutcome::Handled;
        self
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn count(&self, event: &HookEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn triggers(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, HookEvent::Trigger(_)))
            .count()
    }

    pub fn untriggers(&self) -> usize {
        self.count(&HookEvent::Untrigger)
    }

    fn push(&self, event: HookEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TypeaheadHooks for RecordingHooks {
    fn on_trigger(&mut self, active: &ActiveMatch) {
        self.push(HookEvent::Trigger(active.leading_text.clone()));
    }

    fn on_match_change(&mut self, active: &ActiveMatch) {
        self.push(HookEvent::MatchChange(active.leading_text.clone()));
    }

    fn on_untrigger(&mut self) {
        self.push(HookEvent::Untrigger);
    }

    fn on_query_change(&mut self, query: Option<&str>) {
        self.push(HookEvent::Query(query.map(str::to_string)));
    }

    fn on_select(&mut self, item: &CandidateItem) {
        self.push(HookEvent::Select(item.id.clone()));
    }

    fn on_enter(&mut self, query: Option<&str>) -> EnterOutcome {
        self.push(HookEvent::Enter(query.map(str::to_string)));
        *self.enter_outcome.borrow()
    }
}

/// Items whose id, label and value are the given strings
pub fn items(values: &[&str]) -> Vec<CandidateItem> {
    values.iter().map(|v| CandidateItem::simple(*v)).collect()
}

/// Command-style candidates used across scenarios
pub fn commands() -> Vec<CandidateItem> {
    items(&["help", "hello", "heading", "image", "table"])
}

/// An omnibar over `text` with a prefix-filtered static source and recording hooks
pub fn omnibar_with(
    text: &str,
    config: TypeaheadConfig,
    candidates: Vec<CandidateItem>,
) -> (Omnibar<InlineSurface, StaticSource>, RecordingHooks) {
    let hooks = RecordingHooks::new();
    let omnibar = Omnibar::with_hooks(
        InlineSurface::from_text(text),
        config,
        StaticSource::new(candidates),
        hooks.clone(),
    );
    (omnibar, hooks)
}

/// [`omnibar_with`] using the default config and [`commands`]
pub fn default_omnibar(text: &str) -> (Omnibar<InlineSurface, StaticSource>, RecordingHooks) {
    omnibar_with(text, TypeaheadConfig::default(), commands())
}

/// Labels currently shown in the menu
pub fn menu_labels<C: CandidateSource>(bar: &Omnibar<InlineSurface, C>) -> Vec<String> {
    bar
        .typeahead()
        .menu()
        .items()
        .iter()
        .map(|item| item.label.clone())
        .collect()
}
