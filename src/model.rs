//! The typeahead model: all state for one editable surface
//!
//! State only changes through [`update`](crate::update::update); the model's
//! own methods are read-only queries plus attach/detach of surface handlers.

use crate::arbiter::{ClaimContext, EventArbiter, KeyRoute};
use crate::candidates::{CandidateRequest, RequestId};
use crate::commands::Cmd;
use crate::committer::TextCommitter;
use crate::config::TypeaheadConfig;
use crate::editable::EditableSurface;
use crate::hooks::TypeaheadHooks;
use crate::keymap::HandlerId;
use crate::menu::{MenuView, SelectionMenu};
use crate::messages::TypeaheadMsg;
use crate::overlay::{MenuPlacement, OverlayConfig};
use crate::resolution::{ActiveMatch, MatchResolution, MatchResult};
use crate::trigger::TriggerSpec;

/// Typeahead engine state
pub struct Typeahead {
    pub(crate) config: TypeaheadConfig,
    /// Compiled trigger specs
    pub(crate) specs: Vec<TriggerSpec>,
    pub(crate) resolution: MatchResolution,
    pub(crate) menu: SelectionMenu,
    pub(crate) arbiter: EventArbiter,
    pub(crate) committer: TextCommitter,
    pub(crate) hooks: Box<dyn TypeaheadHooks>,
    last_request: u64,
}

impl std::fmt::Debug for Typeahead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeahead")
            .field("specs", &self.specs.len())
            .field("current", self.resolution.current())
            .field("items", &self.menu.len())
            .field("highlighted", &self.menu.highlighted_index())
            .finish()
    }
}

impl Typeahead {
    pub fn new(config: TypeaheadConfig) -> Self {
        let specs = config.trigger_specs();
        let resolution = MatchResolution::new(config.lookback);
        let menu = SelectionMenu::new(config.menu_options());
        let arbiter = EventArbiter::new(config.menu_bindings());
        Self {
            config,
            specs,
            resolution,
            menu,
            arbiter,
            committer: TextCommitter,
            hooks: Box::new(()),
            last_request: 0,
        }
    }

    /// Install integrator callbacks (builder pattern)
    pub fn with_hooks(mut self, hooks: impl TypeaheadHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    // === Queries ===

    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    pub fn specs(&self) -> &[TriggerSpec] {
        &self.specs
    }

    pub fn current_match(&self) -> &MatchResult {
        self.resolution.current()
    }

    pub fn active_match(&self) -> Option<&ActiveMatch> {
        self.resolution.active()
    }

    pub fn is_active(&self) -> bool {
        self.resolution.is_active()
    }

    pub fn menu(&self) -> &SelectionMenu {
        &self.menu
    }

    /// What to render, or None while no match is active
    pub fn menu_view(&self) -> Option<MenuView<'_>> {
        self.is_active().then(|| self.menu.view())
    }

    /// Where to draw the menu for the active match
    pub fn menu_placement(
        &self,
        overlay: &OverlayConfig,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<MenuPlacement> {
        let active = self.active_match()?;
        Some(overlay.place(active.anchor_rect, viewport_width, viewport_height))
    }

    // === Surface wiring ===

    /// Register handlers that live as long as the surface is attached
    pub fn attach<S: EditableSurface + ?Sized>(&mut self, surface: &mut S) {
        self.arbiter
            .set_submit_intercept(surface, self.config.prevent_default_on_enter);
    }

    /// Remove every handler this typeahead registered on the surface
    pub fn detach<S: EditableSurface + ?Sized>(&mut self, surface: &mut S) {
        self.arbiter.detach(surface);
    }

    /// Message for a key handler the surface reported, or None if this
    /// typeahead does not claim it
    pub fn route_key(&self, id: HandlerId) -> Option<TypeaheadMsg> {
        let ctx = ClaimContext {
            has_highlight: self.menu.highlighted_index().is_some(),
        };
        match self.arbiter.route(id, ctx)? {
            KeyRoute::Menu(action) if self.is_active() => Some(TypeaheadMsg::Key(action)),
            KeyRoute::Menu(_) => None,
            KeyRoute::Submit => Some(TypeaheadMsg::Submit),
        }
    }

    /// Apply a message. See [`update`](crate::update::update).
    pub fn update<S: EditableSurface>(&mut self, surface: &mut S, msg: TypeaheadMsg) -> Option<Cmd> {
        crate::update::update(self, surface, msg)
    }

    // === Internal ===

    /// Issue a candidate request for the active match's query
    pub(crate) fn request_candidates(&mut self, active: &ActiveMatch) -> Cmd {
        self.last_request += 1;
        self.menu.set_loading(true);
        Cmd::FetchCandidates(CandidateRequest {
            id: RequestId(self.last_request),
            session: active.session,
            query: active.leading_text.clone(),
        })
    }
}
