//! Key interception while a match is active.
//!
//! On session start the arbiter registers its bindings on the surface's key
//! registry at [`Priority::Critical`], so they run before the surface's own
//! editing. On session end every registration is removed again. The arbiter
//! only maps handler ids to actions; deciding what an action does is up to the
//! update loop.

use crate::editable::EditableSurface;
use crate::keymap::{
    CommitKey, HandlerId, KeyCode, Keystroke, MenuAction, MenuBinding, Priority,
};

/// What a claimed key should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRoute {
    /// A menu action while a match is active
    Menu(MenuAction),
    /// Enter on an idle surface with `prevent_default_on_enter`
    Submit,
}

/// Whether a handler consumed a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    Passthrough,
}

/// Conditions that decide whether a bound key is claimed right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimContext {
    /// The menu has a highlighted item
    pub has_highlight: bool,
}

#[derive(Debug)]
pub struct EventArbiter {
    bindings: Vec<MenuBinding>,
    installed: Vec<(HandlerId, MenuAction)>,
    submit_handler: Option<HandlerId>,
}

impl EventArbiter {
    pub fn new(bindings: Vec<MenuBinding>) -> Self {
        Self {
            bindings,
            installed: Vec::new(),
            submit_handler: None,
        }
    }

    pub fn bindings(&self) -> &[MenuBinding] {
        &self.bindings
    }

    /// True while session handlers are registered
    pub fn is_installed(&self) -> bool {
        !self.installed.is_empty()
    }

    /// Register session handlers. Calling it again while installed is a no-op.
    pub fn install<S: EditableSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.is_installed() {
            return;
        }
        for binding in &self.bindings {
            let id = surface.register_key_handler(binding.keystroke, Priority::Critical);
            self.installed.push((id, binding.action));
        }
        tracing::trace!("installed {} menu key handlers", self.installed.len());
    }

    /// Remove session handlers
    pub fn uninstall<S: EditableSurface + ?Sized>(&mut self, surface: &mut S) {
        for (id, _) in self.installed.drain(..) {
            surface.unregister_key_handler(id);
        }
    }

    /// Register or remove the idle Enter handler.
    ///
    /// It sits at [`Priority::High`], below the session bindings, so an active
    /// menu still gets Enter first.
    pub fn set_submit_intercept<S: EditableSurface + ?Sized>(&mut self, surface: &mut S, on: bool) {
        match (on, self.submit_handler) {
            (true, None) => {
                self.submit_handler = Some(
                    surface.register_key_handler(Keystroke::key(KeyCode::Enter), Priority::High),
                );
            }
            (false, Some(id)) => {
                surface.unregister_key_handler(id);
                self.submit_handler = None;
            }
            _ => {}
        }
    }

    /// Remove every registration this arbiter owns
    pub fn detach<S: EditableSurface + ?Sized>(&mut self, surface: &mut S) {
        self.uninstall(surface);
        self.set_submit_intercept(surface, false);
    }

    /// Decide what a handler id means, given the current menu state.
    ///
    /// Returns None for ids this arbiter does not own and for Tab and Space with
    /// nothing highlighted. Enter is always claimed while active; a disabled
    /// Enter commit is a no-op in the update loop.
    pub fn route(&self, id: HandlerId, ctx: ClaimContext) -> Option<KeyRoute> {
        if self.submit_handler == Some(id) {
            return Some(KeyRoute::Submit);
        }

        let action = self
            .installed
            .iter()
            .find(|(installed, _)| *installed == id)
            .map(|(_, action)| *action)?;

        match action {
            MenuAction::Commit(CommitKey::Tab | CommitKey::Space) if !ctx.has_highlight => None,
            action => Some(KeyRoute::Menu(action)),
        }
    }
}
