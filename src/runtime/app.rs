use std::sync::mpsc::{self, Receiver, Sender};

use crate::arbiter::KeyDisposition;
use crate::candidates::{CandidateItem, CandidateRequest, CandidateResponse, CandidateSource};
use crate::commands::Cmd;
use crate::config::TypeaheadConfig;
use crate::editable::{EditableSurface, SubscriptionId};
use crate::hooks::TypeaheadHooks;
use crate::keymap::Keystroke;
use crate::messages::TypeaheadMsg;
use crate::model::Typeahead;
use crate::overlay::{MenuPlacement, OverlayConfig};

use super::input::keystrokes_for_text;

/// A typeahead wired to one surface and one candidate source.
///
/// Drives the update loop: surface changes become `SurfaceChanged`, claimed
/// keys become menu messages, and `FetchCandidates` commands are executed
/// against the source. Sources that answer later deliver through
/// [`Omnibar::sender`] or [`Omnibar::deliver`].
pub struct Omnibar<S: EditableSurface, C: CandidateSource> {
    surface: S,
    typeahead: Typeahead,
    source: C,
    subscription: SubscriptionId,
    redraws: usize,
    msg_tx: Sender<TypeaheadMsg>,
    msg_rx: Receiver<TypeaheadMsg>,
}

impl<S: EditableSurface, C: CandidateSource> Omnibar<S, C> {
    pub fn new(mut surface: S, config: TypeaheadConfig, source: C) -> Self {
        Self::with_typeahead(&mut surface, Typeahead::new(config)).finish(surface, source)
    }

    /// Same as [`Omnibar::new`] with integrator callbacks installed
    pub fn with_hooks(
        mut surface: S,
        config: TypeaheadConfig,
        source: C,
        hooks: impl TypeaheadHooks + 'static,
    ) -> Self {
        let typeahead = Typeahead::new(config).with_hooks(hooks);
        Self::with_typeahead(&mut surface, typeahead).finish(surface, source)
    }

    fn with_typeahead(surface: &mut S, mut typeahead: Typeahead) -> Attached {
        let subscription = surface.subscribe();
        typeahead.attach(surface);
        Attached {
            typeahead,
            subscription,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn typeahead(&self) -> &Typeahead {
        &self.typeahead
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    /// Number of redraws requested so far
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Channel for candidates that arrive from elsewhere (e.g. another thread)
    pub fn sender(&self) -> Sender<TypeaheadMsg> {
        self.msg_tx.clone()
    }

    /// Where to draw the menu for the active match
    pub fn menu_placement(
        &self,
        overlay: &OverlayConfig,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Option<MenuPlacement> {
        self.typeahead
            .menu_placement(overlay, viewport_width, viewport_height)
    }

    // === Input ===

    /// Deliver a keystroke the way a host editor would: registered handlers in
    /// priority order first, then the surface's default editing.
    pub fn press(&mut self, keystroke: Keystroke) -> KeyDisposition {
        // Handlers registered by earlier updates may have been removed since
        let handlers = self.surface.key_handlers(&keystroke);
        let claimed = handlers
            .into_iter()
            .find_map(|id| self.typeahead.route_key(id));

        let disposition = match claimed {
            Some(msg) => {
                tracing::trace!("{} claimed as {}", keystroke, msg.name());
                self.dispatch(msg);
                KeyDisposition::Handled
            }
            None if self.surface.handle_default_key(&keystroke) => KeyDisposition::Handled,
            None => KeyDisposition::Passthrough,
        };

        self.sync();
        disposition
    }

    /// Type text one keystroke at a time
    pub fn type_text(&mut self, text: &str) {
        for keystroke in keystrokes_for_text(text) {
            self.press(keystroke);
        }
    }

    /// Pointer moved over a menu row
    pub fn hover(&mut self, index: usize) {
        self.dispatch(TypeaheadMsg::PointerHover(index));
        self.sync();
    }

    /// Pointer clicked a menu row
    pub fn click(&mut self, index: usize) {
        self.dispatch(TypeaheadMsg::PointerSelect(index));
        self.sync();
    }

    /// Close the menu without committing
    pub fn dismiss(&mut self) {
        self.dispatch(TypeaheadMsg::Dismiss);
        self.sync();
    }

    /// Hand over items for an earlier request
    pub fn deliver(&mut self, request: CandidateRequest, items: Vec<CandidateItem>) {
        self.dispatch(TypeaheadMsg::CandidatesLoaded { request, items });
    }

    /// Edit the surface directly, then let the typeahead observe the change
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.surface);
        self.sync();
        result
    }

    // === Loop ===

    /// Run one message through update and execute the resulting command
    pub fn dispatch(&mut self, msg: TypeaheadMsg) {
        if let Some(cmd) = self.typeahead.update(&mut self.surface, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Coalesce pending surface notifications into one `SurfaceChanged`
    pub fn sync(&mut self) {
        loop {
            let changes = self.surface.drain_changes(self.subscription);
            if changes.is_empty() {
                break;
            }
            tracing::trace!("{} surface change(s) pending", changes.len());
            self.dispatch(TypeaheadMsg::SurfaceChanged);
        }
        self.process_async_messages();
    }

    /// Apply everything sent through [`Omnibar::sender`]. Returns true if any
    /// message asked for a redraw.
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = self.typeahead.update(&mut self.surface, msg) {
                if cmd.needs_redraw() {
                    needs_redraw = true;
                }
                self.process_cmd(cmd);
            }
        }
        needs_redraw
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::FetchCandidates(request) => match self.source.request(&request) {
                CandidateResponse::Ready(items) => {
                    let msg = TypeaheadMsg::CandidatesLoaded { request, items };
                    if let Err(e) = self.msg_tx.send(msg) {
                        tracing::debug!("dropping candidate response: {}", e);
                    }
                }
                CandidateResponse::Pending => {
                    tracing::trace!("request {} for {:?} pending", request.id.0, request.query);
                }
            },
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }
}

impl<S: EditableSurface, C: CandidateSource> Drop for Omnibar<S, C> {
    fn drop(&mut self) {
        self.typeahead.detach(&mut self.surface);
        self.surface.unsubscribe(self.subscription);
    }
}

/// A typeahead attached to a surface, waiting for its source
struct Attached {
    typeahead: Typeahead,
    subscription: SubscriptionId,
}

impl Attached {
    fn finish<S: EditableSurface, C: CandidateSource>(self, surface: S, source: C) -> Omnibar<S, C> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut omnibar = Omnibar {
            surface,
            typeahead: self.typeahead,
            source,
            subscription: self.subscription,
            redraws: 0,
            msg_tx,
            msg_rx,
        };
        // Text the surface started with may already hold a trigger
        omnibar.dispatch(TypeaheadMsg::SurfaceChanged);
        omnibar.sync();
        omnibar
    }
}
