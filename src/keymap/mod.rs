//! Key handling for the typeahead
//!
//! This module provides:
//! - Platform-aware keystroke types
//! - A priority-ordered handler registry owned by the editable surface
//! - Menu actions and their default bindings
//! - YAML parsing for user-supplied menu bindings
//!
//! # Architecture
//!
//! ```text
//! Keystroke → KeyRegistry::handlers_for() → HandlerId → EventArbiter → MenuAction
//!                                      └─ (no handler claimed it) → default editing
//! ```

mod action;
mod binding;
mod config;
mod registry;
mod types;

pub use action::{CommitKey, MenuAction};
pub use binding::{default_menu_bindings, MenuBinding};
pub use config::{parse_bindings, parse_key_string, BindingConfig, KeymapError};
pub use registry::{HandlerId, KeyRegistry, Priority};
pub use types::{KeyCode, Keystroke, Modifiers};
