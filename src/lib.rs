//! Omnibar - trigger-driven typeahead for editable text surfaces
//!
//! This crate watches an editable surface for trigger characters, keeps a
//! selection menu of candidates in sync with the text typed after the trigger,
//! and replaces the matched text when an item is committed. State changes flow
//! through an Elm-style `update` function.

pub mod arbiter;
pub mod candidates;
pub mod cli;
pub mod commands;
pub mod committer;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod hooks;
pub mod keymap;
pub mod menu;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod resolution;
pub mod runtime;
pub mod script;
pub mod tracing;
pub mod trigger;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::TypeaheadConfig;
pub use messages::TypeaheadMsg;
pub use model::Typeahead;
pub use runtime::Omnibar;
