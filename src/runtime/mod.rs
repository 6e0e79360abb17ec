//! Runtime module - drives a typeahead against a concrete surface
//!
//! - `app` - the [`Omnibar`] loop: key routing, change coalescing, command execution
//! - `input` - text and script key to keystroke mapping

pub mod app;
pub mod input;

pub use app::Omnibar;
pub use input::{keystroke_for_char, keystrokes_for_text, parse_script_key};
