//! Utility modules

pub mod text;

pub use text::{char_len, is_escaped, is_leading_boundary, is_punctuation};
