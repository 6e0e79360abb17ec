//! Selection menu synchronized to the active match

mod state;
mod viewport;

pub use state::{MenuOptions, MenuView, SelectionMenu};
pub use viewport::MenuViewport;
