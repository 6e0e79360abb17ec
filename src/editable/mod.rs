//! Editable text surface abstraction.
//!
//! The typeahead engine never owns text. It talks to an editable surface through
//! the [`EditableSurface`] trait:
//!
//! - [`TextOffset`] / [`TextRange`]: opaque node-relative positions, never raw indices
//! - [`EditableSurface`]: reading text before the cursor, range replacement,
//!   change notifications and the prioritized key handler registry
//! - [`InlineSurface`]: a small paragraph-based implementation backed by `ropey`
//! - [`TextEditMsg`]: default editing operations for keys no handler claimed
//!
//! # Example
//!
//! ```ignore
//! use omnibar::editable::{EditableSurface, InlineSurface};
//!
//! let surface = InlineSurface::from_text("hello /he");
//! let window = surface.text_before_cursor(10)?;
//! assert_eq!(window.text, "hello /he");
//! ```

mod inline;
mod messages;
mod offset;
mod range;
mod surface;

pub use inline::{CharMetrics, InlineSurface};
pub use messages::{MoveTarget, TextEditMsg};
pub use offset::{NodeId, TextOffset};
pub use range::TextRange;
pub use surface::{
    ChangeEvent, ChangeKind, EditableSurface, SubscriptionId, SurfaceError, TextWindow,
};
