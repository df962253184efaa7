//! Draft text storage for the field's edit view.
//!
//! Provides a rope-backed text buffer with cursor management and a
//! character cap, driven by the field's edit operations.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
