//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: The field in its three faces, buttons and layout
//! - [`style`]: Theming and colors

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{
    FieldLayout, VisualRow, cursor_row, field_inner_width, field_layout, render,
    text_position_at, visual_rows,
};

pub const FIELD_MARGIN: u16 = 1;
pub const BUTTON_GAP: u16 = 2;
pub const CANCEL_LABEL: &str = "[ Cancel ]";
pub const SAVE_LABEL: &str = "[ Save ]";
