// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. field::FieldView)
    clippy::module_name_repetitions
)]

//! # Notefield
//!
//! A tap-to-edit note field for the terminal.
//!
//! The field has three faces:
//! - **Empty**: a dim placeholder prompt when there is no text
//! - **Display**: the saved text, shown verbatim
//! - **Editing**: a live text box with Cancel/Save and word/character counts
//!
//! Multiline fields grow with their content between a minimum and maximum
//! height. Saving hands the draft to a commit callback; cancelling reverts
//! it and calls a discard callback.
//!
//! ## Architecture
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`field`]: The headless field state machine
//! - [`editor`]: Rope-backed draft buffer with a cursor
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Config files and flag parsing
//! - [`perf`]: Timing and event logging

pub mod app;
pub mod config;
pub mod editor;
pub mod field;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::field::{FieldOptions, FieldView, TextField};
}
