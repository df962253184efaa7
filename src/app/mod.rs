//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::field::{CommitHandler, DiscardHandler, FieldOptions, TextField};

/// Delay between entering edit mode and handing the text box focus.
pub const FOCUS_DELAY_MS: u64 = 100;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    options: FieldOptions,
    on_commit: Option<CommitHandler>,
    on_discard: Option<DiscardHandler>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application hosting one field.
    pub fn new(options: FieldOptions) -> Self {
        Self {
            options,
            on_commit: None,
            on_discard: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Notify `handler` with every saved draft.
    #[must_use]
    pub fn with_on_commit(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_commit = Some(Box::new(handler));
        self
    }

    /// Notify `handler` whenever an edit is cancelled.
    #[must_use]
    pub fn with_on_discard(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_discard = Some(Box::new(handler));
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the initial model, moving the notification handlers into the
    /// field. Handlers are consumed by the first call.
    pub fn build_model(&mut self, terminal_size: (u16, u16)) -> Model {
        let mut field = TextField::new(self.options.clone());
        if let Some(handler) = self.on_commit.take() {
            field = field.on_commit(handler);
        }
        if let Some(handler) = self.on_discard.take() {
            field = field.on_discard(handler);
        }
        let mut model = Model::new(field, terminal_size);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }
}
