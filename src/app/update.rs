use tracing::info;

use crate::app::{Model, ToastLevel};
use crate::field::EditOp;

/// All possible events and actions in the application.
///
/// These represent user input, timer and measurement events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Field
    /// Tap on the idle field (click or activation key)
    Tap,
    /// Scheduled focus request fired
    FocusInput,
    /// Apply an editing operation to the draft
    Edit(EditOp),
    /// Save the draft
    Commit,
    /// Cancel the edit
    Discard,
    /// Draft now needs this many wrapped rows
    ContentSizeChanged(u16),
    /// Scroll field content up by n rows
    ScrollUp(usize),
    /// Scroll field content down by n rows
    ScrollDown(usize),

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. The only
/// outward effect is the field's own commit/discard notification.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Commit preserves the flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Commit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Field
        Message::Tap => {
            if model.field.tap().is_none() && !model.field.options().editable {
                model.show_toast(ToastLevel::Info, "This note is read-only");
            }
        }
        Message::FocusInput => {
            model.field.focus();
        }
        Message::Edit(op) => {
            model.field.edit(op);
        }
        Message::Commit => {
            if let Some(text) = model.field.commit() {
                let words = model.field.counts().words;
                info!(words, "note saved");
                // The host adopts the saved text as the field's new value.
                model.field.set_value(text.clone());
                model.last_committed = Some(text);
                model.scroll_offset = 0;
                model.show_toast(
                    ToastLevel::Info,
                    format!("Saved ({words} {})", plural(words, "word", "words")),
                );
                if model.quit_confirmed {
                    model.should_quit = true;
                }
            }
        }
        Message::Discard => {
            if model.field.discard() {
                info!("edit discarded");
                model.scroll_offset = 0;
                model.show_toast(ToastLevel::Info, "Changes discarded");
            }
        }
        Message::ContentSizeChanged(rows) => {
            model.mark_reported(rows);
            model.field.content_size_changed(rows);
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            // Upper bound is applied at render time, where the width is known.
            model.scroll_offset = model.scroll_offset.saturating_add(n);
        }

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.invalidate_measurement();
        }

        // Application
        Message::Quit => {
            if model.field.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

pub(super) const fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
