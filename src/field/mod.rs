//! The tap-to-edit text field.
//!
//! A [`TextField`] is headless: it owns the draft, the editing and focus
//! flags and the measured height, and notifies its host through two plain
//! callbacks. Drawing lives in [`crate::ui`]; the terminal host in
//! [`crate::app`].

mod counts;
mod layout;
mod options;

pub use counts::{TextCounts, char_count, word_count};
pub use layout::{CONTENT_PADDING, HeightTracker, clamped_height, content_rows, wrap_ranges};
pub use options::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_LENGTH, DEFAULT_MIN_HEIGHT, DEFAULT_PLACEHOLDER, FieldOptions,
};

use tracing::debug;

use crate::editor::{Direction, EditorBuffer};

/// Height of a single-line field: one text row plus the border.
pub const SINGLE_LINE_HEIGHT: u16 = 1 + CONTENT_PADDING;

/// Which of the three faces the field currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldView {
    /// Idle with blank text: the placeholder prompt.
    Empty,
    /// Idle with text: a read-only rendering of it.
    Display,
    /// The live text box with Cancel/Save and the counter.
    Editing,
}

/// How the host should give the live text box focus after a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Already focused (auto-focus).
    Immediate,
    /// Call [`TextField::focus`] after a short delay.
    Deferred,
}

/// A single editing operation on the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    Newline,
    Move(Direction),
    Home,
    End,
    WordLeft,
    WordRight,
    ToStart,
    ToEnd,
    /// Place the cursor at a line/column (clamped).
    MoveTo(usize, usize),
}

/// Receives the draft when the user saves.
pub type CommitHandler = Box<dyn FnMut(&str)>;
/// Told that the user cancelled an edit.
pub type DiscardHandler = Box<dyn FnMut()>;

/// A text field that shows a placeholder or its text until tapped, then
/// edits a draft that is either committed or discarded.

pub struct TextField {
    options: FieldOptions,
    value: String,
    draft: EditorBuffer,
    editing: bool,
    focused: bool,
    height: HeightTracker,
    on_commit: Option<CommitHandler>,
    on_discard: Option<DiscardHandler>,
}

impl TextField {
    pub fn new(options: FieldOptions) -> Self {
        let value = options.initial_value.clone();
        let mut draft = EditorBuffer::from_text(&value).with_max_chars(options.max_length);
        draft.move_to_end();
        let height = HeightTracker::new(options.min_height, options.max_height);
        Self {
            options,
            value,
            draft,
            editing: false,
            focused: false,
            height,
            on_commit: None,
            on_discard: None,
        }
    }

    /// Called with the draft whenever the user saves.
    #[must_use]
    pub fn on_commit(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_commit = Some(Box::new(handler));
        self
    }

    /// Called whenever the user cancels an edit.
    #[must_use]
    pub fn on_discard(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_discard = Some(Box::new(handler));
        self
    }

    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    /// The baseline text a discard reverts to.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn draft(&self) -> &EditorBuffer {
        &self.draft
    }

    pub fn text(&self) -> String {
        self.draft.text()
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Editing with changes that neither save nor cancel has settled yet.
    pub const fn is_dirty(&self) -> bool {
        self.editing && self.draft.is_dirty()
    }

    pub fn view(&self) -> FieldView {
        if self.editing {
            FieldView::Editing
        } else if self.draft.text().trim().is_empty() {
            FieldView::Empty
        } else {
            FieldView::Display
        }
    }

    pub fn counts(&self) -> TextCounts {
        TextCounts::of(&self.draft.text())
    }

    /// Current height in rows. Single-line fields still honour the bounds.
    pub fn height(&self) -> u16 {
        if self.options.multiline {
            self.height.current()
        } else {
            let (min, max) = self.height.bounds();
            SINGLE_LINE_HEIGHT.clamp(min, max)
        }
    }

    /// Enter edit mode from an idle face.
    ///
    /// Returns `None` when the field is read-only or already editing.
    pub fn tap(&mut self) -> Option<FocusRequest> {
        if !self.options.editable || self.editing {
            debug!(editable = self.options.editable, "tap ignored");
            return None;
        }
        self.editing = true;
        self.draft.mark_clean();
        self.draft.move_to_end();
        debug!(auto_focus = self.options.auto_focus, "entered edit mode");
        if self.options.auto_focus {
            self.focused = true;
            Some(FocusRequest::Immediate)
        } else {
            self.focused = false;
            Some(FocusRequest::Deferred)
        }
    }

    /// Give the live text box input focus. Returns `true` if focus changed.
    pub fn focus(&mut self) -> bool {
        if !self.editing || self.focused {
            return false;
        }
        self.focused = true;
        debug!("field focused");
        true
    }

    /// Finish editing and hand the draft to the commit handler.
    ///
    /// Returns the committed text, or `None` when not editing.
    pub fn commit(&mut self) -> Option<String> {
        if !self.editing {
            return None;
        }
        let text = self.draft.text();
        self.editing = false;
        self.focused = false;
        self.draft.mark_clean();
        debug!(chars = text.chars().count(), "draft committed");
        if let Some(handler) = self.on_commit.as_mut() {
            handler(&text);
        }
        Some(text)
    }

    /// Abandon the draft, restoring the baseline value.
    pub fn discard(&mut self) -> bool {
        if !self.editing {
            return false;
        }
        self.draft.set_text(&self.value);
        self.editing = false;
        self.focused = false;
        debug!("draft discarded");
        if let Some(handler) = self.on_discard.as_mut() {
            handler();
        }
        true
    }

    /// Replace the baseline value. An idle field shows it immediately; an
    /// in-progress draft is left alone and only a later discard picks it up.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if !self.editing {
            self.draft.set_text(&self.value);
        }
    }

    /// Apply an editing operation. Ignored unless editing and focused.
    pub fn edit(&mut self, op: EditOp) -> bool {
        if !self.editing || !self.focused {
            return false;
        }
        let draft = &mut self.draft;
        match op {
            EditOp::Insert('\n' | '\r') | EditOp::Newline => {
                self.options.multiline && draft.split_line()
            }
            EditOp::Insert(ch) => draft.insert_char(ch),
            EditOp::Paste(text) => {
                let text = if self.options.multiline {
                    text.replace("\r\n", "\n").replace('\r', "\n")
                } else {
                    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
                };
                draft.insert_str(&text) > 0
            }
            EditOp::Backspace => draft.delete_back(),
            EditOp::Delete => draft.delete_forward(),
            EditOp::Move(direction) => {
                draft.move_cursor(direction);
                true
            }
            EditOp::Home => {
                draft.move_home();
                true
            }
            EditOp::End => {
                draft.move_end();
                true
            }
            EditOp::WordLeft => {
                draft.move_word_left();
                true
            }
            EditOp::WordRight => {
                draft.move_word_right();
                true
            }
            EditOp::ToStart => {
                draft.move_to_start();
                true
            }
            EditOp::ToEnd => {
                draft.move_to_end();
                true
            }
            EditOp::MoveTo(line, col) => {
                draft.move_to(line, col);
                true
            }
        }
    }

    /// React to a new content measurement (in wrapped rows). Only multiline
    /// fields adapt; returns `true` when the height changed.
    pub fn content_size_changed(&mut self, content_rows: u16) -> bool {
        if !self.options.multiline {
            return false;
        }
        self.height.report(content_rows)
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new(FieldOptions::default())
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("options", &self.options)
            .field("draft", &self.draft)
            .field("editing", &self.editing)
            .field("focused", &self.focused)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
