/// Default prompt shown while the field is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Tap to add a note";
pub const DEFAULT_MAX_LENGTH: usize = 500;
pub const DEFAULT_MIN_HEIGHT: u16 = 3;
pub const DEFAULT_MAX_HEIGHT: u16 = 12;

/// Input configuration for a [`TextField`](super::TextField).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub placeholder: String,
    pub initial_value: String,
    /// Character cap for the draft (`None` = unbounded).
    pub max_length: Option<usize>,
    pub multiline: bool,
    /// When `false`, taps are ignored and the field stays read-only.
    pub editable: bool,
    pub show_counts: bool,
    /// Focus the live text box as soon as edit mode starts instead of after
    /// the scheduled delay.
    pub auto_focus: bool,
    pub min_height: u16,
    pub max_height: u16,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            initial_value: String::new(),
            max_length: Some(DEFAULT_MAX_LENGTH),
            multiline: true,
            editable: true,
            show_counts: true,
            auto_focus: false,
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl FieldOptions {
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    #[must_use]
    pub const fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    #[must_use]
    pub const fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    #[must_use]
    pub const fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    #[must_use]
    pub const fn with_show_counts(mut self, show_counts: bool) -> Self {
        self.show_counts = show_counts;
        self
    }

    #[must_use]
    pub const fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    /// Set the height bounds in rows. An upper bound below the lower one is
    /// raised to match it.
    #[must_use]
    pub fn with_height_bounds(mut self, min: u16, max: u16) -> Self {
        self.min_height = min;
        self.max_height = max.max(min);
        self
    }
}
