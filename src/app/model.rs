use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::field::{TextField, content_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The mounted text field
    pub field: TextField,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// First wrapped row shown inside the field
    pub scroll_offset: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Text handed out by the most recent save
    pub last_committed: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with an unsaved draft; allows second quit to proceed
    pub quit_confirmed: bool,
    toast: Option<Toast>,
    /// Content height last reported to the field, `None` forces a re-measure
    reported_rows: Option<u16>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("field", &self.field)
            .field("terminal_size", &self.terminal_size)
            .field("help_visible", &self.help_visible)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(field: TextField, terminal_size: (u16, u16)) -> Self {
        Self {
            field,
            terminal_size,
            scroll_offset: 0,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            last_committed: None,
            should_quit: false,
            quit_confirmed: false,
            toast: None,
            reported_rows: None,
        }
    }

    /// Wrapped rows the draft needs at the current terminal width.
    pub fn measure_content(&self) -> u16 {
        let width = usize::from(crate::ui::field_inner_width(self.terminal_size.0));
        let draft = self.field.draft();
        let lines: Vec<String> = (0..draft.line_count())
            .filter_map(|idx| draft.line_at(idx))
            .collect();
        let rows = content_rows(lines.iter().map(String::as_str), width);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// The content height to report, if it differs from the last report.
    pub fn pending_content_size(&self) -> Option<u16> {
        if !self.field.options().multiline {
            return None;
        }
        let rows = self.measure_content();
        (self.reported_rows != Some(rows)).then_some(rows)
    }

    pub(super) const fn mark_reported(&mut self, rows: u16) {
        self.reported_rows = Some(rows);
    }

    pub(super) const fn invalidate_measurement(&mut self) {
        self.reported_rows = None;
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(TextField::default(), (80, 24))
    }
}
