use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::field::FieldView;

use super::style;

/// Text for the counter line under the live text box.
pub fn counter_text(words: usize, chars: usize, max: Option<usize>) -> String {
    let noun = if words == 1 { "word" } else { "words" };
    match max {
        Some(max) => format!("{words} {noun} · {chars}/{max} chars"),
        None => format!("{words} {noun} · {chars} chars"),
    }
}

/// At or beyond 90% of the cap.
pub const fn near_limit(chars: usize, max: Option<usize>) -> bool {
    match max {
        Some(max) => chars.saturating_mul(10) >= max.saturating_mul(9),
        None => false,
    }
}

pub fn render_counter(model: &Model, frame: &mut Frame, area: Rect) {
    let counts = model.field.counts();
    let max = model.field.options().max_length;
    let counter = Paragraph::new(counter_text(counts.words, counts.chars, max))
        .style(style::counter_style(near_limit(counts.chars, max)));
    frame.render_widget(counter, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let field = &model.field;
    let status = match field.view() {
        FieldView::Editing => {
            let cursor = field.draft().cursor();
            let modified = if field.is_dirty() { " [modified]" } else { "" };
            let waiting = if field.is_focused() { "" } else { " [focusing]" };
            let save_hint = if field.options().multiline {
                "Ctrl+S:save"
            } else {
                "Enter:save"
            };
            format!(
                " EDIT{modified}{waiting}  Ln {}, Col {}  Esc:cancel  {save_hint}",
                cursor.line + 1,
                cursor.col + 1
            )
        }
        FieldView::Display | FieldView::Empty if !field.options().editable => {
            " NOTE  [read-only]  ?:help  q:quit".to_string()
        }
        FieldView::Display => " NOTE  Enter:edit  ?:help  q:quit".to_string(),
        FieldView::Empty => " NOTE  [empty]  Enter:edit  ?:help  q:quit".to_string(),
    };

    let bg = if field.is_editing() {
        Color::Magenta
    } else {
        Color::DarkGray
    };
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
