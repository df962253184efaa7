use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::field::{FieldView, TextField, wrap_ranges};

use super::{BUTTON_GAP, CANCEL_LABEL, FIELD_MARGIN, SAVE_LABEL, overlays, status, style};

/// Screen regions for one frame. Shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// The bordered field box.
    pub field: Rect,
    /// Text area inside the border and padding.
    pub text: Rect,
    pub counter: Option<Rect>,
    pub cancel: Option<Rect>,
    pub save: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// One wrapped row of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    /// Source line index.
    pub line: usize,
    /// Character range within that line.
    pub range: Range<usize>,
    /// Whether this is the last row of its line.
    pub last_of_line: bool,
    pub text: String,
}

/// Columns available for text at a given terminal width.
pub const fn field_inner_width(total_width: u16) -> u16 {
    // margin + border + padding on both sides
    let used = 2 * (FIELD_MARGIN + 2);
    let width = total_width.saturating_sub(used);
    if width == 0 { 1 } else { width }
}

pub fn field_layout(area: Rect, model: &Model) -> FieldLayout {
    let editing = model.field.is_editing();
    let show_counter = editing && model.field.options().show_counts;
    let toast_active = model.active_toast().is_some();

    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let reserved = 1 + 1 + u16::from(toast_active) + u16::from(show_counter) + u16::from(editing);
    let available = area.height.saturating_sub(reserved);
    let field_height = model.field.height().min(available);

    let field = Rect {
        x: area.x + FIELD_MARGIN,
        y: area.y + 1.min(area.height),
        width: area.width.saturating_sub(2 * FIELD_MARGIN),
        height: field_height,
    };
    let text = Rect {
        x: field.x + 2,
        y: field.y + 1,
        width: field.width.saturating_sub(4),
        height: field.height.saturating_sub(2),
    };

    let mut next_y = field.y + field.height;
    let counter = show_counter.then(|| {
        let rect = Rect {
            y: next_y,
            height: 1,
            ..field
        };
        next_y += 1;
        rect
    });

    let (cancel, save) = if editing {
        let cancel_w = label_width(CANCEL_LABEL);
        let save_w = label_width(SAVE_LABEL);
        let right = field.x + field.width;
        let save = Rect::new(right.saturating_sub(save_w), next_y, save_w, 1);
        let cancel = Rect::new(
            save.x.saturating_sub(BUTTON_GAP + cancel_w),
            next_y,
            cancel_w,
            1,
        );
        (Some(cancel), Some(save))
    } else {
        (None, None)
    };

    let toast = toast_active.then(|| Rect {
        y: status.y.saturating_sub(1),
        height: 1,
        ..area
    });

    FieldLayout {
        field,
        text,
        counter,
        cancel,
        save,
        toast,
        status,
    }
}

/// Wrap the draft into rows of at most `width` columns.
pub fn visual_rows(field: &TextField, width: u16) -> Vec<VisualRow> {
    let draft = field.draft();
    let mut rows = Vec::new();
    for line in 0..draft.line_count() {
        let text = draft.line_at(line).unwrap_or_default();
        let chars: Vec<char> = text.chars().collect();
        let ranges = wrap_ranges(&text, usize::from(width));
        let count = ranges.len();
        for (idx, range) in ranges.into_iter().enumerate() {
            rows.push(VisualRow {
                line,
                text: chars[range.clone()].iter().collect(),
                range,
                last_of_line: idx + 1 == count,
            });
        }
    }
    rows
}

/// Index of the row holding the cursor.
pub fn cursor_row(rows: &[VisualRow], line: usize, col: usize) -> Option<usize> {
    rows.iter().position(|row| {
        row.line == line
            && col >= row.range.start
            && (col < row.range.end || (row.last_of_line && col == row.range.end))
    })
}

/// Map a screen cell inside the text area to a draft line/column.
pub fn text_position_at(model: &Model, text_area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    if text_area.width == 0 || text_area.height == 0 {
        return None;
    }
    if row < text_area.y || row >= text_area.y + text_area.height {
        return None;
    }
    let rows = visual_rows(&model.field, text_area.width);
    let target = model.scroll_offset + usize::from(row - text_area.y);
    let visual = rows.get(target).or_else(|| rows.last())?;
    let rel_col = usize::from(column.saturating_sub(text_area.x));
    let mut used = 0;
    let mut col = visual.range.start;
    for ch in visual.text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > rel_col {
            break;
        }
        used += w;
        col += 1;
    }
    Some((visual.line, col))
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = field_layout(area, model);

    frame.render_widget(Clear, area);
    render_field(model, frame, &layout);

    if let Some(counter) = layout.counter {
        status::render_counter(model, frame, counter);
    }
    if let (Some(cancel), Some(save)) = (layout.cancel, layout.save) {
        render_buttons(model, frame, cancel, save);
    }
    if let Some(toast) = layout.toast {
        status::render_toast_bar(model, frame, toast);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_field(model: &mut Model, frame: &mut Frame, layout: &FieldLayout) {
    let view = model.field.view();
    let focused = model.field.is_focused();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(style::field_border_style(view == FieldView::Editing, focused))
        .padding(Padding::horizontal(1));
    if view == FieldView::Editing {
        block = block.title(" Editing ");
    } else if !model.field.options().editable {
        block = block.title(" Read-only ");
    }

    let content: Vec<Line> = match view {
        FieldView::Empty => vec![Line::styled(
            model.field.placeholder().to_string(),
            style::placeholder_style(),
        )],
        FieldView::Display => {
            let rows = visual_rows(&model.field, layout.text.width);
            let start = clamp_scroll(model.scroll_offset, rows.len(), layout.text.height);
            model.scroll_offset = start;
            rows.into_iter()
                .skip(start)
                .take(usize::from(layout.text.height))
                .map(|row| Line::styled(row.text, style::display_text_style()))
                .collect()
        }
        FieldView::Editing => editing_lines(model, layout.text),
    };

    frame.render_widget(Paragraph::new(content).block(block), layout.field);
}

fn editing_lines(model: &mut Model, text_area: Rect) -> Vec<Line<'static>> {
    let rows = visual_rows(&model.field, text_area.width);
    let height = usize::from(text_area.height);
    let cursor = model.field.draft().cursor();
    let focused = model.field.is_focused();
    let cursor_at = cursor_row(&rows, cursor.line, cursor.col);

    let mut start = clamp_scroll(model.scroll_offset, rows.len(), text_area.height);
    if let Some(row) = cursor_at
        && height > 0
    {
        if row < start {
            start = row;
        } else if row >= start + height {
            start = row + 1 - height;
        }
    }
    model.scroll_offset = start;

    rows.iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(idx, row)| {
            if focused && cursor_at == Some(idx) {
                cursor_line(row, cursor.col - row.range.start)
            } else {
                Line::raw(row.text.clone())
            }
        })
        .collect()
}

fn cursor_line(row: &VisualRow, col: usize) -> Line<'static> {
    let chars: Vec<char> = row.text.chars().collect();
    let col = col.min(chars.len());
    let before: String = chars[..col].iter().collect();
    let at = chars.get(col).map_or_else(|| " ".to_string(), ToString::to_string);
    let after: String = chars.get(col + 1..).unwrap_or_default().iter().collect();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }
    spans.push(Span::styled(at, style::cursor_style()));
    if !after.is_empty() {
        spans.push(Span::raw(after));
    }
    Line::from(spans)
}

fn render_buttons(model: &Model, frame: &mut Frame, cancel: Rect, save: Rect) {
    frame.render_widget(
        Paragraph::new(CANCEL_LABEL).style(style::cancel_button_style()),
        cancel,
    );
    frame.render_widget(
        Paragraph::new(SAVE_LABEL).style(style::save_button_style(model.field.is_dirty())),
        save,
    );
}

fn label_width(label: &str) -> u16 {
    u16::try_from(unicode_width::UnicodeWidthStr::width(label)).unwrap_or(u16::MAX)
}

const fn clamp_scroll(offset: usize, total_rows: usize, height: u16) -> usize {
    let max = total_rows.saturating_sub(height as usize);
    if offset > max { max } else { offset }
}
