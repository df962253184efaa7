use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::field::EditOp;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) if model.field.is_editing() => {
                Some(Message::Edit(EditOp::Paste(text)))
            }
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if model.field.is_editing() {
            return Self::handle_editing_key(key, model);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => Some(Message::Quit),
            KeyCode::Enter | KeyCode::Char('e' | ' ') => Some(Message::Tap),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::PageUp => Some(Message::ScrollUp(page_rows(model))),
            KeyCode::PageDown => Some(Message::ScrollDown(page_rows(model))),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    fn handle_editing_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let edit = |op| Some(Message::Edit(op));
        match key.code {
            KeyCode::Esc => Some(Message::Discard),
            KeyCode::Char('s') if ctrl => Some(Message::Commit),
            KeyCode::Char('c' | 'q') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Enter if model.field.options().multiline => edit(EditOp::Newline),
            KeyCode::Enter => Some(Message::Commit),
            KeyCode::Backspace => edit(EditOp::Backspace),
            KeyCode::Delete => edit(EditOp::Delete),
            KeyCode::Left if ctrl => edit(EditOp::WordLeft),
            KeyCode::Right if ctrl => edit(EditOp::WordRight),
            KeyCode::Home if ctrl => edit(EditOp::ToStart),
            KeyCode::End if ctrl => edit(EditOp::ToEnd),
            KeyCode::Left => edit(EditOp::Move(Direction::Left)),
            KeyCode::Right => edit(EditOp::Move(Direction::Right)),
            KeyCode::Up => edit(EditOp::Move(Direction::Up)),
            KeyCode::Down => edit(EditOp::Move(Direction::Down)),
            KeyCode::Home => edit(EditOp::Home),
            KeyCode::End => edit(EditOp::End),
            KeyCode::Tab => edit(EditOp::Insert('\t')),
            KeyCode::Char(c) if !ctrl && !alt => edit(EditOp::Insert(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideHelp);
        }

        let area = Rect::new(0, 0, model.terminal_size.0, model.terminal_size.1);
        let layout = crate::ui::field_layout(area, model);
        let at = Position::new(mouse.column, mouse.row);
        let editing = model.field.is_editing();

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                if layout.save.is_some_and(|r| r.contains(at)) {
                    return Some(Message::Commit);
                }
                if layout.cancel.is_some_and(|r| r.contains(at)) {
                    return Some(Message::Discard);
                }
                if !layout.field.contains(at) {
                    return None;
                }
                if !editing {
                    return Some(Message::Tap);
                }
                crate::ui::text_position_at(model, layout.text, mouse.column, mouse.row)
                    .map(|(line, col)| Message::Edit(EditOp::MoveTo(line, col)))
            }
            MouseEventKind::ScrollUp if layout.field.contains(at) => Some(if editing {
                Message::Edit(EditOp::Move(Direction::Up))
            } else {
                Message::ScrollUp(1)
            }),
            MouseEventKind::ScrollDown if layout.field.contains(at) => Some(if editing {
                Message::Edit(EditOp::Move(Direction::Down))
            } else {
                Message::ScrollDown(1)
            }),
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn page_rows(model: &Model) -> usize {
    usize::from(model.field.height().saturating_sub(crate::field::CONTENT_PADDING).max(1))
}
