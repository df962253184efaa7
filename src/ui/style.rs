//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's palette, with a few
//! indexed shades swapped depending on whether the background is light.

use std::sync::atomic::{AtomicU8, Ordering};

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    Light,
    Dark,
}

const MODE_UNSET: u8 = 0;
const MODE_LIGHT: u8 = 1;
const MODE_DARK: u8 = 2;

static BACKGROUND: AtomicU8 = AtomicU8::new(MODE_UNSET);

/// Force a background mode, or `None` to detect from `COLORFGBG`.
pub fn set_background_mode(mode: Option<BackgroundMode>) {
    let mode = mode.unwrap_or_else(|| {
        background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    });
    let raw = match mode {
        BackgroundMode::Light => MODE_LIGHT,
        BackgroundMode::Dark => MODE_DARK,
    };
    BACKGROUND.store(raw, Ordering::Relaxed);
}

pub fn is_light_background() -> bool {
    BACKGROUND.load(Ordering::Relaxed) == MODE_LIGHT
}

/// Interpret `COLORFGBG` (`"fg;bg"` or `"fg;default;bg"`); background
/// indices 7 and 9-15 are light. Anything unparsable counts as dark.
pub fn background_mode_from_colorfgbg(value: Option<&str>) -> BackgroundMode {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7 | 9..=15) => BackgroundMode::Light,
        _ => BackgroundMode::Dark,
    }
}

const fn pick(light: Color, dark: Color, light_bg: bool) -> Color {
    if light_bg { light } else { dark }
}

/// Dim italic prompt shown in the empty face.
pub fn placeholder_style() -> Style {
    Style::default()
        .fg(pick(Color::Indexed(244), Color::Indexed(243), is_light_background()))
        .add_modifier(Modifier::ITALIC)
}

pub fn display_text_style() -> Style {
    Style::default()
}

/// Border of the field; highlighted when it owns input focus.
pub fn field_border_style(editing: bool, focused: bool) -> Style {
    let light_bg = is_light_background();
    if focused {
        Style::default().fg(pick(Color::Indexed(24), Color::Cyan, light_bg))
    } else if editing {
        Style::default().fg(pick(Color::Indexed(58), Color::Yellow, light_bg))
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn cursor_style() -> Style {
    if is_light_background() {
        Style::default().bg(Color::Black).fg(Color::White)
    } else {
        Style::default().bg(Color::White).fg(Color::Black)
    }
}

pub fn counter_style(near_limit: bool) -> Style {
    if near_limit {
        Style::default()
            .fg(pick(Color::Indexed(130), Color::Yellow, is_light_background()))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Indexed(245))
    }
}

pub fn cancel_button_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

pub fn save_button_style(enabled: bool) -> Style {
    let style = Style::default()
        .fg(Color::White)
        .bg(pick(Color::Indexed(22), Color::Green, is_light_background()))
        .add_modifier(Modifier::BOLD);
    if enabled {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}
