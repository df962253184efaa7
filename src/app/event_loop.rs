use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, update};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// One-shot timer that hands the live text box focus a little after the
/// field enters edit mode.
pub(super) struct FocusDelay {
    delay_ms: u64,
    queued_at: Option<u64>,
}

impl FocusDelay {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            queued_at: None,
        }
    }

    pub(super) const fn queue(&mut self, now_ms: u64) {
        self.queued_at = Some(now_ms);
    }

    /// `true` once, when the delay has elapsed.
    pub(super) fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.queued_at else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.queued_at = None;
            true
        } else {
            false
        }
    }

    pub(super) const fn cancel(&mut self) {
        self.queued_at = None;
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.queued_at.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// Returns the text of the last save, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<Option<String>> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: notefield requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} inner_w={}",
                size.width,
                size.height,
                crate::ui::field_inner_width(size.width)
            ),
        );

        let mut model = self.build_model((size.width, size.height));
        info!(
            view = ?model.field.view(),
            multiline = model.field.options().multiline,
            "field mounted"
        );

        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result.map(|()| model.last_committed)
    }

    fn dispatch(model: &mut Model, msg: Message, now_ms: u64, focus_delay: &mut FocusDelay) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg, now_ms, focus_delay);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut focus_delay = FocusDelay::new(super::FOCUS_DELAY_MS);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = elapsed_ms();

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                Self::dispatch(model, Message::Resize(width, height), now_ms, &mut focus_delay);
                needs_render = true;
            }

            if focus_delay.take_ready(now_ms) {
                debug!("focus delay elapsed");
                Self::dispatch(model, Message::FocusInput, now_ms, &mut focus_delay);
                needs_render = true;
            }

            // Report the draft's wrapped height whenever it changes.
            if let Some(rows) = model.pending_content_size() {
                Self::dispatch(
                    model,
                    Message::ContentSizeChanged(rows),
                    now_ms,
                    &mut focus_delay,
                );
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() || focus_delay.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so timers use accurate times.
                let event_ms = elapsed_ms();
                if let Some(msg) =
                    Self::handle_event(event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    Self::dispatch(model, msg, event_ms, &mut focus_delay);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                let mut drained = 0_u32;
                while !model.should_quit && event::poll(Duration::from_millis(0))? {
                    let drain_ms = elapsed_ms();
                    if let Some(msg) =
                        Self::handle_event(event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        drained += 1;
                        Self::dispatch(model, msg, drain_ms, &mut focus_delay);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if model.should_quit {
                info!(saved = model.last_committed.is_some(), "quitting");
                break;
            }

            if needs_render {
                frame_idx += 1;
                let _draw_scope = crate::perf::scope("frame.draw");
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} height={} view={:?}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.field.height(),
                        model.field.view()
                    ),
                );
                needs_render = false;
            }
        }

        Ok(())
    }
}
