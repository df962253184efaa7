use tracing::debug;

use crate::app::{App, Message, Model};

use super::event_loop::FocusDelay;

impl App {
    /// Schedule or cancel work that `update` cannot do on its own.
    pub(super) fn handle_message_side_effects(
        model: &Model,
        msg: &Message,
        now_ms: u64,
        focus_delay: &mut FocusDelay,
    ) {
        match msg {
            Message::Tap if model.field.is_editing() && !model.field.is_focused() => {
                debug!(delay_ms = super::FOCUS_DELAY_MS, "focus deferred");
                crate::perf::log_event("focus.queue", format!("at_ms={now_ms}"));
                focus_delay.queue(now_ms);
            }
            Message::Commit | Message::Discard => {
                if focus_delay.is_pending() {
                    crate::perf::log_event("focus.cancel", format!("msg={msg:?}"));
                }
                focus_delay.cancel();
            }
            Message::Quit if model.should_quit => focus_delay.cancel(),
            Message::ContentSizeChanged(rows) => {
                crate::perf::log_event(
                    "field.measure",
                    format!("rows={rows} height={}", model.field.height()),
                );
            }
            _ => {}
        }
    }
}
