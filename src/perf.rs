//! Opt-in timing scopes and a timestamped event log.
//!
//! Scope timings go through `tracing` so they never scribble over the
//! terminal UI; the event log is a plain file meant for `tail -f`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<EventLog>> = LazyLock::new(|| Mutex::new(EventLog::default()));

/// Times the enclosing block; reports on drop when timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: "notefield::perf", scope = self.name, elapsed_ms, "scope finished");
    }
}

#[derive(Debug)]
struct EventLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

fn event_log() -> MutexGuard<'static, EventLog> {
    EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start (or with `None`, stop) writing events to `path`.
///
/// # Errors
///
/// Fails when the log file cannot be created or its header written.
pub fn set_event_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = event_log();
    log.writer = None;
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "notefield event log start")?;
        writer.flush()?;
        log.start = Instant::now();
        log.writer = Some(writer);
    }
    Ok(())
}

pub fn is_event_log_enabled() -> bool {
    event_log().writer.is_some()
}

/// Append one event line. No-op when the log is off.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = event_log();
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref());
        let _ = writer.flush();
    }
}
