//! Terminal presentation helpers.

use std::io::Write;

use klock_core::notify::{Notifier, TracingNotifier};
use klock_core::storage::NotificationsConfig;
use klock_core::{Event, FocusSession};

/// Prints lifecycle notices to stderr, the terminal's stand-in for a toast.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: &Event) {
        TracingNotifier.notify(event);
        if let Some(notice) = event.notice() {
            eprintln!("[{}] {notice}", toast_marker(event));
        }
    }
}

/// Toasts on the console when enabled; otherwise events are only logged.
pub fn notifier(config: &NotificationsConfig) -> Box<dyn Notifier> {
    if config.enabled {
        Box::new(ConsoleNotifier)
    } else {
        Box::new(TracingNotifier)
    }
}

fn toast_marker(event: &Event) -> &'static str {
    if event.is_success() {
        "done"
    } else {
        "info"
    }
}

pub fn progress_bar(pct: f64, width: u32) -> String {
    let width = width.max(1) as usize;
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// `12 min 05 sec`, as on the session dial.
pub fn remaining_label(session: &FocusSession) -> String {
    let (minutes, seconds) = session.remaining_parts();
    format!("{minutes} min {seconds:02} sec")
}

/// Overwrite the current terminal line with the countdown.
pub fn render_countdown(session: &FocusSession, width: u32) {
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        "\r{}  {} {:>3.0}%",
        remaining_label(session),
        progress_bar(session.progress_pct(), width),
        session.progress_pct()
    );
    let _ = out.flush();
}
