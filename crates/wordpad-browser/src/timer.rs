//! The repeating autosave timer.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_time::Instant;

use crate::BrowserWordpad;

/// Drives `Wordpad::autosave_tick`. Dropping it (or calling `stop`) cancels
/// the interval.
///
/// The timer polls at a tenth of the autosave period and lets `tick` decide
/// when a save is due, so late timer callbacks never skip a whole period.
#[derive(Debug)]
pub struct AutosaveTimer {
    interval: Interval,
}

impl AutosaveTimer {
    pub fn start(editor: Rc<RefCell<BrowserWordpad>>, period_ms: u32) -> Self {
        let poll_ms = (period_ms / 10).max(100);
        let interval = Interval::new(poll_ms, move || {
            // Skip this tick if a toolbar handler is running.
            let Ok(mut editor) = editor.try_borrow_mut() else {
                return;
            };
            if let Err(err) = editor.autosave_tick(Instant::now()) {
                tracing::warn!(error = %err, "autosave tick failed");
            }
        });
        tracing::debug!(period_ms, poll_ms, "autosave timer started");
        Self { interval }
    }

    pub fn stop(self) {
        self.interval.cancel();
        tracing::debug!("autosave timer stopped");
    }
}
