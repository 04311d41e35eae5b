// SPDX-License-Identifier: GPL-3.0-only

//! Periodic analysis scheduler
//!
//! A two-state machine (Idle, Armed). While armed, a timer thread runs the
//! supplied tick closure once per interval, rescheduling unconditionally:
//! an empty frame or a disabled detector never stops the cadence. Disarming
//! cancels the pending tick and joins the thread, so no tick body can run
//! after `disarm` returns.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Periodic driver for the detection pass
pub struct AnalysisScheduler {
    stop_tx: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl AnalysisScheduler {
    /// Create an idle scheduler
    pub fn new() -> Self {
        Self {
            stop_tx: None,
            thread_handle: None,
        }
    }

    /// Whether the scheduler is armed
    pub fn is_armed(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Idle → Armed: first tick fires after `interval`, then repeats
    ///
    /// A no-op when already armed.
    pub fn arm<F>(&mut self, interval: Duration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        if self.is_armed() {
            return;
        }

        debug!(interval_ms = interval.as_millis() as u64, "Arming analysis scheduler");
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                // The stop message doubles as the tick timer: waiting on
                // the channel sleeps exactly one interval and wakes
                // immediately on disarm
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("Analysis scheduler thread exiting");
        });

        self.stop_tx = Some(stop_tx);
        self.thread_handle = Some(handle);
    }

    /// Armed → Idle: cancel the pending tick; idempotent
    ///
    /// Joins the timer thread, so an in-flight tick completes before this
    /// returns and no tick starts afterwards.
    pub fn disarm(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
            debug!("Analysis scheduler disarmed");
        }
    }
}

impl Default for AnalysisScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
