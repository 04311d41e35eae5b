// SPDX-License-Identifier: GPL-3.0-only

//! Capture and detection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings fixed for the lifetime of one capture session
///
/// Changing any value requires stopping the session and starting a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Index of the capture device to open (falls back to 0 if out of range)
    pub camera_index: usize,
    /// Milliseconds between detection passes
    pub check_interval_ms: u64,
    /// Summed-luma floor below which a frame is reported as too dark
    pub min_luma: u32,
    /// Motion tolerance: percentage of luma blocks allowed to change
    /// before motion is declared
    pub motion_leniency: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            check_interval_ms: 1000,
            min_luma: 1000,
            motion_leniency: 10,
        }
    }
}

impl CaptureConfig {
    /// Detection pass interval as a `Duration`
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}
