// SPDX-License-Identifier: GPL-3.0-only

//! Aggregate-luma motion detection
//!
//! The luma plane is aggregated into a fixed grid of block averages; motion
//! is declared when the percentage of blocks whose average moved beyond a
//! delta threshold exceeds the configured leniency. Before the motion check,
//! the summed luma is compared against the configured minimum: a frame too
//! dark to trust the motion signal reports [`DetectionOutcome::TooDark`]
//! instead, never both.

use crate::backends::camera::RawFrame;
use crate::backends::camera::format_converters::luma_plane;
use crate::constants::{MOTION_BLOCK_DELTA, MOTION_GRID_SIZE};
use crate::detect::types::{DetectionOutcome, DetectorState};
use tracing::debug;

/// Block-averaged luma state of one frame
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockGrid {
    cols: u32,
    rows: u32,
    averages: Vec<u32>,
}

impl BlockGrid {
    fn from_luma(luma: &[u8], width: u32, height: u32) -> Self {
        let cols = MOTION_GRID_SIZE.min(width.max(1));
        let rows = MOTION_GRID_SIZE.min(height.max(1));
        let mut averages = Vec::with_capacity((cols * rows) as usize);

        for block_row in 0..rows {
            let y0 = block_row * height / rows;
            let y1 = (block_row + 1) * height / rows;
            for block_col in 0..cols {
                let x0 = block_col * width / cols;
                let x1 = (block_col + 1) * width / cols;

                let mut sum: u64 = 0;
                for y in y0..y1 {
                    let row = (y * width) as usize;
                    for x in x0..x1 {
                        sum += luma[row + x as usize] as u64;
                    }
                }
                let pixels = ((y1 - y0) * (x1 - x0)).max(1) as u64;
                averages.push((sum / pixels) as u32);
            }
        }

        Self {
            cols,
            rows,
            averages,
        }
    }

    /// Percentage of blocks whose average moved beyond the delta threshold
    fn changed_percent(&self, previous: &Self) -> u32 {
        let changed = self
            .averages
            .iter()
            .zip(&previous.averages)
            .filter(|(current, prior)| current.abs_diff(**prior) > MOTION_BLOCK_DELTA)
            .count() as u32;
        changed * 100 / self.averages.len().max(1) as u32
    }
}

/// Ambient-light and motion detector
pub struct MotionDetector {
    state: DetectorState,
    min_luma: u32,
    leniency: u32,
    previous: Option<BlockGrid>,
}

impl MotionDetector {
    pub fn new() -> Self {
        Self {
            state: DetectorState::default(),
            min_luma: 0,
            leniency: 0,
            previous: None,
        }
    }

    /// Allocate detection state; idempotent while enabled
    ///
    /// `min_luma` is the darkness floor for the whole frame; `leniency` is
    /// the percentage of blocks allowed to change before motion is declared
    /// (higher tolerates more sensor noise).
    pub fn enable(&mut self, min_luma: u32, leniency: u32) {
        if self.state.is_ready() {
            return;
        }
        debug!(min_luma, leniency, "Enabling motion detection");
        self.min_luma = min_luma;
        self.leniency = leniency.min(100);
        self.previous = None;
        self.state = DetectorState::Ready;
    }

    /// Release detection state
    pub fn disable(&mut self) {
        self.previous = None;
        self.state = DetectorState::Released;
    }

    /// Judge one frame; at most one outcome per call
    pub fn evaluate(&mut self, frame: &RawFrame) -> Option<DetectionOutcome> {
        if !self.state.is_ready() {
            return None;
        }
        let luma = luma_plane(frame)?;

        let luma_sum: u64 = luma.iter().map(|&y| y as u64).sum();
        if luma_sum < self.min_luma as u64 {
            return Some(DetectionOutcome::TooDark);
        }

        let current = BlockGrid::from_luma(&luma, frame.width, frame.height);
        let previous = self.previous.replace(current.clone());
        let Some(previous) = previous else {
            // First frame only seeds the comparison state
            return None;
        };
        if previous.cols != current.cols || previous.rows != current.rows {
            return None;
        }

        let changed = current.changed_percent(&previous);
        if changed > self.leniency {
            debug!(changed_percent = changed, "Motion detected");
            Some(DetectionOutcome::MotionDetected)
        } else {
            None
        }
    }
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new()
    }
}
