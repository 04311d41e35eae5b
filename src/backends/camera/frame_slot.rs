// SPDX-License-Identifier: GPL-3.0-only

//! Single-slot latest-wins frame channel
//!
//! The capture delivery thread publishes at sensor cadence; the analysis
//! scheduler reads at its own cadence. Frames not read before the next
//! delivery are silently superseded. One mutex guarding a reference swap is
//! all the synchronization needed: one writer, one reader, negligible
//! contention.

use super::types::RawFrame;
use std::sync::{Arc, Mutex};

/// Holds the most recently delivered frame, or the empty sentinel
pub struct FrameSlot {
    latest: Mutex<Arc<RawFrame>>,
}

impl FrameSlot {
    /// Create a slot holding the empty sentinel
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(Arc::new(RawFrame::empty())),
        }
    }

    /// Replace the held frame, returning the previous one
    ///
    /// The returned frame is the delivery path's recycling handle: when the
    /// caller holds the only remaining reference, its buffer can be reused
    /// for the next capture.
    pub fn publish(&self, frame: Arc<RawFrame>) -> Arc<RawFrame> {
        let mut latest = self.latest.lock().unwrap();
        std::mem::replace(&mut *latest, frame)
    }

    /// Shared reference to the currently latched frame
    ///
    /// Readers hold the reference for the duration of one analysis pass;
    /// a concurrent publish never tears the frame out from under them.
    pub fn read(&self) -> Arc<RawFrame> {
        self.latest.lock().unwrap().clone()
    }

    /// Reset to the empty sentinel (session stopped)
    pub fn clear(&self) {
        self.publish(Arc::new(RawFrame::empty()));
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
