// SPDX-License-Identifier: GPL-3.0-only

//! Camera reader: the engine's root object
//!
//! Ties the capture session, the frame slot, the detector set, the analysis
//! scheduler and the snapshot exporter together behind the operations the
//! application layer calls: start/stop the session, switch individual
//! detectors on, and export stills.

use crate::backends::camera::{CaptureSession, FrameSlot, RawFrame};
use crate::detect::{AnalysisScheduler, DetectionObserver, DetectorSet, FaceDetector};
use crate::errors::{CameraResult, SnapshotError};
use crate::snapshot;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error};

/// Periodic camera sampling and analysis engine
///
/// One reader drives at most one capture session at a time. `start` is
/// idempotent while a session exists; `stop` is idempotent always.
pub struct CameraReader {
    slot: Arc<FrameSlot>,
    session: Option<CaptureSession>,
    detectors: Arc<Mutex<DetectorSet>>,
    scheduler: AnalysisScheduler,
}

impl CameraReader {
    /// Create a reader with no active session and all detectors off
    pub fn new() -> Self {
        Self {
            slot: Arc::new(FrameSlot::new()),
            session: None,
            detectors: Arc::new(Mutex::new(DetectorSet::new())),
            scheduler: AnalysisScheduler::new(),
        }
    }

    /// Open the capture session and arm the periodic detection pass
    ///
    /// When no usable device exists the error is returned after the
    /// scheduler is still armed: detection passes then see only the empty
    /// frame and stay quiet, while snapshots fall back to the placeholder.
    /// Calling `start` with a session already open is a no-op.
    pub fn start(
        &mut self,
        camera_index: usize,
        check_interval: Duration,
        observer: Arc<dyn DetectionObserver>,
    ) -> CameraResult<()> {
        debug!(camera_index, "start called");

        let open_result = if self.session.is_none() {
            match CaptureSession::open(camera_index, Arc::clone(&self.slot)) {
                Ok(session) => {
                    self.session = Some(session);
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "No usable capture device; continuing without frames");
                    Err(e)
                }
            }
        } else {
            Ok(())
        };

        let slot = Arc::clone(&self.slot);
        let detectors = Arc::clone(&self.detectors);
        self.scheduler.arm(check_interval, move || {
            run_detection_pass(&slot, &detectors, observer.as_ref());
        });

        open_result
    }

    /// Enable ambient-light and motion detection
    pub fn start_motion_detection(&self, min_luma: u32, leniency: u32) {
        debug!("start_motion_detection called");
        self.detectors.lock().unwrap().motion.enable(min_luma, leniency);
    }

    /// Enable face presence detection with the supplied backend
    pub fn start_face_detection(&self, detector: Box<dyn FaceDetector>) {
        debug!("start_face_detection called");
        self.detectors.lock().unwrap().face.enable(detector);
    }

    /// Enable QR code decoding
    pub fn start_qr_detection(&self) {
        debug!("start_qr_detection called");
        self.detectors.lock().unwrap().qr.enable();
    }

    /// Disarm the scheduler, release all detectors, close the device
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        debug!("stop called");

        self.scheduler.disarm();
        self.detectors.lock().unwrap().disable_all();

        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        self.slot.clear();
    }

    /// Whether a capture session is currently open
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Current frame as a JPEG still, or the placeholder when inactive
    pub fn jpeg(&self) -> Result<Vec<u8>, SnapshotError> {
        match self.latched_frame() {
            Some(frame) => snapshot::frame_jpeg(&frame),
            None => snapshot::placeholder_jpeg(),
        }
    }

    /// Current frame as an RGB raster, or the placeholder when inactive
    pub fn bitmap(&self) -> Result<image::RgbImage, SnapshotError> {
        match self.latched_frame() {
            Some(frame) => snapshot::frame_bitmap(&frame),
            None => Ok(snapshot::placeholder_bitmap()),
        }
    }

    /// The latched frame, if a session is active and has delivered one
    fn latched_frame(&self) -> Option<Arc<RawFrame>> {
        if self.session.is_none() {
            return None;
        }
        let frame = self.slot.read();
        if frame.is_empty() { None } else { Some(frame) }
    }
}

impl Default for CameraReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CameraReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One scheduler tick: fan the latched frame out to the enabled detectors
///
/// An empty slot (no session, or no delivery yet) suppresses evaluation
/// entirely; the tick still counts toward the cadence.
fn run_detection_pass(
    slot: &FrameSlot,
    detectors: &Mutex<DetectorSet>,
    observer: &dyn DetectionObserver,
) {
    let frame = slot.read();
    if frame.is_empty() {
        return;
    }
    detectors.lock().unwrap().evaluate(&frame, observer);
}
