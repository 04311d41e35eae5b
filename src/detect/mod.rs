// SPDX-License-Identifier: GPL-3.0-only

//! Frame detection layer
//!
//! Three sibling detectors (motion, face presence, QR) unified only by the
//! outcome observer. The scheduler composes them: once per interval the
//! latched frame is fanned out to each enabled detector in a fixed order, and
//! every produced outcome is delivered immediately.

pub mod face;
pub mod motion;
pub mod qr;
pub mod scheduler;
pub mod types;

pub use face::{FaceBounds, FaceDetector, FaceScanner};
pub use motion::MotionDetector;
pub use qr::QrDecoder;
pub use scheduler::AnalysisScheduler;
pub use types::{DetectionObserver, DetectionOutcome, DetectorState};

use crate::backends::camera::RawFrame;

/// The three detectors evaluated against each latched frame
pub struct DetectorSet {
    pub motion: MotionDetector,
    pub face: FaceScanner,
    pub qr: QrDecoder,
}

impl DetectorSet {
    /// All detectors uninitialized
    pub fn new() -> Self {
        Self {
            motion: MotionDetector::new(),
            face: FaceScanner::new(),
            qr: QrDecoder::new(),
        }
    }

    /// Evaluate enabled detectors in fixed order, delivering each outcome
    ///
    /// Order matters only for outcome delivery within one pass; the
    /// detectors themselves are independent.
    pub fn evaluate(&mut self, frame: &RawFrame, observer: &dyn DetectionObserver) {
        if let Some(outcome) = self.motion.evaluate(frame) {
            outcome.deliver(observer);
        }
        if let Some(outcome) = self.face.evaluate(frame) {
            outcome.deliver(observer);
        }
        if let Some(outcome) = self.qr.evaluate(frame) {
            outcome.deliver(observer);
        }
    }

    /// Release all detectors and clear enablement
    pub fn disable_all(&mut self) {
        self.motion.disable();
        self.face.disable();
        self.qr.disable();
    }
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::new()
    }
}
