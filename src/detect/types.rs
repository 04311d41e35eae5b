// SPDX-License-Identifier: GPL-3.0-only

//! Core types for detection results
//!
//! Outcomes are ephemeral: delivered to the observer as they are produced
//! and never retained by the engine.

use serde::{Deserialize, Serialize};

/// Typed outcome of one detector evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionOutcome {
    /// Summed luma fell below the configured minimum; motion was not judged
    TooDark,
    /// Aggregate luma change between consecutive frames exceeded tolerance
    MotionDetected,
    /// At least one face present in the frame
    FaceDetected,
    /// A QR code was decoded to text
    QrCode(String),
}

impl DetectionOutcome {
    /// Deliver this outcome to an observer
    pub fn deliver(&self, observer: &dyn DetectionObserver) {
        match self {
            DetectionOutcome::TooDark => observer.on_too_dark(),
            DetectionOutcome::MotionDetected => observer.on_motion_detected(),
            DetectionOutcome::FaceDetected => observer.on_face_detected(),
            DetectionOutcome::QrCode(text) => observer.on_qr_code(text),
        }
    }
}

/// Application-layer callback for detection outcomes
///
/// All methods are fire-and-forget and are invoked from the analysis
/// scheduler's thread. Default implementations ignore the event, so
/// observers implement only what they care about.
pub trait DetectionObserver: Send + Sync {
    fn on_too_dark(&self) {}
    fn on_motion_detected(&self) {}
    fn on_face_detected(&self) {}
    fn on_qr_code(&self, _text: &str) {}
}

/// Lifecycle of a detector's backing state
///
/// Checked before every evaluation instead of scattering nullable checks at
/// call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    /// `enable` has not been called yet
    #[default]
    Uninitialized,
    /// Backing state allocated, evaluations allowed
    Ready,
    /// `disable` released the backing state
    Released,
}

impl DetectorState {
    /// Whether evaluations may run
    pub fn is_ready(&self) -> bool {
        matches!(self, DetectorState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingObserver {
        qr: AtomicUsize,
        dark: AtomicUsize,
    }

    impl DetectionObserver for CountingObserver {
        fn on_too_dark(&self) {
            self.dark.fetch_add(1, Ordering::SeqCst);
        }
        fn on_qr_code(&self, text: &str) {
            assert_eq!(text, "hello");
            self.qr.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_outcomes_route_to_matching_callback() {
        let observer = CountingObserver::default();
        DetectionOutcome::TooDark.deliver(&observer);
        DetectionOutcome::QrCode("hello".into()).deliver(&observer);
        // MotionDetected falls through to the default no-op
        DetectionOutcome::MotionDetected.deliver(&observer);

        assert_eq!(observer.dark.load(Ordering::SeqCst), 1);
        assert_eq!(observer.qr.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_readiness_states() {
        assert!(!DetectorState::Uninitialized.is_ready());
        assert!(DetectorState::Ready.is_ready());
        assert!(!DetectorState::Released.is_ready());
    }
}
