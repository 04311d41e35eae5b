// SPDX-License-Identifier: GPL-3.0-only

//! Face presence detection
//!
//! The engine does not ship a face-detection algorithm; callers plug one in
//! behind the [`FaceDetector`] trait (ONNX, dlib, a vendor SDK). The scanner
//! owns the conversion of raw frames to an RGB raster, the prominent-face
//! selection, and the readiness guard for backends that initialize lazily.

use crate::backends::camera::RawFrame;
use crate::backends::camera::format_converters::rgb_image;
use crate::detect::types::{DetectionOutcome, DetectorState};
use image::RgbImage;
use tracing::debug;

/// Bounding box of a detected face within an image
#[derive(Debug, Clone)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels)
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels)
    pub y: f64,
    /// Width of the bounding box (pixels)
    pub width: f64,
    /// Height of the bounding box (pixels)
    pub height: f64,
    /// Detection confidence score
    pub confidence: f64,
}

impl FaceBounds {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Pluggable face detection backend
///
/// Implementations may be stateful (e.g., tracking across frames), hence
/// `&mut self`. A backend whose library initializes asynchronously reports
/// `is_operational() == false` until it is usable; the scanner silently
/// skips those cycles.
pub trait FaceDetector: Send {
    /// Whether the backing library has finished initializing
    fn is_operational(&self) -> bool {
        true
    }

    /// Detect faces in an RGB raster
    fn detect(&mut self, image: &RgbImage) -> Vec<FaceBounds>;
}

/// Face presence scanner wrapping a pluggable detector
pub struct FaceScanner {
    state: DetectorState,
    detector: Option<Box<dyn FaceDetector>>,
}

impl FaceScanner {
    pub fn new() -> Self {
        Self {
            state: DetectorState::default(),
            detector: None,
        }
    }

    /// Install the detection backend; idempotent while enabled
    pub fn enable(&mut self, detector: Box<dyn FaceDetector>) {
        if self.state.is_ready() {
            return;
        }
        debug!("Enabling face detection");
        self.detector = Some(detector);
        self.state = DetectorState::Ready;
    }

    /// Release the detection backend
    pub fn disable(&mut self) {
        self.detector = None;
        self.state = DetectorState::Released;
    }

    /// Judge one frame, considering only the most prominent face
    pub fn evaluate(&mut self, frame: &RawFrame) -> Option<DetectionOutcome> {
        if !self.state.is_ready() {
            return None;
        }
        let detector = self.detector.as_mut()?;
        if !detector.is_operational() {
            // Lazy backend still initializing; skip this cycle
            return None;
        }

        let image = rgb_image(frame)?;
        let faces = detector.detect(&image);
        let prominent = faces
            .into_iter()
            .max_by(|a, b| a.area().total_cmp(&b.area()))?;

        debug!(
            confidence = prominent.confidence,
            width = prominent.width,
            height = prominent.height,
            "Face detected"
        );
        Some(DetectionOutcome::FaceDetected)
    }
}

impl Default for FaceScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::PixelFormat;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct StubDetector {
        operational: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
        faces: usize,
    }

    impl FaceDetector for StubDetector {
        fn is_operational(&self) -> bool {
            self.operational.load(Ordering::SeqCst)
        }

        fn detect(&mut self, _image: &RgbImage) -> Vec<FaceBounds> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (0..self.faces)
                .map(|i| FaceBounds {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0 + i as f64,
                    height: 10.0,
                    confidence: 0.9,
                })
                .collect()
        }
    }

    fn frame() -> RawFrame {
        RawFrame {
            data: vec![128; 64],
            width: 8,
            height: 8,
            format: PixelFormat::Gray8,
        }
    }

    fn stub(faces: usize) -> (StubDetector, Arc<AtomicBool>, Arc<AtomicUsize>) {
        let operational = Arc::new(AtomicBool::new(true));
        let calls = Arc::new(AtomicUsize::new(0));
        (
            StubDetector {
                operational: Arc::clone(&operational),
                calls: Arc::clone(&calls),
                faces,
            },
            operational,
            calls,
        )
    }

    #[test]
    fn test_face_present_is_reported() {
        let mut scanner = FaceScanner::new();
        let (detector, _, _) = stub(2);
        scanner.enable(Box::new(detector));
        assert_eq!(
            scanner.evaluate(&frame()),
            Some(DetectionOutcome::FaceDetected)
        );
    }

    #[test]
    fn test_no_faces_no_outcome() {
        let mut scanner = FaceScanner::new();
        let (detector, _, _) = stub(0);
        scanner.enable(Box::new(detector));
        assert_eq!(scanner.evaluate(&frame()), None);
    }

    #[test]
    fn test_not_operational_skips_cycle() {
        let mut scanner = FaceScanner::new();
        let (detector, operational, calls) = stub(1);
        scanner.enable(Box::new(detector));

        operational.store(false, Ordering::SeqCst);
        assert_eq!(scanner.evaluate(&frame()), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Backend finished initializing
        operational.store(true, Ordering::SeqCst);
        assert_eq!(
            scanner.evaluate(&frame()),
            Some(DetectionOutcome::FaceDetected)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disabled_scanner_never_calls_backend() {
        let mut scanner = FaceScanner::new();
        let (detector, _, calls) = stub(1);
        scanner.enable(Box::new(detector));
        scanner.disable();
        assert_eq!(scanner.evaluate(&frame()), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
