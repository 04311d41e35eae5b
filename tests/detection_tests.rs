// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the detection layer
//!
//! Frames are synthesized in memory; no capture hardware is involved.

use camsentry::detect::{DetectorSet, QrDecoder};
use camsentry::{DetectionObserver, DetectionOutcome, PixelFormat, RawFrame};
use qrcode::QrCode;
use std::sync::Mutex;

/// Observer recording outcomes in delivery order
#[derive(Default)]
struct RecordingObserver {
    outcomes: Mutex<Vec<DetectionOutcome>>,
}

impl DetectionObserver for RecordingObserver {
    fn on_too_dark(&self) {
        self.outcomes.lock().unwrap().push(DetectionOutcome::TooDark);
    }
    fn on_motion_detected(&self) {
        self.outcomes
            .lock()
            .unwrap()
            .push(DetectionOutcome::MotionDetected);
    }
    fn on_face_detected(&self) {
        self.outcomes
            .lock()
            .unwrap()
            .push(DetectionOutcome::FaceDetected);
    }
    fn on_qr_code(&self, text: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push(DetectionOutcome::QrCode(text.to_string()));
    }
}

/// Render `content` as a QR code and wrap it in a grayscale frame
fn qr_frame(content: &str) -> RawFrame {
    let code = QrCode::new(content.as_bytes()).expect("encode QR");
    let image = code
        .render::<image::Luma<u8>>()
        .min_dimensions(200, 200)
        .build();
    let (width, height) = image.dimensions();
    RawFrame {
        data: image.into_raw(),
        width,
        height,
        format: PixelFormat::Gray8,
    }
}

/// Same QR luma wrapped as a semi-planar frame with a neutral chroma plane,
/// exercising the luma-plane extraction path the camera produces
fn qr_frame_nv21(content: &str) -> RawFrame {
    let gray = qr_frame(content);
    let pixels = gray.pixel_count();
    let mut data = gray.data;
    data.extend(std::iter::repeat_n(128u8, pixels.div_ceil(2)));
    RawFrame {
        data,
        width: gray.width,
        height: gray.height,
        format: PixelFormat::Nv21,
    }
}

#[test]
fn test_qr_round_trips_to_exact_text() {
    let mut decoder = QrDecoder::new();
    decoder.enable();

    let content = "https://example.com/door/7";
    let outcome = decoder.evaluate(&qr_frame(content));
    assert_eq!(outcome, Some(DetectionOutcome::QrCode(content.to_string())));
}

#[test]
fn test_qr_decodes_from_semi_planar_luma() {
    let mut decoder = QrDecoder::new();
    decoder.enable();

    let content = "WIFI:S:lobby;T:WPA;P:secret;;";
    let outcome = decoder.evaluate(&qr_frame_nv21(content));
    assert_eq!(outcome, Some(DetectionOutcome::QrCode(content.to_string())));
}

#[test]
fn test_frame_without_code_yields_nothing() {
    let mut decoder = QrDecoder::new();
    decoder.enable();

    let blank = RawFrame {
        data: vec![255; 200 * 200],
        width: 200,
        height: 200,
        format: PixelFormat::Gray8,
    };
    assert_eq!(decoder.evaluate(&blank), None);
}

#[test]
fn test_detector_set_delivers_in_fixed_order() {
    let mut detectors = DetectorSet::new();
    detectors.motion.enable(1_000_000_000, 5);
    detectors.qr.enable();

    let observer = RecordingObserver::default();
    // Dark frame carrying a QR code: motion reports first, QR second
    let frame = qr_frame("order-check");
    detectors.evaluate(&frame, &observer);

    let outcomes = observer.outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0], DetectionOutcome::TooDark);
    assert_eq!(
        outcomes[1],
        DetectionOutcome::QrCode("order-check".to_string())
    );
}

#[test]
fn test_disabled_detectors_stay_silent() {
    let mut detectors = DetectorSet::new();
    let observer = RecordingObserver::default();
    detectors.evaluate(&qr_frame("nobody-listens"), &observer);
    assert!(observer.outcomes.lock().unwrap().is_empty());
}
