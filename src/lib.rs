// SPDX-License-Identifier: GPL-3.0-only

//! camsentry - camera frame ingestion and analysis
//!
//! This library samples raw frames from a V4L2 capture device and runs three
//! independent detectors over each frame at a configurable cadence:
//! ambient-light/motion detection, face presence detection, and QR-code
//! decoding. Results surface through a caller-supplied observer; the latched
//! frame can be exported as a JPEG or RGB still at any time.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: Device enumeration, the V4L2 capture session, and the
//!   single-slot frame buffer the capture thread publishes into
//! - [`detect`]: The three detector adapters, the periodic analysis
//!   scheduler, and the outcome observer interface
//! - [`reader`]: The root object composing capture, detection and export
//! - [`snapshot`]: Still-image export with the inactive-session placeholder
//! - [`config`]: Session configuration
//!
//! # Example
//!
//! ```ignore
//! let mut reader = CameraReader::new();
//! reader.start(0, Duration::from_millis(1000), observer)?;
//! reader.start_motion_detection(1000, 10);
//! reader.start_qr_detection();
//! // ... outcomes arrive on the observer until:
//! reader.stop();
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod detect;
pub mod errors;
pub mod reader;
pub mod snapshot;

// Re-export commonly used types
pub use backends::camera::{
    CameraDevice, PixelFormat, RawFrame, enumerate_cameras, invalidate_camera_cache,
};
pub use config::CaptureConfig;
pub use detect::{
    DetectionObserver, DetectionOutcome, FaceBounds, FaceDetector,
};
pub use errors::{CameraError, SnapshotError};
pub use reader::CameraReader;
