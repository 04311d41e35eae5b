// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture and analysis engine

use std::fmt;

/// Result type alias for capture operations
pub type CameraResult<T> = Result<T, CameraError>;

/// Capture-side errors
///
/// None of these are fatal to the analysis loop: a session that fails to
/// open degrades to placeholder snapshots and suppressed detector
/// evaluation.
#[derive(Debug, Clone)]
pub enum CameraError {
    /// No capture devices present on the system
    NoCameraFound,
    /// Device exists but could not be opened
    OpenFailed(String),
    /// Device offers no pixel format we can analyze
    FormatNotSupported(String),
    /// I/O error talking to the device
    Io(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::OpenFailed(msg) => write!(f, "Failed to open camera: {}", msg),
            CameraError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
            CameraError::Io(msg) => write!(f, "Camera I/O error: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Io(err.to_string())
    }
}

/// Snapshot export errors
#[derive(Debug, Clone)]
pub enum SnapshotError {
    /// Latched frame is too short or malformed for conversion
    MalformedFrame,
    /// Still-image encoding failed
    EncodingFailed(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::MalformedFrame => write!(f, "Frame is malformed or incomplete"),
            SnapshotError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<image::ImageError> for SnapshotError {
    fn from(err: image::ImageError) -> Self {
        SnapshotError::EncodingFailed(err.to_string())
    }
}
