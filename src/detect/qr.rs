// SPDX-License-Identifier: GPL-3.0-only

//! QR code detection and decoding
//!
//! Decodes directly from the frame's luma plane with the rqrr crate; no RGB
//! conversion is involved. Most frames contain no code, so an empty result
//! is the expected steady state and is never logged or treated as an error.

use crate::backends::camera::RawFrame;
use crate::backends::camera::format_converters::luma_image;
use crate::detect::types::{DetectionOutcome, DetectorState};
use tracing::{info, trace};

/// QR decoder over the raw luma plane
pub struct QrDecoder {
    state: DetectorState,
}

impl QrDecoder {
    pub fn new() -> Self {
        Self {
            state: DetectorState::default(),
        }
    }

    /// Allow decoding; idempotent while enabled
    pub fn enable(&mut self) {
        self.state = DetectorState::Ready;
    }

    /// Stop decoding
    pub fn disable(&mut self) {
        self.state = DetectorState::Released;
    }

    /// Decode one frame, reporting the first successfully decoded code
    pub fn evaluate(&mut self, frame: &RawFrame) -> Option<DetectionOutcome> {
        if !self.state.is_ready() {
            return None;
        }
        let luma = luma_image(frame)?;

        let mut prepared = rqrr::PreparedImage::prepare(luma);
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, content)) => {
                    info!(content = %content, "QR code decoded");
                    return Some(DetectionOutcome::QrCode(content));
                }
                Err(e) => {
                    // A grid-like region that fails to decode is as normal
                    // as no grid at all
                    trace!(error = %e, "Grid candidate failed to decode");
                }
            }
        }

        None
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
