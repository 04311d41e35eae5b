// SPDX-License-Identifier: GPL-3.0-only

//! Engine-wide constants

use crate::backends::camera::PixelFormat;
use std::time::Duration;

/// Preview formats tried during negotiation, most preferred first
///
/// Semi-planar 4:2:0 keeps the luma plane contiguous, which the motion and
/// QR detectors read directly; packed YUYV needs a de-interleave step.
pub const FORMAT_PREFERENCE: [PixelFormat; 4] = [
    PixelFormat::Nv21,
    PixelFormat::Nv12,
    PixelFormat::Yuyv,
    PixelFormat::Gray8,
];

/// Preview resolution requested during negotiation
///
/// The device is free to adjust; the accepted format's dimensions are
/// authoritative. SD keeps per-tick conversion cheap at the analysis cadence.
pub const PREVIEW_WIDTH: u32 = 640;
pub const PREVIEW_HEIGHT: u32 = 480;

/// Pause after a failed capture before retrying
pub const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(10);

/// JPEG quality for exported snapshots
pub const SNAPSHOT_JPEG_QUALITY: u8 = 80;

/// Placeholder image dimensions when no session is active
pub const PLACEHOLDER_WIDTH: u32 = 320;
pub const PLACEHOLDER_HEIGHT: u32 = 200;

/// Placeholder image label
pub const PLACEHOLDER_LABEL: &str = "Camera Not Enabled";

/// Motion detection block grid (cells per axis)
///
/// The luma plane is aggregated into `GRID x GRID` block averages; motion is
/// judged on how many blocks change between consecutive frames.
pub const MOTION_GRID_SIZE: u32 = 10;

/// Minimum average-luma delta for a block to count as changed
pub const MOTION_BLOCK_DELTA: u32 = 25;
