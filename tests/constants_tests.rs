// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use camsentry::PixelFormat;
use camsentry::constants::{
    FORMAT_PREFERENCE, MOTION_GRID_SIZE, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH,
    SNAPSHOT_JPEG_QUALITY,
};

#[test]
fn test_format_preference_prefers_contiguous_luma() {
    // The most preferred formats keep the luma plane directly addressable
    assert_eq!(FORMAT_PREFERENCE[0], PixelFormat::Nv21);
    assert!(FORMAT_PREFERENCE[0].has_contiguous_luma());
    assert!(FORMAT_PREFERENCE.len() >= 2);
}

#[test]
fn test_snapshot_quality_in_jpeg_range() {
    assert!(SNAPSHOT_JPEG_QUALITY > 0 && SNAPSHOT_JPEG_QUALITY <= 100);
}

#[test]
fn test_placeholder_dimensions() {
    assert_eq!((PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT), (320, 200));
}

#[test]
fn test_motion_grid_is_nonzero() {
    assert!(MOTION_GRID_SIZE > 0);
}
