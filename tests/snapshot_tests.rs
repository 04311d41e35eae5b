// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for snapshot export

use camsentry::CameraReader;
use camsentry::constants::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};

#[test]
fn test_no_session_yields_placeholder_jpeg() {
    let reader = CameraReader::new();
    let jpeg = reader.jpeg().expect("placeholder encodes");

    // JPEG magic bytes
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&jpeg).expect("decodes").to_rgb8();
    assert_eq!(decoded.dimensions(), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
}

#[test]
fn test_placeholder_bytes_are_stable_across_calls_and_readers() {
    let first = CameraReader::new().jpeg().unwrap();
    let second = CameraReader::new().jpeg().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_session_bitmap_matches_placeholder_dimensions() {
    let reader = CameraReader::new();
    let bitmap = reader.bitmap().unwrap();
    assert_eq!(bitmap.dimensions(), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
}

#[test]
fn test_stop_without_start_keeps_placeholder_available() {
    let mut reader = CameraReader::new();
    reader.stop();
    assert!(reader.jpeg().is_ok());
}
