// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot export
//!
//! Converts the latched frame into a displayable still: a JPEG at fixed
//! quality, or a decoded RGB raster. When no capture session is active (or
//! no frame has arrived yet) a fixed placeholder image is substituted, with
//! the same bytes on every call, so callers can cache or hash it.

use crate::backends::camera::RawFrame;
use crate::backends::camera::format_converters::rgb_image;
use crate::constants::{
    PLACEHOLDER_HEIGHT, PLACEHOLDER_LABEL, PLACEHOLDER_WIDTH, SNAPSHOT_JPEG_QUALITY,
};
use crate::errors::SnapshotError;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

/// Encode the latched frame as a JPEG still
pub fn frame_jpeg(frame: &RawFrame) -> Result<Vec<u8>, SnapshotError> {
    let image = rgb_image(frame).ok_or(SnapshotError::MalformedFrame)?;
    encode_jpeg(&image)
}

/// Decode the latched frame to an RGB raster
pub fn frame_bitmap(frame: &RawFrame) -> Result<RgbImage, SnapshotError> {
    rgb_image(frame).ok_or(SnapshotError::MalformedFrame)
}

/// JPEG encoding of the placeholder image
pub fn placeholder_jpeg() -> Result<Vec<u8>, SnapshotError> {
    encode_jpeg(&placeholder_bitmap())
}

/// The "camera not enabled" placeholder raster
///
/// Near-black background with the label centered, rendered from a built-in
/// 5x7 pixel font so the output carries no font-file dependency and stays
/// byte-identical across calls.
pub fn placeholder_bitmap() -> RgbImage {
    let mut image = RgbImage::from_pixel(
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
        Rgb([12u8, 12u8, 12u8]),
    );

    let scale = 2u32;
    let advance = (GLYPH_WIDTH + 1) * scale;
    let text_width = PLACEHOLDER_LABEL.len() as u32 * advance;
    let text_height = GLYPH_HEIGHT * scale;
    let origin_x = PLACEHOLDER_WIDTH.saturating_sub(text_width) / 2;
    let origin_y = PLACEHOLDER_HEIGHT.saturating_sub(text_height) / 2;

    for (position, character) in PLACEHOLDER_LABEL.chars().enumerate() {
        draw_glyph(
            &mut image,
            character,
            origin_x + position as u32 * advance,
            origin_y,
            scale,
        );
    }

    image
}

fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, SnapshotError> {
    let mut encoded = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut encoded, SNAPSHOT_JPEG_QUALITY);
    encoder.encode_image(image)?;
    Ok(encoded)
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 bitmaps for the characters of the placeholder label, one row per
/// byte, bit 4 = leftmost column
fn glyph_rows(character: char) -> [u8; 7] {
    match character {
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'd' => [0b00001, 0b00001, 0b01111, 0b10001, 0b10001, 0b10001, 0b01111],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10101, 0b10101],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        't' => [0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00100, 0b00011],
        _ => [0; 7],
    }
}

fn draw_glyph(image: &mut RgbImage, character: char, x: u32, y: u32, scale: u32) {
    let rows = glyph_rows(character);
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x + col * scale + dx;
                    let py = y + row as u32 * scale + dy;
                    if px < image.width() && py < image.height() {
                        image.put_pixel(px, py, Rgb([230, 230, 230]));
                    }
                }
            }
        }
    }
}
