// SPDX-License-Identifier: GPL-3.0-only

//! Pixel format conversion utilities
//!
//! Converts raw preview frames to the representations the detectors and the
//! snapshot exporter consume: a bare luma plane for motion and QR analysis,
//! and an RGB raster for face detection and JPEG export. All converters
//! return `None` on short or malformed buffers so a bad frame degrades to a
//! skipped analysis pass instead of a fault.

use super::types::{PixelFormat, RawFrame};
use image::{GrayImage, RgbImage};

/// Extract the per-pixel luma plane from a frame
///
/// Semi-planar and grayscale formats expose their Y plane as the leading
/// `width * height` bytes; packed YUYV interleaves luma at every even byte.
pub fn luma_plane(frame: &RawFrame) -> Option<Vec<u8>> {
    if frame.is_empty() {
        return None;
    }
    let pixels = frame.pixel_count();

    if frame.format.has_contiguous_luma() {
        if frame.data.len() < pixels {
            return None;
        }
        return Some(frame.data[..pixels].to_vec());
    }

    match frame.format {
        PixelFormat::Yuyv => {
            if frame.data.len() < pixels * 2 {
                return None;
            }
            Some(frame.data.iter().step_by(2).take(pixels).copied().collect())
        }
        _ => None,
    }
}

/// Luma plane as a grayscale image, for decoders that want one
pub fn luma_image(frame: &RawFrame) -> Option<GrayImage> {
    let luma = luma_plane(frame)?;
    GrayImage::from_raw(frame.width, frame.height, luma)
}

/// Convert a frame to an RGB raster
///
/// Uses BT.601 coefficients for the YUV formats.
pub fn rgb_image(frame: &RawFrame) -> Option<RgbImage> {
    if frame.is_empty() {
        return None;
    }
    match frame.format {
        PixelFormat::Nv21 => semi_planar_to_rgb(frame, true),
        PixelFormat::Nv12 => semi_planar_to_rgb(frame, false),
        PixelFormat::Yuyv => yuyv_to_rgb(frame),
        PixelFormat::Gray8 => {
            let luma = luma_plane(frame)?;
            let mut rgb = Vec::with_capacity(luma.len() * 3);
            for y in luma {
                rgb.extend_from_slice(&[y, y, y]);
            }
            RgbImage::from_raw(frame.width, frame.height, rgb)
        }
    }
}

/// BT.601 YUV to RGB for one pixel
fn yuv_to_rgb(y: f32, u: f32, v: f32) -> [u8; 3] {
    let r = (y + 1.402 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344 * (u - 128.0) - 0.714 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * (u - 128.0)).clamp(0.0, 255.0) as u8;
    [r, g, b]
}

/// NV21/NV12: full Y plane followed by one interleaved chroma plane at
/// quarter resolution. `v_first` selects NV21's VU ordering over NV12's UV.
fn semi_planar_to_rgb(frame: &RawFrame, v_first: bool) -> Option<RgbImage> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let pixels = width * height;
    // Chroma rows cover two luma rows each
    let chroma_len = width * height.div_ceil(2);
    if frame.data.len() < pixels + chroma_len {
        return None;
    }

    let (luma, chroma) = frame.data.split_at(pixels);
    let mut rgb = Vec::with_capacity(pixels * 3);

    for row in 0..height {
        for col in 0..width {
            let y = luma[row * width + col] as f32;
            let pair = (row / 2) * width + (col / 2) * 2;
            let (u, v) = if v_first {
                (chroma[pair + 1] as f32, chroma[pair] as f32)
            } else {
                (chroma[pair] as f32, chroma[pair + 1] as f32)
            };
            rgb.extend_from_slice(&yuv_to_rgb(y, u, v));
        }
    }

    RgbImage::from_raw(frame.width, frame.height, rgb)
}

/// YUYV: each 4-byte group `Y0 U Y1 V` encodes 2 pixels sharing chroma
fn yuyv_to_rgb(frame: &RawFrame) -> Option<RgbImage> {
    let pixels = frame.pixel_count();
    let expected = pixels * 2;
    if frame.data.len() < expected {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixels * 3);
    for chunk in frame.data[..expected].chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32;

        rgb.extend_from_slice(&yuv_to_rgb(y0, u, v));
        rgb.extend_from_slice(&yuv_to_rgb(y1, u, v));
    }

    RgbImage::from_raw(frame.width, frame.height, rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NV21 frame with a uniform luma plane and neutral chroma
    fn nv21_frame(width: u32, height: u32, luma: u8) -> RawFrame {
        let pixels = (width * height) as usize;
        let mut data = vec![luma; pixels];
        data.extend(std::iter::repeat_n(128u8, pixels / 2));
        RawFrame {
            data,
            width,
            height,
            format: PixelFormat::Nv21,
        }
    }

    #[test]
    fn test_luma_plane_from_semi_planar() {
        let frame = nv21_frame(4, 4, 200);
        let luma = luma_plane(&frame).unwrap();
        assert_eq!(luma.len(), 16);
        assert!(luma.iter().all(|&y| y == 200));
    }

    #[test]
    fn test_luma_plane_from_yuyv_takes_even_bytes() {
        // Two pixels: Y0=10 U=128 Y1=20 V=128
        let frame = RawFrame {
            data: vec![10, 128, 20, 128],
            width: 2,
            height: 1,
            format: PixelFormat::Yuyv,
        };
        assert_eq!(luma_plane(&frame).unwrap(), vec![10, 20]);
    }

    #[test]
    fn test_short_frame_yields_none() {
        let frame = RawFrame {
            data: vec![0; 7],
            width: 4,
            height: 4,
            format: PixelFormat::Nv21,
        };
        assert!(luma_plane(&frame).is_none());
        assert!(rgb_image(&frame).is_none());
        assert!(luma_plane(&RawFrame::empty()).is_none());
    }

    #[test]
    fn test_neutral_chroma_converts_to_gray() {
        let frame = nv21_frame(4, 4, 100);
        let rgb = rgb_image(&frame).unwrap();
        for pixel in rgb.pixels() {
            // R == G == B within rounding of the BT.601 matrix
            let [r, g, b] = pixel.0;
            assert!(r.abs_diff(g) <= 3 && g.abs_diff(b) <= 3);
        }
    }

    #[test]
    fn test_gray8_replicates_channels() {
        let frame = RawFrame {
            data: vec![77; 4],
            width: 2,
            height: 2,
            format: PixelFormat::Gray8,
        };
        let rgb = rgb_image(&frame).unwrap();
        assert!(rgb.pixels().all(|p| p.0 == [77, 77, 77]));
    }
}
