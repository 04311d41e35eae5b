// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 capture session
//!
//! Owns the device handle and the delivery thread. Each captured frame is
//! copied into one of two preallocated buffers and published into the
//! [`FrameSlot`]; the buffer previously latched in the slot is reclaimed for
//! the next capture once no reader still holds it. Delivery never blocks on
//! analysis, and analysis never blocks on delivery.

use super::enumeration::enumerate_cameras;
use super::frame_slot::FrameSlot;
use super::types::{PixelFormat, RawFrame, allocate_preview_buffers, preview_buffer_size};
use crate::constants::{CAPTURE_RETRY_DELAY, FORMAT_PREFERENCE, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use crate::errors::{CameraError, CameraResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format};

/// An open capture device with a running delivery thread
pub struct CaptureSession {
    device_index: usize,
    width: u32,
    height: u32,
    format: PixelFormat,
    buffer_size: usize,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Open a device and start continuous delivery into `slot`
    ///
    /// Falls back to device index 0 when `requested_index` is out of range
    /// of the enumerated device list. Fails (rather than panicking) when no
    /// device can be opened or the device offers no analyzable format.
    pub fn open(requested_index: usize, slot: Arc<FrameSlot>) -> CameraResult<Self> {
        let cameras = enumerate_cameras();
        if cameras.is_empty() {
            return Err(CameraError::NoCameraFound);
        }

        let device_index = if cameras.iter().any(|c| c.index == requested_index) {
            requested_index
        } else {
            warn!(
                requested = requested_index,
                "Requested camera index out of range, falling back to device 0"
            );
            0
        };

        let device = Device::new(device_index)
            .map_err(|e| CameraError::OpenFailed(format!("device {}: {}", device_index, e)))?;

        let format = negotiate_format(&device)?;
        let pixel_format = PixelFormat::from_fourcc(format.fourcc).ok_or_else(|| {
            CameraError::FormatNotSupported(format!("device reports {}", format.fourcc))
        })?;

        let width = format.width;
        let height = format.height;
        let buffer_size = preview_buffer_size(width, height, pixel_format);

        info!(
            device = device_index,
            width,
            height,
            format = %pixel_format,
            buffer_size,
            "Starting capture session"
        );

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);
        let thread_handle = thread::Builder::new()
            .name("frame-delivery".into())
            .spawn(move || {
                if let Err(e) = delivery_loop(
                    device,
                    width,
                    height,
                    pixel_format,
                    buffer_size,
                    slot,
                    running_clone,
                ) {
                    warn!(error = %e, "Frame delivery loop failed");
                }
            })
            .map_err(|e| CameraError::Io(e.to_string()))?;

        Ok(Self {
            device_index,
            width,
            height,
            format: pixel_format,
            buffer_size,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// Stop delivery and release the device
    ///
    /// Joins the delivery thread, so no frame is published after this
    /// returns; dropping the thread's device handle closes it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            match handle.join() {
                Ok(_) => info!(device = self.device_index, "Capture session stopped"),
                Err(_) => warn!("Frame delivery thread panicked"),
            }
        }
    }

    /// Negotiated frame width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Negotiated frame height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Negotiated pixel format
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Size of each of the two delivery buffers
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        // Don't join in drop; the thread exits on its own
    }
}

/// Ask the device for each preferred format in turn, else keep its current
/// format if we can analyze it
///
/// The preview resolution is requested alongside the FourCC; the accepted
/// format's dimensions are authoritative, whatever the device adjusted to.
fn negotiate_format(device: &Device) -> CameraResult<Format> {
    let current = device.format()?;

    for preference in FORMAT_PREFERENCE {
        let mut wanted = current.clone();
        wanted.width = PREVIEW_WIDTH;
        wanted.height = PREVIEW_HEIGHT;
        wanted.fourcc = preference.fourcc();
        if let Ok(accepted) = device.set_format(&wanted)
            && accepted.fourcc == preference.fourcc()
        {
            debug!(
                format = %preference,
                width = accepted.width,
                height = accepted.height,
                "Negotiated preview format"
            );
            return Ok(accepted);
        }
    }

    if PixelFormat::from_fourcc(current.fourcc).is_some() {
        debug!(fourcc = %current.fourcc, "Keeping device's current format");
        return Ok(current);
    }

    Err(CameraError::FormatNotSupported(format!(
        "device offers {} only",
        current.fourcc
    )))
}

/// Delivery thread body: capture, copy into the spare buffer, publish
fn delivery_loop(
    device: Device,
    width: u32,
    height: u32,
    format: PixelFormat,
    buffer_size: usize,
    slot: Arc<FrameSlot>,
    running: Arc<AtomicBool>,
) -> CameraResult<()> {
    let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, 2)
        .map_err(|e| CameraError::Io(format!("buffer stream: {}", e)))?;

    // Two-buffer pool: one latched in the slot, one receiving the next
    // delivery. A reader holding the latched frame past the next delivery
    // degrades to a fresh allocation instead of a torn write.
    let [first, second] = allocate_preview_buffers(buffer_size);
    let mut pool = vec![first, second];
    let mut frame_count: u64 = 0;

    while running.load(Ordering::SeqCst) {
        match stream.next() {
            Ok((captured, _meta)) => {
                frame_count += 1;

                let mut backing = pool.pop().unwrap_or_else(|| vec![0u8; buffer_size]);
                let len = captured.len().min(buffer_size);
                backing.clear();
                backing.extend_from_slice(&captured[..len]);

                let previous = slot.publish(Arc::new(RawFrame {
                    data: backing,
                    width,
                    height,
                    format,
                }));

                // Reclaim the superseded buffer if no reader holds it
                if let Some(frame) = Arc::into_inner(previous)
                    && frame.data.capacity() >= buffer_size
                {
                    pool.push(frame.data);
                }

                if frame_count % 300 == 0 {
                    debug!(frame = frame_count, bytes = len, "Frames delivered");
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to capture frame");
                thread::sleep(CAPTURE_RETRY_DELAY);
            }
        }
    }

    debug!("Frame delivery loop exiting");
    Ok(())
}
