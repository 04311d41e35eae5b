// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera capture backend
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   publish (async)    ┌──────────────┐
//! │  CaptureSession  │ ───────────────────▶ │  FrameSlot   │
//! │  (delivery thread│                      │ (latest wins)│
//! │   + double buffer)│                     └──────┬───────┘
//! └──────────────────┘                             │ read (periodic)
//!                                                  ▼
//!                                          analysis scheduler
//! ```
//!
//! The capture session publishes at sensor cadence; consumers read whatever
//! frame is currently latched. Neither side waits on the other.

pub mod capture;
pub mod enumeration;
pub mod format_converters;
pub mod frame_slot;
pub mod types;

pub use capture::CaptureSession;
pub use enumeration::{enumerate_cameras, invalidate_camera_cache};
pub use frame_slot::FrameSlot;
pub use types::{CameraDevice, PixelFormat, RawFrame, preview_buffer_size};
