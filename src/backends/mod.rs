// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for hardware capture
//!
//! The backend layer owns everything that talks to the platform: device
//! enumeration, the V4L2 capture session, and the frame slot the capture
//! thread and the analysis scheduler synchronize through.

pub mod camera;
