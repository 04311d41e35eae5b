// SPDX-License-Identifier: GPL-3.0-only

//! Capture device enumeration
//!
//! Probing `/dev/video*` nodes is slow enough that callers share one
//! process-wide cache, populated on first use and explicitly invalidated
//! when the device population changes (hotplug).

use super::types::CameraDevice;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

static CAMERA_LIST: OnceLock<Mutex<Option<Vec<CameraDevice>>>> = OnceLock::new();

fn cache() -> &'static Mutex<Option<Vec<CameraDevice>>> {
    CAMERA_LIST.get_or_init(|| Mutex::new(None))
}

/// Enumerate capture devices, serving from the process-wide cache
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    let mut cached = cache().lock().unwrap();
    if let Some(list) = cached.as_ref() {
        return list.clone();
    }

    let list = probe_devices();
    debug!(count = list.len(), "Enumerated capture devices");
    *cached = Some(list.clone());
    list
}

/// Drop the cached device list so the next enumeration re-probes
pub fn invalidate_camera_cache() {
    debug!("Invalidating camera enumeration cache");
    *cache().lock().unwrap() = None;
}

fn probe_devices() -> Vec<CameraDevice> {
    let mut devices: Vec<CameraDevice> = v4l::context::enum_devices()
        .iter()
        .map(|node| CameraDevice {
            index: node.index(),
            name: node
                .name()
                .unwrap_or_else(|| format!("Camera {}", node.index())),
            path: node.path().to_path_buf(),
        })
        .collect();
    devices.sort_by_key(|device| device.index);
    devices
}
