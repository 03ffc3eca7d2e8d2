// Pure layout helpers shared by the canvas resize handler and the export
// overlay. No browser types so they can be tested on the host.

use visualizer_core::AspectRatio;

use crate::constants::{EXPORT_OVERLAY_TITLE, MIN_BACKING_PX};

/// CSS box and device-pixel backing size for the canvas inside its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    pub css_width: f64,
    pub css_height: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

pub fn canvas_layout(
    aspect: AspectRatio,
    parent_width: f64,
    parent_height: f64,
    device_pixel_ratio: f64,
) -> CanvasLayout {
    let (css_width, css_height) = aspect.fit(parent_width.max(0.0), parent_height.max(0.0));
    let dpr = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    CanvasLayout {
        css_width,
        css_height,
        backing_width: ((css_width * dpr) as u32).max(MIN_BACKING_PX),
        backing_height: ((css_height * dpr) as u32).max(MIN_BACKING_PX),
    }
}

pub fn progress_label(percent: f32) -> String {
    format!("{} {:.0}%", EXPORT_OVERLAY_TITLE, percent.clamp(0.0, 100.0))
}
