//! Signal-to-motion mapping: scalar driving signals derived from a frequency
//! snapshot, the inertial camera zoom and the per-frame shake.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;

/// Scalars derived from one frequency snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSignals {
    pub average: f32,
    pub bass_average: f32,
    pub is_playing: bool,
}

impl FrameSignals {
    pub fn from_snapshot(snapshot: &[u8]) -> Self {
        let average = mean(snapshot);
        let bass_average = mean(&snapshot[..snapshot.len().min(BASS_BIN_COUNT)]);
        Self {
            average,
            bass_average,
            is_playing: average > PLAYING_THRESHOLD,
        }
    }

    /// Zoom the camera is pulled toward this frame.
    pub fn target_scale(&self) -> f32 {
        if self.is_playing {
            1.0 + (self.average / 255.0) * CAMERA_ZOOM_SPAN
        } else {
            1.0
        }
    }

    pub fn shake_magnitude(&self, shake_intensity: f32) -> f32 {
        if self.is_playing {
            (self.bass_average / 255.0) * shake_intensity * CAMERA_SHAKE_SPAN
        } else {
            0.0
        }
    }
}

/// Arithmetic mean of byte magnitudes; 0 for an empty slice.
#[inline]
pub fn mean(values: &[u8]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().map(|&v| v as u32).sum();
    sum as f32 / values.len() as f32
}

/// Contiguous sub-slice `[floor(start·len), floor(end·len))`. Inverted or
/// out-of-range bounds yield an empty or truncated slice, never a panic.
pub fn frequency_slice(snapshot: &[u8], start: f32, end: f32) -> &[u8] {
    let len = snapshot.len();
    let lo = fraction_index(start, len);
    let hi = fraction_index(end, len);
    if lo >= hi {
        return &snapshot[..0];
    }
    &snapshot[lo..hi]
}

#[inline]
fn fraction_index(fraction: f32, len: usize) -> usize {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    ((len as f32 * fraction).floor() as usize).min(len)
}

/// Exponentially smoothed camera zoom. Persists across frames and config
/// edits; only a fresh scene resets it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl CameraZoom {
    #[inline]
    pub fn step(&mut self, target: f32) -> f32 {
        self.scale += (target - self.scale) * CAMERA_SMOOTHING;
        self.scale
    }
}

/// Fresh independent draws per axis in [-0.5, 0.5) scaled by `magnitude`.
pub fn shake_offset<R: Rng + ?Sized>(magnitude: f32, rng: &mut R) -> Vec2 {
    if magnitude == 0.0 {
        return Vec2::ZERO;
    }
    let x = rng.gen::<f32>() - 0.5;
    let y = rng.gen::<f32>() - 0.5;
    Vec2::new(x, y) * magnitude
}

/// Opacity of the high-energy white flash; `None` when the guard fails.
pub fn flash_opacity(signals: &FrameSignals, enabled: bool) -> Option<f32> {
    if enabled && signals.is_playing && signals.bass_average > FLASH_BASS_THRESHOLD {
        let ramp = (signals.bass_average - FLASH_BASS_THRESHOLD) / FLASH_RAMP * FLASH_GAIN;
        Some(ramp.min(FLASH_MAX_OPACITY))
    } else {
        None
    }
}
