//! Radial spectrum shapes anchored at the current transform origin.
//!
//! Geometry is built by pure functions so it can be checked without a
//! surface; [`draw`] strokes the result with the two-colour gradient.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::config::{DynamicStyle, VisualizerConfig};
use crate::constants::*;
use crate::motion::mean;
use crate::surface::{LinearGradient, Paint, Path, PathCmd, Surface};

/// Per-frame inputs for the spectrum shape.
#[derive(Clone, Copy, Debug)]
pub struct SpectrumFrame<'a> {
    pub size: Vec2,
    /// Filtered slice of the frequency snapshot.
    pub bins: &'a [u8],
    pub clock: f32,
    pub bass_average: f32,
}

impl<'a> SpectrumFrame<'a> {
    /// Bin lookup that reads 0 past the end of the slice.
    #[inline]
    pub fn sample(&self, i: usize) -> f32 {
        self.bins.get(i).copied().unwrap_or(0) as f32
    }

    pub fn average(&self) -> f32 {
        mean(self.bins)
    }
}

#[inline]
fn bar_angle(index: u32, bar_count: u32) -> f32 {
    (index as f32 / bar_count as f32) * TAU
}

/// Radial line segments (inner, outer) for the burst style.
pub fn pyro_burst_segments(frame: &SpectrumFrame, config: &VisualizerConfig) -> Vec<(Vec2, Vec2)> {
    let n = config.bar_count;
    if n == 0 {
        return Vec::new();
    }
    let base = frame.size.min_element() * PYRO_BASE_RADIUS;
    let pulse = base + frame.average() * PYRO_PULSE * config.motion_intensity;
    (0..n)
        .map(|i| {
            let bar = frame.sample(i as usize) / 255.0
                * frame.size.y
                * PYRO_BAR_SPAN
                * config.motion_intensity;
            let dir = Vec2::from_angle(bar_angle(i, n));
            (dir * pulse, dir * (pulse + bar))
        })
        .collect()
}

/// Position inside the current spike cycle, in [0, 1).
#[inline]
pub fn spike_progress(angle: f32, spikes: u32) -> f32 {
    ((angle / TAU) * spikes as f32).rem_euclid(1.0)
}

/// Triangular wave between `inner` (at spike alignment) and `outer` (half way
/// between spikes).
#[inline]
pub fn star_radius(progress: f32, inner: f32, outer: f32) -> f32 {
    let tri = 1.0 - (progress - 0.5).abs() * 2.0;
    inner + (outer - inner) * tri
}

/// Closed star polygon, `bar_count + 1` vertices with the last repeating the first.
pub fn glacial_shards_points(frame: &SpectrumFrame, config: &VisualizerConfig) -> Vec<Vec2> {
    let n = config.bar_count;
    if n == 0 {
        return Vec::new();
    }
    let outer = frame.size.min_element() * SHARDS_OUTER_RADIUS;
    let inner = outer * config.star_inner_radius;
    (0..=n)
        .map(|i| {
            let index = i % n;
            let bar = frame.sample(index as usize) / 255.0
                * frame.size.y
                * SHARDS_BAR_SPAN
                * config.motion_intensity;
            let angle = bar_angle(index, n);
            let r = star_radius(spike_progress(angle, config.star_spikes), inner, outer) + bar;
            Vec2::from_angle(angle) * r
        })
        .collect()
}

pub fn bloom_factor(clock: f32) -> f32 {
    1.0 + (clock * BLOOM_RATE).sin() * BLOOM_DEPTH
}

/// Closed curve of quadratic segments; each control point sits half a bar
/// height back toward the centre from its vertex.
pub fn celestial_bloom_path(frame: &SpectrumFrame, config: &VisualizerConfig) -> Path {
    let mut path = Path::new();
    let n = config.bar_count;
    if n == 0 {
        return path;
    }
    let base = frame.size.min_element() * BLOOM_BASE_RADIUS;
    let bloom = bloom_factor(frame.clock);
    for i in 0..=n {
        let index = i % n;
        let bar = frame.sample(index as usize) / 255.0
            * frame.size.y
            * BLOOM_BAR_SPAN
            * config.motion_intensity
            * bloom;
        let dir = Vec2::from_angle(bar_angle(index, n));
        let r = base + bar;
        let to = dir * r;
        if i == 0 {
            path.push(PathCmd::MoveTo(to));
        } else {
            path.push(PathCmd::QuadTo {
                ctrl: dir * (r - bar * 0.5),
                to,
            });
        }
    }
    path.push(PathCmd::Close);
    path
}

fn polyline(points: &[Vec2]) -> Path {
    let mut path = Path::new();
    for (i, &p) in points.iter().enumerate() {
        path.push(if i == 0 {
            PathCmd::MoveTo(p)
        } else {
            PathCmd::LineTo(p)
        });
    }
    if !points.is_empty() {
        path.push(PathCmd::Close);
    }
    path
}

fn spectrum_gradient<'c>(size: Vec2, config: &'c VisualizerConfig) -> Paint<'c> {
    Paint::Gradient(LinearGradient {
        from: Vec2::new(0.0, -size.y / 4.0),
        to: Vec2::new(0.0, size.y / 4.0),
        start_color: &config.spectrum_color1,
        end_color: &config.spectrum_color2,
    })
}

/// Draw the configured style centred on the current origin.
/// Stroke the configured style. Returns false when nothing was stroked.
pub fn draw<S: Surface>(surface: &mut S, frame: &SpectrumFrame, config: &VisualizerConfig) -> bool {
    if config.dynamic_style == DynamicStyle::QuantumEntanglement || config.bar_count == 0 {
        return false;
    }
    surface.save();
    surface.set_stroke(spectrum_gradient(frame.size, config));
    match config.dynamic_style {
        DynamicStyle::PyroBurst => {
            surface.set_line_width(config.bar_width);
            surface.set_round_caps();
            let mut path = Path::new();
            for (a, b) in pyro_burst_segments(frame, config) {
                path.push(PathCmd::MoveTo(a));
                path.push(PathCmd::LineTo(b));
            }
            surface.stroke_path(&path);
        }
        DynamicStyle::GlacialShards => {
            let points = glacial_shards_points(frame, config);
            surface.stroke_path(&polyline(&points));
        }
        DynamicStyle::CelestialBloom => {
            surface.stroke_path(&celestial_bloom_path(frame, config));
        }
        DynamicStyle::QuantumEntanglement => {}
    }
    surface.restore();
    true
}
