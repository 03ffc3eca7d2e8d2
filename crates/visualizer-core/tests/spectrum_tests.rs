mod common;

use common::{Cmd, RecordingSurface};
use glam::Vec2;
use std::f32::consts::TAU;
use visualizer_core::spectrum::*;
use visualizer_core::{DynamicStyle, PathCmd, VisualizerConfig};

const SIZE: Vec2 = Vec2::new(1000.0, 800.0);

fn config(style: DynamicStyle, bars: u32) -> VisualizerConfig {
    VisualizerConfig {
        dynamic_style: style,
        bar_count: bars,
        motion_intensity: 1.0,
        ..VisualizerConfig::default()
    }
}

fn frame(bins: &[u8]) -> SpectrumFrame<'_> {
    SpectrumFrame {
        size: SIZE,
        bins,
        clock: 0.0,
        bass_average: 0.0,
    }
}

#[test]
fn star_radius_is_inner_at_spikes_and_outer_between() {
    let (inner, outer) = (40.0, 144.0);
    assert!((star_radius(0.0, inner, outer) - inner).abs() < 1e-5);
    assert!((star_radius(1.0, inner, outer) - inner).abs() < 1e-5);
    assert!((star_radius(0.5, inner, outer) - outer).abs() < 1e-5);
    assert!((star_radius(0.25, inner, outer) - (inner + outer) / 2.0).abs() < 1e-4);
}

#[test]
fn spike_progress_wraps_per_spike() {
    assert!(spike_progress(0.0, 6).abs() < 1e-6);
    assert!((spike_progress(TAU / 12.0, 6) - 0.5).abs() < 1e-5);
    assert!(spike_progress(TAU / 6.0, 6) < 1e-4 || spike_progress(TAU / 6.0, 6) > 0.9999);
}

#[test]
fn pyro_burst_draws_one_radial_bar_per_sample() {
    let bins = vec![255u8; 64];
    let cfg = config(DynamicStyle::PyroBurst, 64);
    let segs = pyro_burst_segments(&frame(&bins), &cfg);
    assert_eq!(segs.len(), 64);
    // base 50 + avg 255 * 0.1 pulse
    let pulse = 1000.0_f32.min(800.0) * 0.05 + 255.0 * 0.1;
    let bar = 800.0 * 0.15;
    for (i, (a, b)) in segs.iter().enumerate() {
        assert!((a.length() - pulse).abs() < 1e-3, "bar {i}");
        assert!((b.length() - (pulse + bar)).abs() < 1e-3, "bar {i}");
        let angle = i as f32 / 64.0 * TAU;
        assert!((a.normalize() - Vec2::new(angle.cos(), angle.sin())).length() < 1e-4);
    }
}

#[test]
fn short_slices_read_zero_instead_of_panicking() {
    let bins = [200u8; 4];
    let cfg = config(DynamicStyle::PyroBurst, 16);
    let segs = pyro_burst_segments(&frame(&bins), &cfg);
    assert_eq!(segs.len(), 16);
    for (a, b) in &segs[4..] {
        assert!((a.length() - b.length()).abs() < 1e-4);
    }

    let empty: [u8; 0] = [];
    let f = frame(&empty);
    assert_eq!(f.average(), 0.0);
    assert_eq!(glacial_shards_points(&f, &config(DynamicStyle::GlacialShards, 32)).len(), 33);
}

#[test]
fn glacial_shards_closes_polygon_and_follows_star_profile() {
    let bins = vec![0u8; 1024];
    let mut cfg = config(DynamicStyle::GlacialShards, 12);
    cfg.star_spikes = 6;
    cfg.star_inner_radius = 0.5;
    let points = glacial_shards_points(&frame(&bins), &cfg);
    assert_eq!(points.len(), 13);
    assert!((points[0] - points[12]).length() < 1e-4);

    let outer = 800.0 * 0.18;
    let inner = outer * 0.5;
    // bars at multiples of 2 sit on spikes, odd ones half way between
    assert!((points[0].length() - inner).abs() < 1e-2);
    assert!((points[1].length() - outer).abs() < 1e-2);
    assert!((points[2].length() - inner).abs() < 1e-2);
}

#[test]
fn celestial_bloom_uses_quadratic_segments_with_inward_controls() {
    let bins = vec![255u8; 32];
    let cfg = config(DynamicStyle::CelestialBloom, 32);
    let path = celestial_bloom_path(&frame(&bins), &cfg);
    assert_eq!(path.len(), 34);
    assert!(matches!(path[0], PathCmd::MoveTo(_)));
    assert!(matches!(path[33], PathCmd::Close));

    let base = 800.0 * 0.05;
    let bar = 800.0 * 0.12; // bloom factor is 1 at clock 0
    for cmd in &path[1..33] {
        match cmd {
            PathCmd::QuadTo { ctrl, to } => {
                assert!((to.length() - (base + bar)).abs() < 1e-2);
                assert!((ctrl.length() - (base + bar * 0.5)).abs() < 1e-2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn bloom_factor_oscillates_around_one() {
    assert!((bloom_factor(0.0) - 1.0).abs() < 1e-6);
    assert!((bloom_factor(TAU / 8.0) - 1.2).abs() < 1e-5);
}

#[test]
fn quantum_entanglement_draws_nothing() {
    let bins = vec![255u8; 64];
    let mut surface = RecordingSurface::new();
    assert!(!draw(&mut surface, &frame(&bins), &config(DynamicStyle::QuantumEntanglement, 64)));
    assert!(surface.cmds.is_empty());
}

#[test]
fn draw_strokes_with_spectrum_gradient_and_restores_state() {
    let bins = vec![128u8; 64];
    for style in [
        DynamicStyle::PyroBurst,
        DynamicStyle::GlacialShards,
        DynamicStyle::CelestialBloom,
    ] {
        let mut surface = RecordingSurface::new();
        let cfg = config(style, 64);
        assert!(draw(&mut surface, &frame(&bins), &cfg));
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.paths().len(), 1, "{style}");
        assert!(surface
            .cmds
            .contains(&Cmd::Stroke("gradient(#00FFFF->#FF00FF)".to_string())));
        if style == DynamicStyle::PyroBurst {
            assert!(surface.cmds.contains(&Cmd::LineWidth(cfg.bar_width)));
            assert!(surface.cmds.contains(&Cmd::RoundCaps));
            assert_eq!(surface.paths()[0].len(), 128);
        }
    }
}

#[test]
fn zero_bar_count_is_a_no_op() {
    let bins = vec![255u8; 64];
    let mut surface = RecordingSurface::new();
    assert!(!draw(&mut surface, &frame(&bins), &config(DynamicStyle::GlacialShards, 0)));
    assert!(surface.cmds.is_empty());
    assert!(celestial_bloom_path(&frame(&bins), &config(DynamicStyle::CelestialBloom, 0)).is_empty());
}
