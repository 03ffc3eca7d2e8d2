mod common;

use common::{RecordingSurface, TestImage};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use visualizer_core::background::{self, background_motion, BackgroundMotion};
use visualizer_core::logo::{logo_motion, LogoMotion};
use visualizer_core::{BackgroundBehavior, LogoBehavior, VisualizerConfig};

const SIZE: Vec2 = Vec2::new(1280.0, 720.0);

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn static_background_does_not_move() {
    assert_eq!(
        background_motion(BackgroundBehavior::Static, 3.0, 255.0),
        BackgroundMotion::None
    );
}

#[test]
fn slow_pan_follows_the_clock() {
    for t in [0.0f32, 1.0, 2.5, 10.0] {
        let BackgroundMotion::Translate(offset) =
            background_motion(BackgroundBehavior::SlowPan, t, 0.0)
        else {
            panic!("slow pan translates");
        };
        assert!(close(offset.x, t.sin() * 50.0));
        assert!(close(offset.y, t.cos() * 30.0));
    }
}

#[test]
fn gentle_zoom_oscillates_within_ten_percent() {
    for i in 0..200 {
        let t = i as f32 * 0.05;
        let BackgroundMotion::ScaleAboutCenter(k) =
            background_motion(BackgroundBehavior::GentleZoom, t, 255.0)
        else {
            panic!("gentle zoom scales");
        };
        assert!(close(k, 1.0 + (0.8 * t).sin() * 0.1));
        assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&k));
    }
}

#[test]
fn audio_pulse_tracks_the_average() {
    assert_eq!(
        background_motion(BackgroundBehavior::AudioPulse, 1.0, 0.0),
        BackgroundMotion::ScaleAboutCenter(1.0)
    );
    let BackgroundMotion::ScaleAboutCenter(k) =
        background_motion(BackgroundBehavior::AudioPulse, 1.0, 255.0)
    else {
        panic!("audio pulse scales");
    };
    assert!(close(k, 1.05));
}

#[test]
fn background_zoom_is_applied_about_the_canvas_centre() {
    let image = TestImage(Vec2::new(1920.0, 1080.0));
    let config = VisualizerConfig {
        background_behavior: BackgroundBehavior::GentleZoom,
        ..VisualizerConfig::default()
    };
    let clock = 2.0;
    let mut surface = RecordingSurface::new();
    background::draw(&mut surface, Some(&image), SIZE, &config, clock, 0.0);

    let images = surface.images();
    assert_eq!(images.len(), 1);
    let t = images[0].2;
    let k = 1.0 + (0.8 * clock).sin() * 0.1;
    let center = SIZE * 0.5;
    assert!((t.transform_point2(center) - center).length() < 1e-3);
    assert!(close(t.transform_vector2(Vec2::X).x, k));
    assert_eq!(surface.depth(), 0);
}

#[test]
fn background_pan_translates_the_image() {
    let image = TestImage(Vec2::new(1920.0, 1080.0));
    let config = VisualizerConfig {
        background_behavior: BackgroundBehavior::SlowPan,
        ..VisualizerConfig::default()
    };
    let mut surface = RecordingSurface::new();
    background::draw(&mut surface, Some(&image), SIZE, &config, 1.0, 0.0);

    let t = surface.images()[0].2;
    let origin = t.transform_point2(Vec2::ZERO);
    assert!(close(origin.x, 1.0f32.sin() * 50.0));
    assert!(close(origin.y, 1.0f32.cos() * 30.0));
}

#[test]
fn logo_pulse_scales_with_the_average() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        logo_motion(LogoBehavior::Pulse, 0.0, 0.0, 255.0, &mut rng),
        LogoMotion::Scale(1.0)
    );
    let LogoMotion::Scale(k) = logo_motion(LogoBehavior::Pulse, 0.0, 127.5, 0.0, &mut rng) else {
        panic!("pulse scales");
    };
    assert!(close(k, 1.05));
    let LogoMotion::Scale(k) = logo_motion(LogoBehavior::Pulse, 0.0, 255.0, 0.0, &mut rng) else {
        panic!("pulse scales");
    };
    assert!(close(k, 1.1));
}

#[test]
fn logo_shake_is_bounded_by_bass_and_draws_axes_independently() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut differing = 0;
    for _ in 0..200 {
        let LogoMotion::Translate(offset) =
            logo_motion(LogoBehavior::Shake, 0.0, 0.0, 255.0, &mut rng)
        else {
            panic!("shake translates");
        };
        assert!(offset.x.abs() <= 7.5 && offset.y.abs() <= 7.5);
        if (offset.x - offset.y).abs() > 1e-3 {
            differing += 1;
        }
    }
    assert!(differing > 150);

    // no bass, no shake
    assert_eq!(
        logo_motion(LogoBehavior::Shake, 0.0, 255.0, 0.0, &mut rng),
        LogoMotion::Translate(Vec2::ZERO)
    );
}

#[test]
fn logo_float_follows_the_clock() {
    let mut rng = StdRng::seed_from_u64(3);
    for t in [0.0f32, 2.0, 7.5] {
        let LogoMotion::Translate(offset) = logo_motion(LogoBehavior::Float, t, 255.0, 255.0, &mut rng)
        else {
            panic!("float translates");
        };
        assert!(close(offset.x, (0.5 * t).sin() * 10.0));
        assert!(close(offset.y, (0.3 * t).cos() * 10.0));
    }
    assert_eq!(
        logo_motion(LogoBehavior::Static, 1.0, 255.0, 255.0, &mut rng),
        LogoMotion::None
    );
}
