//! Logo layer and its anchored spectrum.

use glam::Vec2;
use rand::Rng;

use crate::config::LogoBehavior;
use crate::constants::*;

/// Drawn logo size: the long side equals `min(w, h) · 0.3 · logo_size`.
pub fn logo_draw_size(image: Vec2, canvas: Vec2, logo_size: f32) -> Vec2 {
    let max_dim = canvas.min_element() * LOGO_BASE_FRACTION * logo_size;
    let aspect = image.x / image.y;
    if aspect > 1.0 {
        Vec2::new(max_dim, max_dim / aspect)
    } else {
        Vec2::new(max_dim * aspect, max_dim)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogoMotion {
    None,
    Scale(f32),
    Translate(Vec2),
}

pub fn logo_motion<R: Rng + ?Sized>(
    behavior: LogoBehavior,
    clock: f32,
    average: f32,
    bass_average: f32,
    rng: &mut R,
) -> LogoMotion {
    match behavior {
        LogoBehavior::Static => LogoMotion::None,
        LogoBehavior::Pulse => LogoMotion::Scale(1.0 + (average / 255.0) * LOGO_PULSE_SPAN),
        LogoBehavior::Shake => {
            let mag = (bass_average / 255.0) * LOGO_SHAKE_SPAN;
            let x = (rng.gen::<f32>() - 0.5) * mag;
            let y = (rng.gen::<f32>() - 0.5) * mag;
            LogoMotion::Translate(Vec2::new(x, y))
        }
        LogoBehavior::Float => LogoMotion::Translate(Vec2::new(
            (clock * LOGO_FLOAT_RATE_X).sin() * LOGO_FLOAT_AMPLITUDE,
            (clock * LOGO_FLOAT_RATE_Y).cos() * LOGO_FLOAT_AMPLITUDE,
        )),
    }
}
