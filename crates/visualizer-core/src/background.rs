//! Background layer: cover-fit image with an animated transform, or a
//! vertical two-stop gradient when no image is ready.

use glam::Vec2;

use crate::config::{BackgroundBehavior, VisualizerConfig};
use crate::constants::*;
use crate::surface::{ImageSource, LinearGradient, Paint, Rect, Surface};

/// Source rectangle that crops `image` to the canvas aspect, centred.
pub fn cover_fit(image: Vec2, canvas: Vec2) -> Rect {
    let canvas_aspect = canvas.x / canvas.y;
    let image_aspect = image.x / image.y;
    if image_aspect > canvas_aspect {
        let w = image.y * canvas_aspect;
        Rect::new((image.x - w) / 2.0, 0.0, w, image.y)
    } else {
        let h = image.x / canvas_aspect;
        Rect::new(0.0, (image.y - h) / 2.0, image.x, h)
    }
}

/// Transform applied around the background draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundMotion {
    None,
    Translate(Vec2),
    /// Uniform scale about the canvas centre.
    ScaleAboutCenter(f32),
}

pub fn background_motion(behavior: BackgroundBehavior, clock: f32, average: f32) -> BackgroundMotion {
    match behavior {
        BackgroundBehavior::Static => BackgroundMotion::None,
        BackgroundBehavior::SlowPan => {
            BackgroundMotion::Translate(Vec2::new(clock.sin() * BG_PAN_X, clock.cos() * BG_PAN_Y))
        }
        BackgroundBehavior::GentleZoom => {
            BackgroundMotion::ScaleAboutCenter(1.0 + (clock * BG_ZOOM_RATE).sin() * BG_ZOOM_SPAN)
        }
        BackgroundBehavior::AudioPulse => {
            BackgroundMotion::ScaleAboutCenter(1.0 + (average / 255.0) * BG_PULSE_SPAN)
        }
    }
}

fn apply_motion<S: Surface>(surface: &mut S, motion: BackgroundMotion, size: Vec2) {
    match motion {
        BackgroundMotion::None => {}
        BackgroundMotion::Translate(offset) => surface.translate(offset),
        BackgroundMotion::ScaleAboutCenter(k) => {
            let center = size * 0.5;
            surface.translate(center);
            surface.scale(Vec2::splat(k));
            surface.translate(-center);
        }
    }
}

pub fn draw<S: Surface>(
    surface: &mut S,
    image: Option<&S::Image>,
    size: Vec2,
    config: &VisualizerConfig,
    clock: f32,
    average: f32,
) {
    match image {
        Some(img) => {
            let src = cover_fit(img.size(), size);
            surface.save();
            apply_motion(
                surface,
                background_motion(config.background_behavior, clock, average),
                size,
            );
            surface.draw_image(img, src, Rect::new(0.0, 0.0, size.x, size.y));
            surface.restore();
        }
        None => {
            surface.set_fill(Paint::Gradient(LinearGradient {
                from: Vec2::ZERO,
                to: Vec2::new(0.0, size.y),
                start_color: &config.bg_color1,
                end_color: &config.bg_color2,
            }));
            surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y));
        }
    }
}
