//! Per-tick scene composition.
//!
//! [`Scene`] is the frame context: it owns everything that persists between
//! ticks (camera zoom, background clock, particle field, RNG) and draws one
//! frame per [`Scene::tick`] in a fixed layer order:
//! camera transform, background, particles, logo with anchored spectrum,
//! then the screen-space flash outside the camera transform.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::background;
use crate::config::VisualizerConfig;
use crate::constants::*;
use crate::logo::{logo_draw_size, logo_motion, LogoMotion};
use crate::motion::{flash_opacity, frequency_slice, shake_offset, CameraZoom, FrameSignals};
use crate::particles::ParticleField;
use crate::spectrum::{self, SpectrumFrame};
use crate::surface::{ImageSource, Paint, Rect, Surface};

/// Everything a tick reads from the outside world. Images are only passed
/// once fully loaded.
pub struct SceneInputs<'a, I> {
    pub size: Vec2,
    /// `None` while no analysis node is attached.
    pub snapshot: Option<&'a [u8]>,
    pub config: &'a VisualizerConfig,
    pub background: Option<&'a I>,
    pub logo: Option<&'a I>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub signals: FrameSignals,
    pub scale: f32,
    pub shake: Vec2,
    pub flash: Option<f32>,
    pub spectrum_drawn: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing to draw yet (no analysis node or zero-sized surface).
    Skipped,
    Drawn(FrameReport),
}

pub struct Scene<R = StdRng> {
    zoom: CameraZoom,
    clock: f32,
    last_bass_average: f32,
    particles: ParticleField,
    rng: R,
}

impl Scene<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Scene<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Scene<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            zoom: CameraZoom::default(),
            clock: 0.0,
            last_bass_average: 0.0,
            particles: ParticleField::default(),
            rng,
        }
    }

    pub fn camera_scale(&self) -> f32 {
        self.zoom.scale
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn last_bass_average(&self) -> f32 {
        self.last_bass_average
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn tick<S: Surface>(&mut self, surface: &mut S, inputs: SceneInputs<'_, S::Image>) -> TickOutcome {
        let Some(snapshot) = inputs.snapshot else {
            return TickOutcome::Skipped;
        };
        let size = inputs.size;
        if size.x <= 0.0 || size.y <= 0.0 {
            return TickOutcome::Skipped;
        }
        let config = inputs.config;

        let signals = FrameSignals::from_snapshot(snapshot);
        let bins = frequency_slice(
            snapshot,
            config.frequency_range_start,
            config.frequency_range_end,
        );
        self.last_bass_average = signals.bass_average;

        self.clock += BACKGROUND_CLOCK_STEP;
        let scale = self.zoom.step(signals.target_scale());

        surface.clear(size);
        surface.save();
        let center = size * 0.5;
        surface.translate(center);
        surface.scale(Vec2::splat(scale));
        let shake = shake_offset(
            signals.shake_magnitude(config.camera_shake_intensity),
            &mut self.rng,
        );
        surface.translate(shake);
        surface.translate(-center);

        background::draw(surface, inputs.background, size, config, self.clock, signals.average);

        self.particles
            .update_and_draw(surface, size, config, signals.average, &mut self.rng);

        let mut spectrum_drawn = false;
        if let Some(logo) = inputs.logo {
            let frame = SpectrumFrame {
                size,
                bins,
                clock: self.clock,
                bass_average: signals.bass_average,
            };
            spectrum_drawn = self.draw_logo(surface, logo, &frame, &signals, config);
        }

        surface.restore();

        let flash = flash_opacity(&signals, config.high_energy_fx);
        if let Some(opacity) = flash {
            let color = format!("rgba(255, 255, 255, {opacity})");
            surface.set_fill(Paint::Solid(&color));
            surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y));
        }

        TickOutcome::Drawn(FrameReport {
            signals,
            scale,
            shake,
            flash,
            spectrum_drawn,
        })
    }

    fn draw_logo<S: Surface>(
        &mut self,
        surface: &mut S,
        logo: &S::Image,
        frame: &SpectrumFrame,
        signals: &FrameSignals,
        config: &VisualizerConfig,
    ) -> bool {
        let draw_size = logo_draw_size(logo.size(), frame.size, config.logo_size);
        surface.save();
        surface.translate(frame.size * 0.5);
        match logo_motion(
            config.logo_behavior,
            self.clock,
            signals.average,
            signals.bass_average,
            &mut self.rng,
        ) {
            LogoMotion::None => {}
            LogoMotion::Scale(k) => surface.scale(Vec2::splat(k)),
            LogoMotion::Translate(offset) => surface.translate(offset),
        }

        let mut spectrum_drawn = false;
        if signals.is_playing {
            surface.save();
            surface.set_shadow(
                &config.spectrum_color1,
                config.glow_radius * (signals.average / 255.0),
            );
            surface.translate(Vec2::new(0.0, draw_size.y * SPECTRUM_LOGO_OFFSET));
            spectrum_drawn = spectrum::draw(surface, frame, config);
            surface.restore();
        }

        surface.set_alpha(LOGO_ALPHA);
        surface.set_shadow("#FFFFFF", (signals.average / 255.0) * LOGO_GLOW_SPAN);
        let natural = logo.size();
        surface.draw_image(
            logo,
            Rect::new(0.0, 0.0, natural.x, natural.y),
            Rect::new(-draw_size.x / 2.0, -draw_size.y / 2.0, draw_size.x, draw_size.y),
        );
        surface.restore();
        spectrum_drawn
    }
}
