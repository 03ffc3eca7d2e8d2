//! Particle field with five interchangeable motion behaviours.
//!
//! Every behaviour is a pure per-particle step over (particle, canvas size,
//! drive) so each one can be exercised on its own.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{ParticleBehavior, VisualizerConfig};
use crate::constants::*;
use crate::surface::{Paint, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    /// Base velocity; bounce behaviours flip its sign in place.
    pub vel: Vec2,
    pub angle: f32,
    pub distance: f32,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(size: Vec2, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
            radius: rng.gen::<f32>() * PARTICLE_RADIUS_SPAN + PARTICLE_RADIUS_MIN,
            vel: Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5),
            angle: rng.gen::<f32>() * TAU,
            distance: rng.gen::<f32>() * size.min_element() * 0.5,
        }
    }

    #[inline]
    fn place_polar(&mut self, center: Vec2) {
        self.pos = center + Vec2::from_angle(self.angle) * self.distance;
    }
}

#[inline]
fn outside(pos: Vec2, size: Vec2) -> bool {
    pos.x < 0.0 || pos.x > size.x || pos.y < 0.0 || pos.y > size.y
}

/// Drift by base velocity and reflect off the edges.
pub fn step_static(p: &mut Particle, size: Vec2) {
    p.pos += p.vel;
    if p.pos.x < 0.0 || p.pos.x > size.x {
        p.vel.x = -p.vel.x;
    }
    if p.pos.y < 0.0 || p.pos.y > size.y {
        p.vel.y = -p.vel.y;
    }
}

pub fn step_gravity<R: Rng + ?Sized>(p: &mut Particle, size: Vec2, rng: &mut R) {
    p.pos.y += p.vel.y + PARTICLE_DRIFT;
    p.pos.x += p.vel.x;
    if p.pos.y > size.y {
        p.pos.y = 0.0;
        p.pos.x = rng.gen::<f32>() * size.x;
    }
}

pub fn step_anti_gravity<R: Rng + ?Sized>(p: &mut Particle, size: Vec2, rng: &mut R) {
    p.pos.y -= p.vel.y + PARTICLE_DRIFT;
    p.pos.x += p.vel.x;
    if p.pos.y < 0.0 {
        p.pos.y = size.y;
        p.pos.x = rng.gen::<f32>() * size.x;
    }
}

/// Push outward from the centre; the position is always placed from the
/// advanced polar state before the bounds check reseeds it.
pub fn step_radial_out<R: Rng + ?Sized>(p: &mut Particle, size: Vec2, average: f32, rng: &mut R) {
    p.distance += (average / 255.0) * RADIAL_OUT_SPEED + POLAR_MIN_STEP;
    p.place_polar(size * 0.5);
    if outside(p.pos, size) {
        p.distance = rng.gen::<f32>() * RADIAL_RESPAWN_MAX;
        p.angle = rng.gen::<f32>() * TAU;
    }
}

pub fn step_vortex_in<R: Rng + ?Sized>(p: &mut Particle, size: Vec2, average: f32, rng: &mut R) {
    p.distance -= (average / 255.0) * VORTEX_IN_SPEED + POLAR_MIN_STEP;
    p.angle += VORTEX_SPIN;
    p.place_polar(size * 0.5);
    if p.distance < 1.0 {
        p.distance = rng.gen::<f32>() * size.min_element() * 0.5;
        p.angle = rng.gen::<f32>() * TAU;
    }
}

/// Fixed-size particle set owned by the scene.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    last_behavior: Option<ParticleBehavior>,
}

impl ParticleField {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn behavior(&self) -> Option<ParticleBehavior> {
        self.last_behavior
    }

    /// Regenerate all particles uniformly inside the canvas.
    pub fn reset<R: Rng + ?Sized>(&mut self, size: Vec2, behavior: ParticleBehavior, rng: &mut R) {
        self.particles.clear();
        self.particles
            .extend((0..PARTICLE_COUNT).map(|_| Particle::random(size, rng)));
        self.last_behavior = Some(behavior);
        log::debug!("[particles] reset {} for {:?}", self.particles.len(), behavior);
    }

    /// Advance one frame, resetting first when the set is empty or the
    /// behaviour changed since the previous frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        size: Vec2,
        behavior: ParticleBehavior,
        average: f32,
        rng: &mut R,
    ) {
        if self.particles.is_empty() || self.last_behavior != Some(behavior) {
            self.reset(size, behavior, rng);
        }
        for p in &mut self.particles {
            match behavior {
                ParticleBehavior::Static => step_static(p, size),
                ParticleBehavior::Gravity => step_gravity(p, size, rng),
                ParticleBehavior::AntiGravity => step_anti_gravity(p, size, rng),
                ParticleBehavior::RadialOut => step_radial_out(p, size, average, rng),
                ParticleBehavior::VortexIn => step_vortex_in(p, size, average, rng),
            }
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, color: &str) {
        surface.set_fill(Paint::Solid(color));
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius);
        }
    }

    pub fn update_and_draw<S: Surface, R: Rng + ?Sized>(
        &mut self,
        surface: &mut S,
        size: Vec2,
        config: &VisualizerConfig,
        average: f32,
        rng: &mut R,
    ) {
        self.update(size, config.particle_behavior, average, rng);
        self.draw(surface, &config.particle_color);
    }
}
