//! Built-in preset catalogue. One template per spectrum style, then themed
//! variants that lean on the particle and background behaviours.

use crate::config::{
    BackgroundBehavior, DynamicStyle, LogoBehavior, ParticleBehavior, Preset, VisualizerConfig,
};

fn preset(name: &str, config: VisualizerConfig) -> Preset {
    Preset {
        name: name.to_string(),
        config,
    }
}

fn colors(mut c: VisualizerConfig, s1: &str, s2: &str, bg1: &str, bg2: &str, p: &str) -> VisualizerConfig {
    c.spectrum_color1 = s1.to_string();
    c.spectrum_color2 = s2.to_string();
    c.bg_color1 = bg1.to_string();
    c.bg_color2 = bg2.to_string();
    c.particle_color = p.to_string();
    c
}

pub fn all_presets() -> Vec<Preset> {
    let base = VisualizerConfig::default();
    vec![
        preset("Pyro Burst", base.clone()),
        preset(
            "Glacial Shards",
            colors(
                VisualizerConfig {
                    dynamic_style: DynamicStyle::GlacialShards,
                    motion_intensity: 1.2,
                    bar_count: 180,
                    star_spikes: 8,
                    star_inner_radius: 0.45,
                    particle_behavior: ParticleBehavior::Gravity,
                    logo_behavior: LogoBehavior::Float,
                    ..base.clone()
                },
                "#A0E9FF",
                "#FFFFFF",
                "#0B1A2A",
                "#1B3A5A",
                "#D6F4FF",
            ),
        ),
        preset(
            "Celestial Bloom",
            colors(
                VisualizerConfig {
                    dynamic_style: DynamicStyle::CelestialBloom,
                    motion_intensity: 1.8,
                    bar_count: 96,
                    glow_radius: 30.0,
                    particle_behavior: ParticleBehavior::RadialOut,
                    background_behavior: BackgroundBehavior::GentleZoom,
                    ..base.clone()
                },
                "#FFD166",
                "#EF476F",
                "#1A0B2E",
                "#3D1A5B",
                "#FFE8A3",
            ),
        ),
        preset(
            "Quantum Entanglement",
            colors(
                VisualizerConfig {
                    dynamic_style: DynamicStyle::QuantumEntanglement,
                    camera_shake_intensity: 2.0,
                    particle_behavior: ParticleBehavior::VortexIn,
                    background_behavior: BackgroundBehavior::AudioPulse,
                    logo_behavior: LogoBehavior::Shake,
                    ..base.clone()
                },
                "#7CFFCB",
                "#4D7CFE",
                "#05050A",
                "#141432",
                "#7CFFCB",
            ),
        ),
        preset(
            "Bass Quake",
            VisualizerConfig {
                motion_intensity: 2.5,
                camera_shake_intensity: 4.0,
                bar_count: 64,
                bar_width: 6.0,
                frequency_range_end: 0.3,
                high_energy_fx: true,
                logo_behavior: LogoBehavior::Shake,
                ..base.clone()
            },
        ),
        preset(
            "Ember Rise",
            colors(
                VisualizerConfig {
                    bar_count: 144,
                    bar_width: 2.0,
                    particle_behavior: ParticleBehavior::AntiGravity,
                    background_behavior: BackgroundBehavior::SlowPan,
                    high_energy_fx: false,
                    ..base
                },
                "#FF7B00",
                "#FFD000",
                "#140800",
                "#3A1500",
                "#FFB347",
            ),
        ),
    ]
}

pub fn initial_preset() -> Preset {
    preset("Pyro Burst", VisualizerConfig::default())
}

pub fn find_preset(name: &str) -> Option<Preset> {
    all_presets().into_iter().find(|p| p.name == name)
}
