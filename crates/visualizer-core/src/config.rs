//! Visualizer configuration snapshot and the named-preset model.
//!
//! A [`VisualizerConfig`] is read once per tick and replaced wholesale when the
//! user edits a field or picks a preset. Field names serialize in camelCase and
//! enum variants by their display names so the surrounding UI can hand over a
//! plain JavaScript object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DynamicStyle {
    #[serde(rename = "Pyro Burst")]
    PyroBurst,
    #[serde(rename = "Glacial Shards")]
    GlacialShards,
    #[serde(rename = "Quantum Entanglement")]
    QuantumEntanglement,
    #[serde(rename = "Celestial Bloom")]
    CelestialBloom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleBehavior {
    Static,
    Gravity,
    #[serde(rename = "Anti-Gravity")]
    AntiGravity,
    #[serde(rename = "Radial Out")]
    RadialOut,
    #[serde(rename = "Vortex In")]
    VortexIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundBehavior {
    Static,
    #[serde(rename = "Slow Pan")]
    SlowPan,
    #[serde(rename = "Gentle Zoom")]
    GentleZoom,
    #[serde(rename = "Audio Pulse")]
    AudioPulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogoBehavior {
    Static,
    Pulse,
    Shake,
    Float,
}

impl DynamicStyle {
    pub const ALL: [DynamicStyle; 4] = [
        DynamicStyle::PyroBurst,
        DynamicStyle::GlacialShards,
        DynamicStyle::QuantumEntanglement,
        DynamicStyle::CelestialBloom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DynamicStyle::PyroBurst => "Pyro Burst",
            DynamicStyle::GlacialShards => "Glacial Shards",
            DynamicStyle::QuantumEntanglement => "Quantum Entanglement",
            DynamicStyle::CelestialBloom => "Celestial Bloom",
        }
    }
}

impl ParticleBehavior {
    pub const ALL: [ParticleBehavior; 5] = [
        ParticleBehavior::Static,
        ParticleBehavior::Gravity,
        ParticleBehavior::AntiGravity,
        ParticleBehavior::RadialOut,
        ParticleBehavior::VortexIn,
    ];
}

impl fmt::Display for DynamicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive slider bounds the editing UI offers for a numeric field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        if v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }
}

pub const MOTION_INTENSITY_RANGE: ParamRange = ParamRange::new(0.5, 4.0, 0.1);
pub const CAMERA_SHAKE_RANGE: ParamRange = ParamRange::new(0.0, 5.0, 0.1);
pub const SMOOTHING_RANGE: ParamRange = ParamRange::new(0.0, 0.99, 0.01);
pub const BAR_COUNT_RANGE: ParamRange = ParamRange::new(16.0, 512.0, 4.0);
pub const FREQUENCY_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.01);
pub const BAR_WIDTH_RANGE: ParamRange = ParamRange::new(1.0, 10.0, 1.0);
pub const GLOW_RADIUS_RANGE: ParamRange = ParamRange::new(0.0, 50.0, 1.0);
pub const LOGO_SIZE_RANGE: ParamRange = ParamRange::new(0.1, 2.0, 0.05);
pub const STAR_SPIKES_RANGE: ParamRange = ParamRange::new(2.0, 24.0, 1.0);
pub const STAR_INNER_RADIUS_RANGE: ParamRange = ParamRange::new(0.05, 1.0, 0.05);

/// Flat configuration snapshot consumed by the scene every tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerConfig {
    pub dynamic_style: DynamicStyle,
    pub motion_intensity: f32,
    pub camera_shake_intensity: f32,
    pub bar_count: u32,
    pub bar_width: f32,
    pub glow_radius: f32,
    pub star_spikes: u32,
    pub star_inner_radius: f32,
    pub spectrum_color1: String,
    pub spectrum_color2: String,
    pub bg_color1: String,
    pub bg_color2: String,
    pub particle_color: String,
    pub logo_size: f32,
    pub high_energy_fx: bool,
    pub smoothing_time_constant: f32,
    pub frequency_range_start: f32,
    pub frequency_range_end: f32,
    pub particle_behavior: ParticleBehavior,
    pub background_behavior: BackgroundBehavior,
    pub logo_behavior: LogoBehavior,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            dynamic_style: DynamicStyle::PyroBurst,
            motion_intensity: 1.5,
            camera_shake_intensity: 1.0,
            bar_count: 128,
            bar_width: 3.0,
            glow_radius: 20.0,
            star_spikes: 6,
            star_inner_radius: 0.5,
            spectrum_color1: "#00FFFF".to_string(),
            spectrum_color2: "#FF00FF".to_string(),
            bg_color1: "#101014".to_string(),
            bg_color2: "#1E1E28".to_string(),
            particle_color: "#FFFFFF".to_string(),
            logo_size: 1.0,
            high_energy_fx: true,
            smoothing_time_constant: 0.8,
            frequency_range_start: 0.0,
            frequency_range_end: 0.7,
            particle_behavior: ParticleBehavior::Static,
            background_behavior: BackgroundBehavior::Static,
            logo_behavior: LogoBehavior::Pulse,
        }
    }
}

impl VisualizerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with every numeric field pulled into its slider range and the
    /// frequency window ordered so that start <= end.
    pub fn clamped(&self) -> Self {
        let mut c = self.clone();
        c.motion_intensity = MOTION_INTENSITY_RANGE.clamp(c.motion_intensity);
        c.camera_shake_intensity = CAMERA_SHAKE_RANGE.clamp(c.camera_shake_intensity);
        c.smoothing_time_constant = SMOOTHING_RANGE.clamp(c.smoothing_time_constant);
        c.bar_count = BAR_COUNT_RANGE.clamp(c.bar_count as f32) as u32;
        c.bar_width = BAR_WIDTH_RANGE.clamp(c.bar_width);
        c.glow_radius = GLOW_RADIUS_RANGE.clamp(c.glow_radius);
        c.logo_size = LOGO_SIZE_RANGE.clamp(c.logo_size);
        c.star_spikes = STAR_SPIKES_RANGE.clamp(c.star_spikes as f32) as u32;
        c.star_inner_radius = STAR_INNER_RADIUS_RANGE.clamp(c.star_inner_radius);
        let start = FREQUENCY_RANGE.clamp(c.frequency_range_start);
        let end = FREQUENCY_RANGE.clamp(c.frequency_range_end);
        c.frequency_range_start = start.min(end);
        c.frequency_range_end = start.max(end);
        c
    }
}

/// A named, read-only configuration template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub config: VisualizerConfig,
}

pub const CUSTOM_PRESET_NAME: &str = "Custom";

/// The configuration currently driving the scene plus the name shown for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveConfig {
    pub name: String,
    pub config: VisualizerConfig,
}

impl Default for ActiveConfig {
    fn default() -> Self {
        let preset = crate::presets::initial_preset();
        Self {
            name: preset.name,
            config: preset.config,
        }
    }
}

impl ActiveConfig {
    pub fn select_preset(&mut self, preset: &Preset) {
        log::debug!("[config] preset selected: {}", preset.name);
        self.name = preset.name.clone();
        self.config = preset.config.clone();
    }

    pub fn select_preset_named(&mut self, name: &str) -> Result<(), ConfigError> {
        let preset = crate::presets::find_preset(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        self.select_preset(&preset);
        Ok(())
    }

    /// Apply a single-field edit; the result is no longer a named preset.
    pub fn edit(&mut self, f: impl FnOnce(&mut VisualizerConfig)) {
        f(&mut self.config);
        self.name = CUSTOM_PRESET_NAME.to_string();
    }

    /// Replace the whole configuration with one edited outside preset selection.
    pub fn replace(&mut self, config: VisualizerConfig) {
        self.config = config;
        self.name = CUSTOM_PRESET_NAME.to_string();
    }

    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_PRESET_NAME
    }
}

/// Output frame shape chosen for preview and export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    SixteenNine,
    #[default]
    #[serde(rename = "9:16")]
    NineSixteen,
}

impl AspectRatio {
    /// CSS size of the canvas inside a parent box: landscape fills the parent
    /// width, portrait fills the parent height.
    pub fn fit(self, parent_width: f64, parent_height: f64) -> (f64, f64) {
        match self {
            AspectRatio::SixteenNine => (parent_width, parent_width * 9.0 / 16.0),
            AspectRatio::NineSixteen => (parent_height * 9.0 / 16.0, parent_height),
        }
    }
}
