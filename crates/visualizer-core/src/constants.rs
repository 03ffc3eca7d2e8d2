// Shared tuning constants for the frame pipeline.

// Analysis
pub const FFT_SIZE: usize = 2048;
pub const FREQUENCY_BIN_COUNT: usize = FFT_SIZE / 2;
pub const BASS_BIN_COUNT: usize = 16; // first bins used as the beat proxy
pub const PLAYING_THRESHOLD: f32 = 1.0; // overall average above this means audio is live
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

// Camera
pub const CAMERA_ZOOM_SPAN: f32 = 0.07; // full-scale average adds this much zoom
pub const CAMERA_SMOOTHING: f32 = 0.1; // fraction of the remaining gap closed per frame
pub const CAMERA_SHAKE_SPAN: f32 = 15.0; // px of shake at full bass and intensity 1

// Background
pub const BACKGROUND_CLOCK_STEP: f32 = 0.002;
pub const BG_PAN_X: f32 = 50.0;
pub const BG_PAN_Y: f32 = 30.0;
pub const BG_ZOOM_RATE: f32 = 0.8;
pub const BG_ZOOM_SPAN: f32 = 0.1;
pub const BG_PULSE_SPAN: f32 = 0.05;

// Particles
pub const PARTICLE_COUNT: usize = 100;
pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
pub const PARTICLE_RADIUS_SPAN: f32 = 2.0;
pub const PARTICLE_DRIFT: f32 = 1.0; // constant fall/rise added to base vy
pub const RADIAL_OUT_SPEED: f32 = 2.0;
pub const VORTEX_IN_SPEED: f32 = 1.5;
pub const POLAR_MIN_STEP: f32 = 0.1;
pub const VORTEX_SPIN: f32 = 0.01; // radians per frame
pub const RADIAL_RESPAWN_MAX: f32 = 50.0;

// Spectrum shapes (fractions of min(w, h) or of height)
pub const PYRO_BASE_RADIUS: f32 = 0.05;
pub const PYRO_PULSE: f32 = 0.1;
pub const PYRO_BAR_SPAN: f32 = 0.15;
pub const SHARDS_OUTER_RADIUS: f32 = 0.18;
pub const SHARDS_BAR_SPAN: f32 = 0.1;
pub const BLOOM_BASE_RADIUS: f32 = 0.05;
pub const BLOOM_BAR_SPAN: f32 = 0.12;
pub const BLOOM_RATE: f32 = 2.0;
pub const BLOOM_DEPTH: f32 = 0.2;

// Logo
pub const LOGO_BASE_FRACTION: f32 = 0.3;
pub const LOGO_PULSE_SPAN: f32 = 0.1;
pub const LOGO_SHAKE_SPAN: f32 = 15.0;
pub const LOGO_FLOAT_AMPLITUDE: f32 = 10.0;
pub const LOGO_FLOAT_RATE_X: f32 = 0.5;
pub const LOGO_FLOAT_RATE_Y: f32 = 0.3;
pub const LOGO_ALPHA: f32 = 0.9;
pub const LOGO_GLOW_SPAN: f32 = 30.0;
pub const SPECTRUM_LOGO_OFFSET: f32 = 0.3; // of the drawn logo height

// High-energy flash
pub const FLASH_BASS_THRESHOLD: f32 = 220.0;
pub const FLASH_RAMP: f32 = 35.0;
pub const FLASH_GAIN: f32 = 1.5;
pub const FLASH_MAX_OPACITY: f32 = 0.7;

// Export
pub const CAPTURE_FPS: f64 = 30.0;
pub const EXPORT_BASENAME: &str = "visualizer-video";
