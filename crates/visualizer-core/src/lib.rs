pub mod analyser;
pub mod background;
pub mod config;
pub mod constants;
pub mod error;
pub mod logo;
pub mod motion;
pub mod particles;
pub mod presets;
pub mod recording;
pub mod sampler;
pub mod scene;
pub mod spectrum;
pub mod surface;

pub use analyser::SpectrumAnalyser;
pub use config::*;
pub use error::*;
pub use motion::{frequency_slice, FrameSignals};
pub use particles::{Particle, ParticleField};
pub use recording::{negotiate_format, ExportEvent, ExportFormat, ExportSession, ExportState};
pub use sampler::{ConstantSource, FrequencySampler, FrequencySource};
pub use scene::{FrameReport, Scene, SceneInputs, TickOutcome};
pub use surface::{ImageSlot, ImageSource, LinearGradient, Paint, Path, PathCmd, Rect, Surface};
