/// Browser-side wiring constants: element ids, analyser graph settings and
/// loop diagnostics.
///
/// Drawing and motion constants live in `visualizer_core::constants`.
// Default element ids looked up when the host page does not pass its own
pub const DEFAULT_CANVAS_ID: &str = "visualizer-canvas";
pub const DEFAULT_AUDIO_ID: &str = "visualizer-audio";

// "Generating Video..." overlay
pub const EXPORT_OVERLAY_ID: &str = "export-overlay";
pub const EXPORT_PROGRESS_ID: &str = "export-progress";
pub const EXPORT_OVERLAY_TITLE: &str = "Generating Video...";

// Analyser node; byte mapping window matches the host-side analyser
pub const ANALYSER_FFT_SIZE: u32 = 2048;
pub const ANALYSER_MIN_DECIBELS: f64 = -100.0;
pub const ANALYSER_MAX_DECIBELS: f64 = -30.0;

// Backing store is never allowed to collapse below one pixel
pub const MIN_BACKING_PX: u32 = 1;

// Frame-rate diagnostics are logged at most this often
pub const FRAME_LOG_INTERVAL_SEC: f32 = 10.0;
