//! Host-independent half of video export: container negotiation and the
//! progress/completion state machine driven by audio playback events.

use serde::{Deserialize, Serialize};

use crate::constants::EXPORT_BASENAME;
use crate::error::RecordingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "video/mp4")]
    Mp4,
    #[serde(rename = "video/webm")]
    WebM,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "video/mp4",
            ExportFormat::WebM => "video/webm",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "mp4",
            ExportFormat::WebM => "webm",
        }
    }

    pub fn alternate(self) -> ExportFormat {
        match self {
            ExportFormat::Mp4 => ExportFormat::WebM,
            ExportFormat::WebM => ExportFormat::Mp4,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.{}", EXPORT_BASENAME, self.extension())
    }
}

/// Pick the container to record with: the requested one when the platform
/// supports it, otherwise the other one.
pub fn negotiate_format(
    requested: ExportFormat,
    supports: impl Fn(&str) -> bool,
) -> Result<ExportFormat, RecordingError> {
    if supports(requested.mime_type()) {
        return Ok(requested);
    }
    let fallback = requested.alternate();
    if !supports(fallback.mime_type()) {
        return Err(RecordingError::NoSupportedContainer);
    }
    log::warn!(
        "[export] {} not supported, falling back to {}",
        requested.mime_type(),
        fallback.mime_type()
    );
    Ok(fallback)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Recording,
    /// Playback ended; the encoder is still writing its output.
    Flushing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExportEvent {
    Progress(f32),
    /// Stop the encoder; completion follows once its output is closed.
    Flush,
    Completed,
}

/// Progress reported in percent; never decreases within one session and
/// completes exactly once.
#[derive(Clone, Debug, Default)]
pub struct ExportSession {
    state: ExportState,
    format: Option<ExportFormat>,
    progress: f32,
}

impl ExportSession {
    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn format(&self) -> Option<ExportFormat> {
        self.format
    }

    pub fn is_recording(&self) -> bool {
        self.state == ExportState::Recording
    }

    /// Recording or still flushing; a new export must wait.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ExportState::Recording | ExportState::Flushing)
    }

    pub fn begin(&mut self, format: ExportFormat) -> Result<ExportEvent, RecordingError> {
        if self.is_busy() {
            return Err(RecordingError::AlreadyRunning);
        }
        self.state = ExportState::Recording;
        self.format = Some(format);
        self.progress = 0.0;
        log::info!("[export] recording {}", format.mime_type());
        Ok(ExportEvent::Progress(0.0))
    }

    /// Playback position update. Ignored outside a recording or while the
    /// duration is still unknown.
    pub fn on_time_update(&mut self, position_sec: f64, duration_sec: f64) -> Option<ExportEvent> {
        if !self.is_recording() || !(duration_sec > 0.0) || !position_sec.is_finite() {
            return None;
        }
        let pct = ((position_sec / duration_sec) * 100.0).clamp(0.0, 100.0) as f32;
        if pct > self.progress {
            self.progress = pct;
        }
        Some(ExportEvent::Progress(self.progress))
    }

    /// Audio reached its end: report 100 and ask for the encoder to flush.
    /// Repeated calls yield nothing.
    pub fn on_ended(&mut self) -> Vec<ExportEvent> {
        if !self.is_recording() {
            return Vec::new();
        }
        self.state = ExportState::Flushing;
        self.progress = 100.0;
        vec![ExportEvent::Progress(100.0), ExportEvent::Flush]
    }

    /// The encoder closed its output. Completes exactly once.
    pub fn on_flushed(&mut self) -> Option<ExportEvent> {
        if self.state != ExportState::Flushing {
            return None;
        }
        self.state = ExportState::Finished;
        log::info!("[export] finished");
        Some(ExportEvent::Completed)
    }

    /// Abort without completing, e.g. when the recorder failed to start.
    pub fn cancel(&mut self) -> Result<(), RecordingError> {
        if !self.is_recording() {
            return Err(RecordingError::NotRunning);
        }
        self.state = ExportState::Idle;
        self.progress = 0.0;
        Ok(())
    }
}
