use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordingError {
    #[error("container {requested} is not supported by this platform")]
    Unsupported { requested: &'static str },
    #[error("neither MP4 nor WebM recording is supported")]
    NoSupportedContainer,
    #[error("an export is already running")]
    AlreadyRunning,
    #[error("no export is running")]
    NotRunning,
}
