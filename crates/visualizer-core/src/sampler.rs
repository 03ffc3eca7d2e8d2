//! Frequency sampling: one byte-magnitude snapshot per tick.

use crate::config::SMOOTHING_RANGE;
use crate::constants::FREQUENCY_BIN_COUNT;

/// Live analysis node that can report byte frequency magnitudes.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    /// Write the current magnitudes (0..=255) into `out`, which is exactly
    /// `bin_count()` long.
    fn read_bytes(&mut self, out: &mut [u8]);
    /// Takes effect on the next internal analysis step.
    fn set_smoothing(&mut self, time_constant: f32);
}

/// Wraps an optional analysis source and owns the snapshot buffer so no
/// per-tick allocation happens.
pub struct FrequencySampler<S> {
    source: Option<S>,
    buf: Vec<u8>,
    applied_smoothing: Option<f32>,
}

impl<S: FrequencySource> Default for FrequencySampler<S> {
    fn default() -> Self {
        Self {
            source: None,
            buf: Vec::new(),
            applied_smoothing: None,
        }
    }
}

impl<S: FrequencySource> FrequencySampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }

    pub fn attach(&mut self, source: S) {
        self.source = Some(source);
        self.applied_smoothing = None;
    }

    pub fn detach(&mut self) -> Option<S> {
        self.applied_smoothing = None;
        self.source.take()
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Forward the smoothing constant only when it changed since the last call.
    /// Out-of-range and NaN values are clamped into the slider range first.
    pub fn apply_smoothing(&mut self, time_constant: f32) {
        let time_constant = SMOOTHING_RANGE.clamp(time_constant);
        if let Some(src) = self.source.as_mut() {
            if self.applied_smoothing != Some(time_constant) {
                src.set_smoothing(time_constant);
                self.applied_smoothing = Some(time_constant);
            }
        }
    }

    /// Current snapshot, or `None` when no analysis node is attached yet.
    /// A source that reports no bins yields an all-zero snapshot.
    pub fn sample(&mut self) -> Option<&[u8]> {
        let src = self.source.as_mut()?;
        let bins = src.bin_count();
        if bins == 0 {
            self.buf.clear();
            self.buf.resize(FREQUENCY_BIN_COUNT, 0);
            return Some(&self.buf);
        }
        if self.buf.len() != bins {
            self.buf.resize(bins, 0);
        }
        src.read_bytes(&mut self.buf);
        Some(&self.buf)
    }
}

/// Fixed snapshot source, handy for silence and synthetic signals.
#[derive(Clone, Debug)]
pub struct ConstantSource {
    pub bins: Vec<u8>,
    pub smoothing: f32,
}

impl ConstantSource {
    pub fn filled(len: usize, value: u8) -> Self {
        Self {
            bins: vec![value; len],
            smoothing: 0.0,
        }
    }
}

impl FrequencySource for ConstantSource {
    fn bin_count(&self) -> usize {
        self.bins.len()
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        out.copy_from_slice(&self.bins);
    }

    fn set_smoothing(&mut self, time_constant: f32) {
        self.smoothing = time_constant;
    }
}
