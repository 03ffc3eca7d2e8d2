//! Host-side spectrum analyser with the same byte snapshot semantics as the
//! browser's `AnalyserNode`: Blackman window, per-bin magnitude smoothing and
//! a decibel window mapped onto 0..=255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::Arc;

use crate::constants::{FFT_SIZE, MAX_DECIBELS, MIN_DECIBELS};
use crate::sampler::FrequencySource;

pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    history: VecDeque<f32>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
}

impl Default for SpectrumAnalyser {
    fn default() -> Self {
        Self::new(FFT_SIZE, 0.8)
    }
}

impl SpectrumAnalyser {
    pub fn new(fft_size: usize, smoothing: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let window = (0..fft_size).map(|i| blackman_window(i, fft_size)).collect();
        Self {
            fft,
            fft_size,
            history: VecDeque::from(vec![0.0; fft_size]),
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    /// Append mono PCM samples in [-1, 1]; only the newest `fft_size` are kept.
    pub fn push_samples(&mut self, samples: &[f32]) {
        for &s in samples {
            if self.history.len() == self.fft_size {
                self.history.pop_front();
            }
            self.history.push_back(s);
        }
    }

    /// Run one analysis step over the current window, updating the smoothed
    /// linear magnitudes.
    pub fn analyse(&mut self) {
        for (i, (slot, s)) in self.scratch.iter_mut().zip(self.history.iter()).enumerate() {
            *slot = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);
        let norm = 1.0 / self.fft_size as f32;
        let tau = self.smoothing;
        for (k, out) in self.smoothed.iter_mut().enumerate() {
            let mag = self.scratch[k].norm() * norm;
            *out = tau * *out + (1.0 - tau) * mag;
        }
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.smoothed
    }
}

impl FrequencySource for SpectrumAnalyser {
    fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        self.analyse();
        for (o, &m) in out.iter_mut().zip(self.smoothed.iter()) {
            *o = magnitude_to_byte(m);
        }
    }

    fn set_smoothing(&mut self, time_constant: f32) {
        self.smoothing = time_constant.clamp(0.0, 1.0);
    }
}

pub fn blackman_window(index: usize, size: usize) -> f32 {
    let a = 0.16;
    let a0 = 0.5 * (1.0 - a);
    let a1 = 0.5;
    let a2 = 0.5 * a;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}

/// Linear magnitude to byte over the [MIN_DECIBELS, MAX_DECIBELS] window.
pub fn magnitude_to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    scaled.clamp(0.0, 255.0) as u8
}
