use anyhow::anyhow;
use visualizer_core::FrequencySource;
use web_sys as web;

use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_MAX_DECIBELS, ANALYSER_MIN_DECIBELS};

/// Browser analyser node exposed as a frequency source for the sampler.
#[derive(Clone)]
pub struct WebAnalyser(pub web::AnalyserNode);

impl FrequencySource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.0.frequency_bin_count() as usize
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        self.0.get_byte_frequency_data(out);
    }

    fn set_smoothing(&mut self, time_constant: f32) {
        self.0.set_smoothing_time_constant(time_constant as f64);
    }
}

/// media element -> analyser -> speakers, with the analyser also feeding a
/// stream destination that the recorder takes its audio track from.
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    source: web::MediaElementAudioSourceNode,
    pub analyser: web::AnalyserNode,
    pub stream_dest: web::MediaStreamAudioDestinationNode,
}

// Create the analyser with the byte window the scene expects; logs on failure
pub fn create_analyser(audio_ctx: &web::AudioContext) -> anyhow::Result<web::AnalyserNode> {
    let analyser = audio_ctx.create_analyser().map_err(|e| {
        log::error!("[audio] AnalyserNode error: {:?}", e);
        anyhow!("{:?}", e)
    })?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_min_decibels(ANALYSER_MIN_DECIBELS);
    analyser.set_max_decibels(ANALYSER_MAX_DECIBELS);
    Ok(analyser)
}

pub fn build_graph(audio_el: &web::HtmlAudioElement) -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow!("{:?}", e))?;
    let source = ctx.create_media_element_source(audio_el).map_err(|e| {
        log::error!("[audio] MediaElementSource error: {:?}", e);
        anyhow!("{:?}", e)
    })?;
    let analyser = create_analyser(&ctx)?;
    let stream_dest = ctx.create_media_stream_destination().map_err(|e| {
        log::error!("[audio] MediaStreamDestination error: {:?}", e);
        anyhow!("{:?}", e)
    })?;

    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow!("{:?}", e))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(|e| anyhow!("{:?}", e))?;
    analyser
        .connect_with_audio_node(&stream_dest)
        .map_err(|e| anyhow!("{:?}", e))?;

    log::info!(
        "[audio] graph ready: fft={} bins={} rate={}",
        analyser.fft_size(),
        analyser.frequency_bin_count(),
        ctx.sample_rate()
    );
    Ok(AudioGraph {
        ctx,
        source,
        analyser,
        stream_dest,
    })
}

impl AudioGraph {
    pub fn resume(&self) {
        _ = self.ctx.resume();
    }

    /// Disconnect every node and close the context. The returned promise
    /// settles once the context is closed.
    pub fn close(&self) -> Option<js_sys::Promise> {
        _ = self.source.disconnect();
        _ = self.analyser.disconnect();
        match self.ctx.close() {
            Ok(p) => Some(p),
            Err(e) => {
                log::error!("[audio] close error: {:?}", e);
                None
            }
        }
    }
}
