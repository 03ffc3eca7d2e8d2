//! Browser half of video export: captures the canvas plus the analyser's
//! stream-destination audio into a `MediaRecorder`, drives the shared
//! [`ExportSession`] from the audio element's playback events and hands the
//! finished file to the browser as a download.

use anyhow::anyhow;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use visualizer_core::constants::CAPTURE_FPS;
use visualizer_core::{
    negotiate_format, ExportEvent, ExportFormat, ExportSession, RecordingError,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::audio::AudioGraph;
use crate::dom;
use crate::overlay;

struct Active {
    recorder: web::MediaRecorder,
    stream: web::MediaStream,
    chunks: Rc<RefCell<Vec<web::Blob>>>,
    was_playing: bool,
    // kept alive until the next export replaces them
    _on_data: Closure<dyn FnMut(web::BlobEvent)>,
    _on_stop: Closure<dyn FnMut()>,
}

pub struct Exporter {
    this: Weak<RefCell<Exporter>>,
    document: web::Document,
    audio: web::HtmlAudioElement,
    session: ExportSession,
    active: Option<Active>,
    on_progress: Option<js_sys::Function>,
}

impl Exporter {
    /// Creates the exporter and subscribes it to the audio element's
    /// `timeupdate` and `ended` events for the lifetime of the page.
    pub fn install(document: web::Document, audio: web::HtmlAudioElement) -> Rc<RefCell<Self>> {
        let exporter = Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                document,
                audio: audio.clone(),
                session: ExportSession::default(),
                active: None,
                on_progress: None,
            })
        });

        let on_time = exporter.clone();
        let audio_time = audio.clone();
        dom::add_listener(&audio, "timeupdate", move || {
            let event = on_time
                .borrow_mut()
                .session
                .on_time_update(audio_time.current_time(), audio_time.duration());
            dispatch(&on_time, event);
        });

        let on_end = exporter.clone();
        dom::add_listener(&audio, "ended", move || {
            let events = on_end.borrow_mut().session.on_ended();
            dispatch(&on_end, events);
        });

        exporter
    }

    /// True from `start` until the file has been handed to the browser.
    pub fn is_recording(&self) -> bool {
        self.session.is_busy()
    }

    pub fn format(&self) -> Option<ExportFormat> {
        self.session.format()
    }

    /// Apply an event to the page and return the progress callback to invoke
    /// once the exporter is no longer borrowed.
    fn apply(&mut self, event: ExportEvent) -> Option<js_sys::Function> {
        match event {
            ExportEvent::Progress(pct) => {
                overlay::set_progress(&self.document, pct);
                self.on_progress.clone()
            }
            ExportEvent::Flush => {
                // the download and completion happen in the recorder's `stop` handler
                if let Some(active) = &self.active {
                    if active.recorder.state() != web::RecordingState::Inactive {
                        _ = active.recorder.stop();
                    }
                }
                None
            }
            ExportEvent::Completed => None,
        }
    }

    pub fn start(
        &mut self,
        canvas: &web::HtmlCanvasElement,
        graph: &AudioGraph,
        requested: ExportFormat,
        on_progress: Option<js_sys::Function>,
    ) -> anyhow::Result<ExportEvent> {
        if self.session.is_busy() {
            return Err(RecordingError::AlreadyRunning.into());
        }
        let format = negotiate_format(requested, web::MediaRecorder::is_type_supported)?;

        let stream = combined_stream(canvas, graph)?;
        let options = web::MediaRecorderOptions::new();
        options.set_mime_type(format.mime_type());
        let recorder =
            web::MediaRecorder::new_with_media_stream_and_media_recorder_options(&stream, &options)
                .map_err(|e| {
                    log::error!("[export] MediaRecorder error: {:?}", e);
                    stop_tracks(&stream);
                    RecordingError::Unsupported {
                        requested: format.mime_type(),
                    }
                })?;

        let chunks: Rc<RefCell<Vec<web::Blob>>> = Rc::new(RefCell::new(Vec::new()));
        let on_data = {
            let chunks = chunks.clone();
            Closure::wrap(Box::new(move |e: web::BlobEvent| {
                if let Some(blob) = e.data() {
                    if blob.size() > 0.0 {
                        chunks.borrow_mut().push(blob);
                    }
                }
            }) as Box<dyn FnMut(web::BlobEvent)>)
        };
        let was_playing = !self.audio.paused();
        let on_stop = {
            let chunks = chunks.clone();
            let document = self.document.clone();
            let audio = self.audio.clone();
            let stream = stream.clone();
            let this = self.this.clone();
            Closure::wrap(Box::new(move || {
                if let Err(e) = finish(&document, &chunks.borrow(), format) {
                    log::error!("[export] {:?}", e);
                }
                chunks.borrow_mut().clear();
                stop_tracks(&stream);
                overlay::hide(&document);
                if was_playing {
                    _ = audio.play();
                }
                if let Some(exporter) = this.upgrade() {
                    let completed = exporter.borrow_mut().session.on_flushed();
                    dispatch(&exporter, completed);
                }
            }) as Box<dyn FnMut()>)
        };
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

        _ = self.audio.pause();
        self.audio.set_current_time(0.0);

        let first = self.session.begin(format)?;
        self.on_progress = on_progress;
        overlay::show(&self.document);

        if let Err(e) = recorder.start() {
            _ = self.session.cancel();
            stop_tracks(&stream);
            overlay::hide(&self.document);
            return Err(anyhow!("recorder failed to start: {:?}", e));
        }
        graph.resume();
        _ = self.audio.play();

        self.active = Some(Active {
            recorder,
            stream,
            chunks,
            was_playing,
            _on_data: on_data,
            _on_stop: on_stop,
        });
        Ok(first)
    }

    /// Abort a running export without producing a file.
    pub fn cancel(&mut self) {
        if self.session.cancel().is_err() {
            return;
        }
        if let Some(active) = self.active.take() {
            active.recorder.set_onstop(None);
            if active.recorder.state() != web::RecordingState::Inactive {
                _ = active.recorder.stop();
            }
            active.chunks.borrow_mut().clear();
            stop_tracks(&active.stream);
            if !active.was_playing {
                _ = self.audio.pause();
            }
        }
        overlay::hide(&self.document);
        log::info!("[export] cancelled");
    }
}

/// Apply export events in order, invoking the page's progress callback with
/// the exporter released so the callback may call back into the studio.
pub fn dispatch(exporter: &RefCell<Exporter>, events: impl IntoIterator<Item = ExportEvent>) {
    for event in events {
        let callback = exporter.borrow_mut().apply(event);
        if let (ExportEvent::Progress(pct), Some(cb)) = (event, callback) {
            _ = cb.call1(&JsValue::NULL, &JsValue::from_f64(pct as f64));
        }
    }
}

fn combined_stream(
    canvas: &web::HtmlCanvasElement,
    graph: &AudioGraph,
) -> anyhow::Result<web::MediaStream> {
    let video = canvas
        .capture_stream_with_frame_request_rate(CAPTURE_FPS)
        .map_err(|e| anyhow!("canvas capture failed: {:?}", e))?;
    let combined = web::MediaStream::new().map_err(|e| anyhow!("{:?}", e))?;
    for track in video.get_video_tracks().iter() {
        combined.add_track(track.unchecked_ref::<web::MediaStreamTrack>());
    }
    for track in graph.stream_dest.stream().get_audio_tracks().iter() {
        combined.add_track(track.unchecked_ref::<web::MediaStreamTrack>());
    }
    Ok(combined)
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        track.unchecked_ref::<web::MediaStreamTrack>().stop();
    }
}

fn finish(document: &web::Document, chunks: &[web::Blob], format: ExportFormat) -> anyhow::Result<()> {
    let parts = js_sys::Array::new();
    for chunk in chunks {
        parts.push(chunk);
    }
    let bag = web::BlobPropertyBag::new();
    bag.set_type(format.mime_type());
    let blob = web::Blob::new_with_blob_sequence_and_options(&parts, &bag)
        .map_err(|e| anyhow!("{:?}", e))?;
    let url = web::Url::create_object_url_with_blob(&blob).map_err(|e| anyhow!("{:?}", e))?;
    let result = dom::trigger_download(document, &url, &format.file_name());
    _ = web::Url::revoke_object_url(&url);
    log::info!(
        "[export] wrote {} ({} chunks, {:.0} bytes)",
        format.file_name(),
        chunks.len(),
        blob.size()
    );
    result
}
