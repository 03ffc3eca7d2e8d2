#![cfg(target_arch = "wasm32")]
//! Browser front-end: binds the visualizer core to a `<canvas>`, an
//! `<audio>` element and `MediaRecorder` export, and exposes the result to
//! the host page as the [`Studio`] class.

use anyhow::anyhow;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use visualizer_core::presets::all_presets;
use visualizer_core::{
    ActiveConfig, AspectRatio, ExportFormat, FrequencySampler, Scene, VisualizerConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod dom;
mod frame;
mod images;
mod overlay;
mod recorder;
mod sizing;

use constants::{DEFAULT_AUDIO_ID, DEFAULT_CANVAS_ID};

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("visualizer-studio starting");
    Ok(())
}

/// One visualizer bound to a canvas and an audio element.
#[wasm_bindgen]
pub struct Studio {
    canvas: web::HtmlCanvasElement,
    audio: web::HtmlAudioElement,
    graph: Option<audio::AudioGraph>,
    frame: Rc<RefCell<frame::FrameContext>>,
    loop_handle: Option<frame::LoopHandle>,
    config: Rc<RefCell<ActiveConfig>>,
    aspect: Rc<Cell<AspectRatio>>,
    logo: images::ImageHandle,
    background: images::ImageHandle,
    exporter: Rc<RefCell<recorder::Exporter>>,
}

#[wasm_bindgen]
impl Studio {
    /// Binds to `#visualizer-canvas` and `#visualizer-audio` unless other ids
    /// are given, and starts drawing immediately. Audio analysis begins once
    /// [`Studio::connect_audio`] is called from a user gesture.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>, audio_id: Option<String>) -> Result<Studio, JsValue> {
        Self::build(
            canvas_id.as_deref().unwrap_or(DEFAULT_CANVAS_ID),
            audio_id.as_deref().unwrap_or(DEFAULT_AUDIO_ID),
        )
        .map_err(to_js)
    }

    /// Create the audio graph on first call (browsers require a user
    /// gesture) and resume it on later ones.
    pub fn connect_audio(&mut self) -> Result<(), JsValue> {
        if let Some(graph) = &self.graph {
            graph.resume();
            return Ok(());
        }
        let graph = audio::build_graph(&self.audio).map_err(to_js)?;
        graph.resume();
        self.frame
            .borrow_mut()
            .sampler
            .attach(audio::WebAnalyser(graph.analyser.clone()));
        self.graph = Some(graph);
        Ok(())
    }

    /// Replace the whole configuration with a plain JS object in the
    /// camelCase layout, clamped into the slider ranges. The active preset
    /// name becomes "Custom".
    pub fn set_config(&self, value: JsValue) -> Result<(), JsValue> {
        let config: VisualizerConfig = serde_wasm_bindgen::from_value(value)?;
        self.config.borrow_mut().replace(config.clamped());
        Ok(())
    }

    pub fn config(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.config.borrow().config)?)
    }

    pub fn preset_name(&self) -> String {
        self.config.borrow().name.clone()
    }

    pub fn preset_names() -> js_sys::Array {
        all_presets()
            .into_iter()
            .map(|p| JsValue::from_str(&p.name))
            .collect()
    }

    pub fn select_preset(&self, name: &str) -> Result<(), JsValue> {
        self.config
            .borrow_mut()
            .select_preset_named(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_logo(&self, url: &str) -> Result<(), JsValue> {
        self.logo.load(url).map_err(to_js)
    }

    pub fn clear_logo(&self) {
        self.logo.clear();
    }

    pub fn set_background(&self, url: &str) -> Result<(), JsValue> {
        self.background.load(url).map_err(to_js)
    }

    pub fn clear_background(&self) {
        self.background.clear();
    }

    pub fn images_loading(&self) -> bool {
        self.logo.slot().is_loading() || self.background.slot().is_loading()
    }

    /// `"16:9"` or `"9:16"`.
    pub fn set_aspect_ratio(&self, value: JsValue) -> Result<(), JsValue> {
        let aspect: AspectRatio = serde_wasm_bindgen::from_value(value)?;
        self.aspect.set(aspect);
        dom::sync_canvas_backing_size(&self.canvas, aspect);
        Ok(())
    }

    /// Record the track from the start into `"video/mp4"` or `"video/webm"`,
    /// falling back to WebM when MP4 is not supported. `on_progress` receives
    /// percentages from 0 to 100. Returns the MIME type actually used.
    pub fn export(
        &self,
        format: JsValue,
        on_progress: Option<js_sys::Function>,
    ) -> Result<String, JsValue> {
        let requested: ExportFormat = if format.is_undefined() || format.is_null() {
            ExportFormat::default()
        } else {
            serde_wasm_bindgen::from_value(format)?
        };
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| to_js(anyhow!("audio is not connected")))?;
        let first = self
            .exporter
            .borrow_mut()
            .start(&self.canvas, graph, requested, on_progress)
            .map_err(to_js)?;
        recorder::dispatch(&self.exporter, [first]);
        let used = self
            .exporter
            .borrow()
            .format()
            .unwrap_or(requested)
            .mime_type();
        Ok(used.to_string())
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.borrow().is_recording()
    }

    pub fn cancel_export(&self) {
        self.exporter.borrow_mut().cancel();
    }

    /// Stop the frame loop and release the audio graph.
    pub fn shutdown(&mut self) {
        self.exporter.borrow_mut().cancel();
        if let Some(handle) = self.loop_handle.take() {
            handle.cancel();
        }
        self.frame.borrow_mut().sampler.detach();
        if let Some(graph) = self.graph.take() {
            if let Some(promise) = graph.close() {
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::error!("[audio] close failed: {:?}", e);
                    } else {
                        log::info!("[audio] context closed");
                    }
                });
            }
        }
    }
}

impl Studio {
    fn build(canvas_id: &str, audio_id: &str) -> anyhow::Result<Studio> {
        let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, canvas_id)?;
        let audio: web::HtmlAudioElement = dom::element_by_id(&document, audio_id)?;

        let aspect = Rc::new(Cell::new(AspectRatio::default()));
        dom::wire_canvas_resize(&canvas, aspect.clone());
        overlay::hide(&document);

        let config = Rc::new(RefCell::new(ActiveConfig::default()));
        let logo = images::ImageHandle::new("logo");
        let background = images::ImageHandle::new("background");
        let surface = canvas::CanvasSurface::new(&canvas)?;

        let frame = Rc::new(RefCell::new(frame::FrameContext {
            scene: Scene::new(),
            sampler: FrequencySampler::default(),
            config: config.clone(),
            canvas: canvas.clone(),
            surface,
            logo: logo.clone(),
            background: background.clone(),
            last_log: Instant::now(),
            frames_since_log: 0,
            skipped_since_log: 0,
        }));
        let loop_handle = frame::start_loop(frame.clone());
        let exporter = recorder::Exporter::install(document, audio.clone());

        log::info!(
            "[scene] studio bound to #{} / #{} with preset {}",
            canvas_id,
            audio_id,
            config.borrow().name
        );
        Ok(Studio {
            canvas,
            audio,
            graph: None,
            frame,
            loop_handle: Some(loop_handle),
            config,
            aspect,
            logo,
            background,
            exporter,
        })
    }
}
