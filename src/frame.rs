use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use visualizer_core::{ActiveConfig, FrequencySampler, Scene, SceneInputs, TickOutcome};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::WebAnalyser;
use crate::canvas::CanvasSurface;
use crate::constants::FRAME_LOG_INTERVAL_SEC;
use crate::images::ImageHandle;

/// Everything the animation-frame callback touches between ticks.
pub struct FrameContext {
    pub scene: Scene,
    pub sampler: FrequencySampler<WebAnalyser>,
    pub config: Rc<RefCell<ActiveConfig>>,
    pub canvas: web::HtmlCanvasElement,
    pub surface: CanvasSurface,
    pub logo: ImageHandle,
    pub background: ImageHandle,

    pub last_log: Instant,
    pub frames_since_log: u32,
    pub skipped_since_log: u32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        let config = self.config.borrow();
        self.sampler
            .apply_smoothing(config.config.smoothing_time_constant);
        let logo = self.logo.slot();
        let background = self.background.slot();
        let outcome = self.scene.tick(
            &mut self.surface,
            SceneInputs {
                size,
                snapshot: self.sampler.sample(),
                config: &config.config,
                background: background.ready(),
                logo: logo.ready(),
            },
        );
        match outcome {
            TickOutcome::Skipped => self.skipped_since_log += 1,
            TickOutcome::Drawn(_) => self.frames_since_log += 1,
        }

        let elapsed = self.last_log.elapsed().as_secs_f32();
        if elapsed >= FRAME_LOG_INTERVAL_SEC {
            log::debug!(
                "[scene] {:.1} fps, {} skipped, scale={:.3}",
                self.frames_since_log as f32 / elapsed,
                self.skipped_since_log,
                self.scene.camera_scale()
            );
            self.last_log = Instant::now();
            self.frames_since_log = 0;
            self.skipped_since_log = 0;
        }
    }
}

/// Stops the animation-frame loop started by [`start_loop`].
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // drops the self-referencing closure
        self.tick.borrow_mut().take();
        log::info!("[scene] loop stopped");
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            raf_id.set(Some(id));
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let cancelled = Rc::new(Cell::new(false));
    let raf_id = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let cancelled_tick = cancelled.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if cancelled_tick.get() {
            return;
        }
        // a context still borrowed elsewhere costs this frame only
        match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.frame(),
            Err(_) => log::warn!("[scene] frame context busy, skipping tick"),
        }
        request_frame(&tick_clone, &raf_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    log::info!("[scene] loop started");

    LoopHandle {
        cancelled,
        raf_id,
        tick,
    }
}
