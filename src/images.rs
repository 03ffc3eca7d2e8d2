//! Logo and background image loading. A tick only ever sees an image once
//! its `load` event fired with a decoded, non-empty bitmap.

use anyhow::anyhow;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use visualizer_core::ImageSlot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::WebImage;

#[derive(Clone)]
pub struct ImageHandle {
    label: &'static str,
    slot: Rc<RefCell<ImageSlot<WebImage>>>,
    // bumped per request so a slow earlier load cannot overwrite a newer one
    generation: Rc<Cell<u32>>,
}

impl ImageHandle {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            slot: Rc::new(RefCell::new(ImageSlot::Absent)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn slot(&self) -> Ref<'_, ImageSlot<WebImage>> {
        self.slot.borrow()
    }

    pub fn clear(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        *self.slot.borrow_mut() = ImageSlot::Absent;
        log::info!("[images] {} cleared", self.label);
    }

    pub fn load(&self, url: &str) -> anyhow::Result<()> {
        let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        *self.slot.borrow_mut() = ImageSlot::Loading;

        let label = self.label;
        let on_load = {
            let slot = self.slot.clone();
            let current = self.generation.clone();
            let img = img.clone();
            Closure::wrap(Box::new(move || {
                if current.get() != generation {
                    return;
                }
                if img.complete() && img.natural_width() > 0 && img.natural_height() > 0 {
                    log::info!(
                        "[images] {} ready ({}x{})",
                        label,
                        img.natural_width(),
                        img.natural_height()
                    );
                    *slot.borrow_mut() = ImageSlot::Ready(WebImage(img.clone()));
                } else {
                    log::warn!("[images] {} decoded to an empty bitmap", label);
                    *slot.borrow_mut() = ImageSlot::Absent;
                }
            }) as Box<dyn FnMut()>)
        };
        let on_error = {
            let slot = self.slot.clone();
            let current = self.generation.clone();
            Closure::wrap(Box::new(move || {
                if current.get() != generation {
                    return;
                }
                log::warn!("[images] {} failed to load", label);
                *slot.borrow_mut() = ImageSlot::Absent;
            }) as Box<dyn FnMut()>)
        };
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();
        img.set_src(url);
        Ok(())
    }
}
