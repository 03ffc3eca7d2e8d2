use anyhow::anyhow;
use std::cell::Cell;
use std::rc::Rc;
use visualizer_core::AspectRatio;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::sizing::canvas_layout;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element by id and cast it to the expected DOM type.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow!("#{} has unexpected type: {:?}", id, e))
}

/// Attach a listener for the lifetime of the page.
pub fn add_listener(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Size the canvas to its parent for the chosen aspect ratio, with the
/// backing store scaled by devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, aspect: AspectRatio) {
    let Some(w) = web::window() else {
        return;
    };
    let (pw, ph) = match canvas.parent_element() {
        Some(parent) => {
            let rect = parent.get_bounding_client_rect();
            (rect.width(), rect.height())
        }
        None => {
            let rect = canvas.get_bounding_client_rect();
            (rect.width(), rect.height())
        }
    };
    let layout = canvas_layout(aspect, pw, ph, w.device_pixel_ratio());
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", layout.css_width));
    _ = style.set_property("height", &format!("{}px", layout.css_height));
    canvas.set_width(layout.backing_width);
    canvas.set_height(layout.backing_height);
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, aspect: Rc<Cell<AspectRatio>>) {
    sync_canvas_backing_size(canvas, aspect.get());
    let canvas_resize = canvas.clone();
    if let Some(window) = web::window() {
        add_listener(&window, "resize", move || {
            sync_canvas_backing_size(&canvas_resize, aspect.get());
        });
    }
}

/// Hand a blob URL to the browser as a file download.
pub fn trigger_download(document: &web::Document, url: &str, file_name: &str) -> anyhow::Result<()> {
    let anchor: web::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;
    body.append_child(&anchor).map_err(|e| anyhow!("{:?}", e))?;
    anchor.click();
    _ = body.remove_child(&anchor);
    Ok(())
}
