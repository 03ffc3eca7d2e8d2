use web_sys as web;

use crate::constants::{EXPORT_OVERLAY_ID, EXPORT_PROGRESS_ID};
use crate::sizing::progress_label;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(EXPORT_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(EXPORT_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_progress(document: &web::Document, percent: f32) {
    if let Some(el) = document.get_element_by_id(EXPORT_PROGRESS_ID) {
        el.set_text_content(Some(&progress_label(percent)));
    }
}
