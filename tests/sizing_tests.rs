// Host-side tests for canvas layout and the export overlay label.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod sizing {
    include!("../src/sizing.rs");
}

use sizing::*;
use visualizer_core::AspectRatio;

#[test]
fn landscape_fills_parent_width() {
    let layout = canvas_layout(AspectRatio::SixteenNine, 1280.0, 900.0, 2.0);
    assert_eq!(layout.css_width, 1280.0);
    assert_eq!(layout.css_height, 720.0);
    assert_eq!((layout.backing_width, layout.backing_height), (2560, 1440));
}

#[test]
fn portrait_fills_parent_height() {
    let layout = canvas_layout(AspectRatio::NineSixteen, 1000.0, 800.0, 1.0);
    assert_eq!(layout.css_width, 450.0);
    assert_eq!(layout.css_height, 800.0);
    assert_eq!((layout.backing_width, layout.backing_height), (450, 800));
}

#[test]
fn degenerate_inputs_keep_a_one_pixel_backing_store() {
    let hidden = canvas_layout(AspectRatio::NineSixteen, 0.0, 0.0, 2.0);
    assert_eq!((hidden.backing_width, hidden.backing_height), (1, 1));

    // a bogus devicePixelRatio is treated as 1
    let layout = canvas_layout(AspectRatio::SixteenNine, 320.0, 240.0, 0.0);
    assert_eq!((layout.backing_width, layout.backing_height), (320, 180));
    let negative = canvas_layout(AspectRatio::SixteenNine, -50.0, 240.0, 1.0);
    assert_eq!(negative.css_width, 0.0);
}

#[test]
fn progress_label_rounds_and_clamps() {
    assert_eq!(progress_label(0.0), "Generating Video... 0%");
    assert_eq!(progress_label(42.6), "Generating Video... 43%");
    assert_eq!(progress_label(180.0), "Generating Video... 100%");
}
