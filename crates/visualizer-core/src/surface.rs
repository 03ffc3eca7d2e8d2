//! Drawing surface abstraction.
//!
//! The scene issues immediate-mode commands in the style of a 2D canvas
//! context. The browser front-end implements [`Surface`] over
//! `CanvasRenderingContext2d`; tests implement it with a command recorder.

use glam::Vec2;
use smallvec::SmallVec;

/// Two-stop linear gradient between `from` and `to` in current user space.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient<'a> {
    pub from: Vec2,
    pub to: Vec2,
    pub start_color: &'a str,
    pub end_color: &'a str,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint<'a> {
    Solid(&'a str),
    Gradient(LinearGradient<'a>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

/// Path buffer; shapes up to a few hundred vertices stay on the stack.
pub type Path = SmallVec<[PathCmd; 128]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// A decoded image the surface can blit.
pub trait ImageSource {
    /// Natural pixel size. Zero-sized images are treated as not drawable.
    fn size(&self) -> Vec2;
}

pub trait Surface {
    type Image: ImageSource;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn scale(&mut self, factor: Vec2);

    fn clear(&mut self, size: Vec2);
    fn set_fill(&mut self, paint: Paint<'_>);
    fn set_stroke(&mut self, paint: Paint<'_>);
    fn set_line_width(&mut self, width: f32);
    fn set_round_caps(&mut self);
    fn set_shadow(&mut self, color: &str, blur: f32);
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_path(&mut self, path: &[PathCmd]);
    fn draw_image(&mut self, image: &Self::Image, src: Rect, dst: Rect);
}

/// Load state of an asynchronously fetched image. Only `Ready` images are
/// ever handed to the scene.
#[derive(Clone, Debug, Default)]
pub enum ImageSlot<I> {
    #[default]
    Absent,
    Loading,
    Ready(I),
}

impl<I: ImageSource> ImageSlot<I> {
    pub fn ready(&self) -> Option<&I> {
        match self {
            ImageSlot::Ready(img) => {
                let s = img.size();
                (s.x > 0.0 && s.y > 0.0).then_some(img)
            }
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ImageSlot::Loading)
    }
}
