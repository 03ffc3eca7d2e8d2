// Test double for the drawing surface: records every command together with
// the transform that was active when it was issued.

#![allow(dead_code)]

use glam::{Affine2, Vec2};
use visualizer_core::{ImageSource, Paint, PathCmd, Rect, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestImage(pub Vec2);

impl ImageSource for TestImage {
    fn size(&self) -> Vec2 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cmd {
    Clear(Vec2),
    Fill(String),
    Stroke(String),
    LineWidth(f32),
    RoundCaps,
    Shadow(String, f32),
    Alpha(f32),
    FillRect(Rect, Affine2),
    FillCircle(Vec2, f32),
    StrokePath(Vec<PathCmd>, Affine2),
    DrawImage { src: Rect, dst: Rect, transform: Affine2 },
}

#[derive(Default)]
pub struct RecordingSurface {
    pub cmds: Vec<Cmd>,
    pub transform: Affine2,
    stack: Vec<Affine2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            cmds: Vec::new(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn circles(&self) -> Vec<(Vec2, f32)> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::FillCircle(p, r) => Some((*p, *r)),
                _ => None,
            })
            .collect()
    }

    pub fn paths(&self) -> Vec<&Vec<PathCmd>> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::StrokePath(p, _) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(Rect, Rect, Affine2)> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::DrawImage { src, dst, transform } => Some((*src, *dst, *transform)),
                _ => None,
            })
            .collect()
    }

    pub fn position_of(&self, pred: impl Fn(&Cmd) -> bool) -> Option<usize> {
        self.cmds.iter().position(pred)
    }
}

fn describe(paint: Paint<'_>) -> String {
    match paint {
        Paint::Solid(c) => c.to_string(),
        Paint::Gradient(g) => format!("gradient({}->{})", g.start_color, g.end_color),
    }
}

impl Surface for RecordingSurface {
    type Image = TestImage;

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factor);
    }

    fn clear(&mut self, size: Vec2) {
        self.cmds.push(Cmd::Clear(size));
    }

    fn set_fill(&mut self, paint: Paint<'_>) {
        self.cmds.push(Cmd::Fill(describe(paint)));
    }

    fn set_stroke(&mut self, paint: Paint<'_>) {
        self.cmds.push(Cmd::Stroke(describe(paint)));
    }

    fn set_line_width(&mut self, width: f32) {
        self.cmds.push(Cmd::LineWidth(width));
    }

    fn set_round_caps(&mut self) {
        self.cmds.push(Cmd::RoundCaps);
    }

    fn set_shadow(&mut self, color: &str, blur: f32) {
        self.cmds.push(Cmd::Shadow(color.to_string(), blur));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.cmds.push(Cmd::Alpha(alpha));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.cmds.push(Cmd::FillRect(rect, self.transform));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.cmds.push(Cmd::FillCircle(center, radius));
    }

    fn stroke_path(&mut self, path: &[PathCmd]) {
        self.cmds.push(Cmd::StrokePath(path.to_vec(), self.transform));
    }

    fn draw_image(&mut self, _image: &TestImage, src: Rect, dst: Rect) {
        self.cmds.push(Cmd::DrawImage {
            src,
            dst,
            transform: self.transform,
        });
    }
}
