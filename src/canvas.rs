//! `Surface` over a `CanvasRenderingContext2d`.
//!
//! Canvas calls that can throw (arcs with a negative radius, images in a
//! broken state) are ignored so a bad value costs one shape, not the frame.

use anyhow::anyhow;
use glam::Vec2;
use std::f64::consts::TAU;
use visualizer_core::{ImageSource, LinearGradient, Paint, PathCmd, Rect, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// A fully decoded `<img>`.
#[derive(Clone, Debug)]
pub struct WebImage(pub web::HtmlImageElement);

impl ImageSource for WebImage {
    fn size(&self) -> Vec2 {
        Vec2::new(self.0.natural_width() as f32, self.0.natural_height() as f32)
    }
}

pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { ctx })
    }

    fn paint_value(&self, paint: Paint<'_>) -> JsValue {
        match paint {
            Paint::Solid(color) => JsValue::from_str(color),
            Paint::Gradient(g) => self.gradient(&g).into(),
        }
    }

    fn gradient(&self, g: &LinearGradient<'_>) -> web::CanvasGradient {
        let grad = self.ctx.create_linear_gradient(
            g.from.x as f64,
            g.from.y as f64,
            g.to.x as f64,
            g.to.y as f64,
        );
        _ = grad.add_color_stop(0.0, g.start_color);
        _ = grad.add_color_stop(1.0, g.end_color);
        grad
    }
}

impl Surface for CanvasSurface {
    type Image = WebImage;

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn scale(&mut self, factor: Vec2) {
        _ = self.ctx.scale(factor.x as f64, factor.y as f64);
    }

    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    #[allow(deprecated)]
    fn set_fill(&mut self, paint: Paint<'_>) {
        let value = self.paint_value(paint);
        self.ctx.set_fill_style(&value);
    }

    #[allow(deprecated)]
    fn set_stroke(&mut self, paint: Paint<'_>) {
        let value = self.paint_value(paint);
        self.ctx.set_stroke_style(&value);
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn set_round_caps(&mut self) {
        self.ctx.set_line_cap("round");
    }

    fn set_shadow(&mut self, color: &str, blur: f32) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &[PathCmd]) {
        self.ctx.begin_path();
        for cmd in path {
            match *cmd {
                PathCmd::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathCmd::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathCmd::QuadTo { ctrl, to } => self.ctx.quadratic_curve_to(
                    ctrl.x as f64,
                    ctrl.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathCmd::Close => self.ctx.close_path(),
            }
        }
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: &WebImage, src: Rect, dst: Rect) {
        _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &image.0,
                src.x as f64,
                src.y as f64,
                src.w as f64,
                src.h as f64,
                dst.x as f64,
                dst.y as f64,
                dst.w as f64,
                dst.h as f64,
            );
    }
}
