// 2D canvas implementation of the particle surface.

use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::js_error;
use crate::color::Color;
use crate::renderer::{backing_size, Surface};

pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas cannot hand out a 2D context.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<CanvasSurface> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface { context })
    }

    /// Draw in CSS pixels on a backing buffer `ratio` times larger. Resizing
    /// the canvas resets the transform, so call this after every fit.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        if let Err(e) = self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
            js_error("setTransform failed", &e);
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        if let Err(e) = self
            .context
            .arc(center[0], center[1], radius, 0.0, 2.0 * std::f64::consts::PI)
        {
            js_error("arc failed", &e);
            return;
        }
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.fill();
    }

    #[allow(deprecated)]
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    ) {
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

/// Sizes the canvas backing buffer to its container at `pixel_ratio` device
/// pixels per CSS pixel and returns the container size in CSS pixels.
pub fn fit_canvas(canvas: &HtmlCanvasElement, pixel_ratio: f64) -> (f64, f64) {
    let (css_width, css_height) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => (canvas.client_width(), canvas.client_height()),
    };
    let css = (css_width.max(0) as f64, css_height.max(0) as f64);
    let (width, height) = backing_size(css.0, css.1, pixel_ratio);
    canvas.set_width(width);
    canvas.set_height(height);
    css
}
