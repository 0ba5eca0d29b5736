//! Canvas 2D rendering
//!
//! Drawing is a pure function of simulation state. All coordinates are in
//! CSS pixels; [`fit_canvas`] installs the device-pixel-ratio transform.

pub mod runner;
pub mod shapes;
pub mod stars;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// 2D context of a canvas, `None` if unavailable
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Size the backing store for `css_w` x `css_h` at `dpr` and scale drawing
/// back to CSS pixels
pub fn fit_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    css_w: f32,
    css_h: f32,
    dpr: f64,
) -> Result<(), JsValue> {
    canvas.set_width((css_w as f64 * dpr).round().max(1.0) as u32);
    canvas.set_height((css_h as f64 * dpr).round().max(1.0) as u32);
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
}
