//! Path helpers for 2D primitives

use std::f64::consts::TAU;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

/// Rounded rectangle path (not filled)
pub fn round_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    Ok(())
}

pub fn fill_round_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    round_rect(ctx, x, y, w, h, r)?;
    ctx.fill();
    Ok(())
}

pub fn fill_circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

/// Soft elliptical ground shadow
pub fn shadow(
    ctx: &CanvasRenderingContext2d,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    alpha: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_fill_style_str("#000");
    ctx.begin_path();
    ctx.ellipse(cx, cy, rx.max(0.0), ry.max(0.0), 0.0, 0.0, TAU)?;
    ctx.fill();
    ctx.restore();
    Ok(())
}

/// Vertical linear gradient from `y0` to `y1`
pub fn vertical_gradient(
    ctx: &CanvasRenderingContext2d,
    y0: f64,
    y1: f64,
    stops: &[(f32, &str)],
) -> Result<CanvasGradient, JsValue> {
    let gradient = ctx.create_linear_gradient(0.0, y0, 0.0, y1);
    for (offset, color) in stops {
        gradient.add_color_stop(*offset, color)?;
    }
    Ok(gradient)
}
