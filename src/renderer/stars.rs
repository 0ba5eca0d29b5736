//! Starfield drawing

use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::shapes::fill_circle;
use crate::starfield::Starfield;

pub fn draw(ctx: &CanvasRenderingContext2d, field: &Starfield) -> Result<(), JsValue> {
    let size = field.size();
    ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    ctx.set_fill_style_str("#ffffff");
    for star in field.stars() {
        ctx.set_global_alpha(star.brightness() as f64);
        fill_circle(ctx, star.pos.x as f64, star.pos.y as f64, star.radius as f64)?;
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}
