//! Rover runner scene
//!
//! Draw order: sky, dunes, ground, perspective grid, rock, rover, then the
//! game-over overlay when the run has ended.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::shapes::{fill_round_rect, shadow, vertical_gradient};
use crate::sim::{DUNE_PARALLAX, GameState, Rock, Rover};

const HORIZON_Y: f64 = 80.0;
const PERSPECTIVE: f64 = 0.0028;

/// (base y below horizon, color, alpha) for the far and near dune layers
const DUNES: [(f64, &str, f64); 2] = [(10.0, "#1a223a", 0.35), (24.0, "#242d49", 0.22)];

pub const GAME_OVER_TITLE: &str = "Game Over!";
pub const GAME_OVER_HINT: &str = "Press R or the button to restart";

/// Scale factor for objects standing at screen height `y`
fn perspective_scale(y: f64) -> f64 {
    let d = (y - HORIZON_Y).max(0.0);
    1.0 / (1.0 + d * PERSPECTIVE)
}

/// Draw one frame. `view` is the logical canvas size.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    view: Vec2,
    lights_on: bool,
) -> Result<(), JsValue> {
    let (w, h) = (view.x as f64, view.y as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    draw_ground(ctx, state, w, h)?;
    if let Some(rock) = &state.rock {
        draw_rock(ctx, rock)?;
    }
    draw_rover(ctx, &state.rover, lights_on)?;
    if state.is_over() {
        draw_game_over(ctx, w, h)?;
    }
    Ok(())
}

fn draw_ground(ctx: &CanvasRenderingContext2d, state: &GameState, w: f64, h: f64) -> Result<(), JsValue> {
    let sky = vertical_gradient(ctx, 0.0, h, &[(0.0, "#0b1020"), (1.0, "#0a0f1c")])?;
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    for (i, (base, color, alpha)) in DUNES.iter().enumerate() {
        draw_dunes(
            ctx,
            w,
            HORIZON_Y + base,
            DUNE_PARALLAX[i] as f64,
            state.dune_offsets[i] as f64,
            color,
            *alpha,
        )?;
    }

    let ground = vertical_gradient(ctx, HORIZON_Y, h, &[(0.0, "#3c2a2a"), (1.0, "#7b3626")])?;
    ctx.set_fill_style_canvas_gradient(&ground);
    ctx.fill_rect(0.0, HORIZON_Y, w, h - HORIZON_Y);

    // Perspective grid
    ctx.save();
    ctx.set_stroke_style_str("rgba(255,255,255,.06)");
    ctx.set_line_width(1.0);
    let (mut y, mut gap) = (HORIZON_Y + 6.0, 6.0);
    while y < h {
        ctx.set_global_alpha(((y - HORIZON_Y) / 180.0).min(1.0));
        ctx.begin_path();
        ctx.move_to(0.0, y + 0.5);
        ctx.line_to(w, y + 0.5);
        ctx.stroke();
        y += gap;
        gap *= 1.12;
    }
    ctx.set_global_alpha(0.12);
    let vanishing_x = w * 0.5;
    for i in -6..=6 {
        let i = i as f64;
        ctx.begin_path();
        ctx.move_to(vanishing_x + i * 90.0, HORIZON_Y);
        ctx.line_to(vanishing_x + i * 2000.0, h);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

fn draw_dunes(
    ctx: &CanvasRenderingContext2d,
    w: f64,
    base_y: f64,
    parallax: f64,
    offset: f64,
    color: &str,
    alpha: f64,
) -> Result<(), JsValue> {
    let amplitude = 18.0 + 22.0 * parallax;
    let wavelength = 260.0 + 140.0 * parallax;

    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.move_to(0.0, base_y);
    let mut x = -w;
    while x <= w * 2.0 {
        ctx.line_to(x, base_y + ((x + offset) / wavelength).sin() * amplitude);
        x += 4.0;
    }
    ctx.line_to(w * 2.0, 0.0);
    ctx.line_to(0.0, 0.0);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
    Ok(())
}

fn draw_rock(ctx: &CanvasRenderingContext2d, rock: &Rock) -> Result<(), JsValue> {
    let (rw, rh) = (rock.size.x as f64, rock.size.y as f64);
    let s = perspective_scale(rock.pos.y as f64 + rh);
    let w = rw * (0.9 + 0.1 * s);
    let x = rock.pos.x as f64;
    let y = (rock.pos.y as f64).round();

    shadow(ctx, x + w * 0.5 + 8.0, y + rh + 10.0, w * 0.45, 6.0, 0.28)?;

    ctx.save();
    // Tilt about the base so the rock stays planted
    ctx.translate(x + w * 0.4, y + rh)?;
    ctx.rotate(rock.tilt as f64 * 0.5)?;
    ctx.translate(-w * 0.4, -rh)?;

    ctx.set_fill_style_str("#7b3626");
    fill_round_rect(ctx, w * 0.15, 0.0, w * 0.85, rh, 6.0)?;
    ctx.set_fill_style_str("#a94933");
    fill_round_rect(ctx, 0.0, 0.0, w * 0.8, rh, 6.0)?;

    ctx.set_fill_style_str("#c55b44");
    ctx.begin_path();
    ctx.move_to(8.0, 0.0);
    ctx.line_to(w * 0.8 - 8.0, 0.0);
    ctx.line_to(w * 0.8 - 16.0, 10.0);
    ctx.line_to(16.0, 10.0);
    ctx.close_path();
    ctx.fill();

    ctx.set_global_alpha(0.2);
    ctx.set_fill_style_str("#ffd1a6");
    fill_round_rect(ctx, 6.0, 6.0, w * 0.5, rh * 0.45, 6.0)?;
    ctx.restore();
    Ok(())
}

fn draw_wheel(ctx: &CanvasRenderingContext2d, x: f64, y: f64, spin: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(x, y)?;
    let tire = ctx.create_radial_gradient(0.0, 0.0, 2.0, 0.0, 0.0, 10.0)?;
    tire.add_color_stop(0.0, "#2a324a")?;
    tire.add_color_stop(1.0, "#121728")?;
    ctx.set_fill_style_canvas_gradient(&tire);
    ctx.begin_path();
    ctx.arc(0.0, 0.0, 10.0, 0.0, TAU)?;
    ctx.fill();
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#0c1122");
    ctx.stroke();

    ctx.rotate(spin)?;
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str("#3a4460");
    ctx.begin_path();
    ctx.move_to(-10.0, 0.0);
    ctx.line_to(10.0, 0.0);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_rover(ctx: &CanvasRenderingContext2d, rover: &Rover, lights_on: bool) -> Result<(), JsValue> {
    let (x, y) = (rover.pos.x as f64, rover.pos.y as f64);
    let (w, h) = (rover.size.x as f64, rover.size.y as f64);
    let wobble = (rover.anim_t as f64 * 14.0).sin() * if rover.on_ground { 1.0 } else { 0.3 };

    shadow(ctx, x + w * 0.5 + 10.0, y + 10.0, w * 0.6, 7.0, 0.33)?;

    ctx.save();
    ctx.translate(x, y - h)?;

    // Body
    let body = vertical_gradient(ctx, 0.0, h, &[(0.0, "#f3f5fb"), (1.0, "#d0d6e6")])?;
    ctx.set_fill_style_canvas_gradient(&body);
    fill_round_rect(ctx, 0.0, 0.0, w, h, 10.0)?;
    ctx.set_global_alpha(0.18);
    ctx.set_fill_style_str("#ffffff");
    fill_round_rect(ctx, 4.0, 4.0, w - 8.0, 10.0, 8.0)?;
    ctx.set_global_alpha(1.0);

    // Mast and camera head
    let mast = vertical_gradient(ctx, -26.0, 26.0, &[(0.0, "#eef1f8"), (1.0, "#c9d0e3")])?;
    ctx.set_fill_style_canvas_gradient(&mast);
    ctx.fill_rect(8.0, -26.0, 8.0, 26.0);
    let camera = vertical_gradient(ctx, -38.0, -24.0, &[(0.0, "#ffffff"), (1.0, "#dfe5f4")])?;
    ctx.set_fill_style_canvas_gradient(&camera);
    fill_round_rect(ctx, -6.0, -38.0, 30.0, 14.0, 6.0)?;

    // Wheels
    ctx.save();
    ctx.translate(0.0, h - 6.0)?;
    for i in 0..3 {
        let i = i as f64;
        draw_wheel(ctx, 8.0 + i * 22.0, 0.0, wobble + i * 0.4)?;
    }
    ctx.restore();

    if lights_on {
        ctx.set_fill_style_str("rgba(255,255,200,.22)");
        ctx.begin_path();
        ctx.move_to(w - 4.0, 10.0);
        ctx.line_to(w + 110.0, -10.0);
        ctx.line_to(w + 110.0, 26.0);
        ctx.close_path();
        ctx.fill();
    }
    ctx.restore();
    Ok(())
}

fn draw_game_over(ctx: &CanvasRenderingContext2d, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("rgba(0,0,0,.45)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_font("700 28px Outfit, system-ui");
    ctx.fill_text(GAME_OVER_TITLE, w / 2.0, 80.0)?;
    ctx.set_font("400 16px Outfit, system-ui");
    ctx.fill_text(GAME_OVER_HINT, w / 2.0, 110.0)?;
    ctx.restore();
    Ok(())
}
