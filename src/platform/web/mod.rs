//! Browser bindings
//!
//! Thin helpers over `web-sys`. Lookups return `Option` so a missing anchor
//! simply disables the feature that needs it.

pub mod animation;
pub mod share;
pub mod storage;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub use animation::AnimationLoop;
pub use storage::LocalStore;

pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Element by id, cast to a concrete element type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First element matching a selector
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document.query_selector(selector).ok()??.dyn_into::<T>().ok()
}

/// Every element matching a selector that casts to `T`
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Attach an event listener for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("Failed to attach {} listener: {:?}", event, e);
    }
    closure.forget();
}

/// Run `f` once after `ms` milliseconds
pub fn set_timeout<F>(ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    let Some(window) = window() else {
        return;
    };
    let closure = Closure::once(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        super::timer_delay(ms),
    ) {
        log::warn!("setTimeout failed: {:?}", e);
    }
    closure.forget();
}

/// Viewport size in CSS pixels
pub fn viewport_size(window: &Window) -> Vec2 {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Vec2::new(read(window.inner_width()), read(window.inner_height()))
}

pub fn device_pixel_ratio(window: &Window) -> f64 {
    let dpr = window.device_pixel_ratio();
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// `(prefers-reduced-motion: reduce)` media query
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}

/// Add or remove a marker class
pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(e) = el.class_list().toggle_with_force(class, on) {
        log::warn!("Failed to set class {}: {:?}", class, e);
    }
}

pub fn set_pressed(el: &Element, pressed: bool) {
    let _ = el.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_hidden(el: &HtmlElement, hidden: bool) {
    el.set_hidden(hidden);
}

/// Same-origin navigation
pub fn navigate(path: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.location().assign(path) {
            log::warn!("Navigation to {} failed: {:?}", path, e);
        }
    }
}
