//! requestAnimationFrame driver

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::platform::{FrameDriven, FrameLoop, LoopControl};

/// Drives a shared target once per animation frame.
///
/// Clones share the same target and frame handle. The outstanding
/// callback id is kept so [`FrameLoop::halt`] can cancel it.
pub struct AnimationLoop<T> {
    target: Rc<RefCell<T>>,
    handle: Rc<Cell<Option<i32>>>,
    last_time: Rc<Cell<Option<f64>>>,
}

impl<T> Clone for AnimationLoop<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            handle: self.handle.clone(),
            last_time: self.last_time.clone(),
        }
    }
}

impl<T: FrameDriven + 'static> AnimationLoop<T> {
    pub fn new(target: T) -> Self {
        Self {
            target: Rc::new(RefCell::new(target)),
            handle: Rc::new(Cell::new(None)),
            last_time: Rc::new(Cell::new(None)),
        }
    }

    pub fn target(&self) -> &Rc<RefCell<T>> {
        &self.target
    }

    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let this = self.clone();
        let closure = Closure::once(move |time: f64| {
            this.handle.set(None);
            let dt = this
                .last_time
                .get()
                .map(|last| ((time - last) / 1000.0) as f32)
                .unwrap_or(0.0);
            this.last_time.set(Some(time));

            // Held only for this frame
            let control = match this.target.try_borrow_mut() {
                Ok(mut target) => target.frame(dt),
                Err(_) => {
                    log::debug!("Frame skipped, target already borrowed");
                    LoopControl::Continue
                }
            };
            if control == LoopControl::Continue && this.handle.get().is_none() {
                this.schedule();
            }
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => self.handle.set(Some(id)),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }
}

impl<T: FrameDriven + 'static> FrameLoop for AnimationLoop<T> {
    fn resume(&mut self) {
        if self.handle.get().is_some() {
            return;
        }
        self.last_time.set(None);
        self.schedule();
    }

    fn halt(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }
}
