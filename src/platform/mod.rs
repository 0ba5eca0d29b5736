//! Platform abstraction layer
//!
//! Animated components implement [`FrameDriven`] and are advanced by an
//! external driver:
//! - `web::AnimationLoop` on wasm (requestAnimationFrame)
//! - [`ManualLoop`] natively (tests, headless runs)
//!
//! Both implement [`FrameLoop`], so start/stop decisions can be made without
//! knowing which driver is in use.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Whether a driven target wants another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Something advanced once per animation frame
pub trait FrameDriven {
    /// Advance by `dt` seconds since the previous frame (0 on the first frame)
    fn frame(&mut self, dt: f32) -> LoopControl;
}

/// Scheduling handle for a frame loop
pub trait FrameLoop {
    /// Schedule frames if not already scheduled
    fn resume(&mut self);
    /// Forget the outstanding frame, if any
    fn halt(&mut self);
    fn is_running(&self) -> bool;
}

/// Timer delay as the browser's signed millisecond argument, saturating
pub fn timer_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Frame loop pumped by hand
#[derive(Debug, Clone, Default)]
pub struct ManualLoop {
    running: bool,
    frames: u64,
}

impl ManualLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames delivered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Deliver one frame if running. Returns whether a frame was delivered.
    pub fn pump<T: FrameDriven + ?Sized>(&mut self, target: &mut T, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        if target.frame(dt) == LoopControl::Stop {
            self.running = false;
        }
        true
    }
}

impl FrameLoop for ManualLoop {
    fn resume(&mut self) {
        self.running = true;
    }

    fn halt(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
