//! Rover 404 - a lost-on-Mars error page
//!
//! Core modules:
//! - `sim`: Rover runner simulation (physics, spawning, scoring, collisions)
//! - `starfield`: Twinkling star set and the reduced-motion gate
//! - `parallax`: Pointer-driven translation of decorative layers
//! - `scan`: Simulated route scanner state machine
//! - `preferences`: High-contrast / reduced-motion flags and their store
//! - `input`: Keyboard shortcut mapping
//! - `share`: Share texts and method selection
//! - `rng`: Injectable randomness
//! - `tuning`: Data-driven constants
//! - `platform`: Frame scheduling contract and browser bindings
//! - `renderer`: Canvas 2D drawing (wasm only)

pub mod input;
pub mod parallax;
pub mod platform;
pub mod preferences;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod rng;
pub mod scan;
pub mod share;
pub mod sim;
pub mod starfield;
pub mod tuning;

pub use preferences::{Preference, Preferences};
pub use rng::RandomSource;
pub use tuning::Tuning;

/// Default tuning constants
pub mod consts {
    /// Upper bound on a frame delta (tab-switch stalls)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Runner world (logical pixels, y grows downward)
    pub const GROUND_Y: f32 = 170.0;
    pub const GRAVITY: f32 = 1700.0;
    pub const JUMP_VELOCITY: f32 = -640.0;
    pub const BASE_SPEED: f32 = 220.0;

    /// Rock spawn countdown, in world distance units
    pub const ROCK_MIN_GAP: f32 = 120.0;
    pub const ROCK_VAR_GAP: f32 = 110.0;
    pub const ROCK_MIN_SIZE: f32 = 30.0;
    pub const ROCK_SIZE_VAR: f32 = 16.0;
    /// Rocks spawn this far past the right edge
    pub const SPAWN_LEAD: f32 = 60.0;
    /// Rocks are removed once their right edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 20.0;

    pub const ROVER_X: f32 = 90.0;
    pub const ROVER_WIDTH: f32 = 56.0;
    pub const ROVER_HEIGHT: f32 = 32.0;

    /// Runner canvas height / width
    pub const RUNNER_ASPECT: f32 = 220.0 / 900.0;
    /// Logical width used before the canvas is measured
    pub const RUNNER_DEFAULT_WIDTH: f32 = 900.0;

    /// One star per this many square CSS pixels
    pub const PIXELS_PER_STAR: f32 = 9000.0;

    pub const PARALLAX_DEFAULT_DEPTH: f32 = 0.05;
    pub const PARALLAX_X_TRAVEL: f32 = 40.0;
    pub const PARALLAX_Y_TRAVEL: f32 = 30.0;

    /// Scanner tick period
    pub const SCAN_TICK_MS: u32 = 120;
    pub const SCAN_STEP_MIN: f32 = 1.5;
    pub const SCAN_STEP_VAR: f32 = 6.0;
}
