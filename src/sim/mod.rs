//! Rover runner simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame delta supplied by the caller (clamped)
//! - Randomness only through an injected `RandomSource`
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlap};
pub use state::{DUNE_PARALLAX, GameEvent, GamePhase, GameState, Rock, Rover};
pub use tick::{TickInput, clamp_dt, tick};
