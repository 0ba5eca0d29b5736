//! Per-frame runner update
//!
//! Order within a tick: jump, physics, rock movement, spawning, cleanup,
//! scoring, collision.

use super::state::{DUNE_DRIFT, DUNE_PARALLAX, GameEvent, GamePhase, GameState};
use crate::rng::RandomSource;

/// Input commands for a single tick (one-shot)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap)
    pub jump: bool,
}

/// Clamp a frame delta into `[0, max_dt]`. Non-finite deltas become 0, as
/// does a negative or non-finite `max_dt`.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    let max_dt = if max_dt.is_finite() { max_dt.max(0.0) } else { 0.0 };
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Advance the runner. Does nothing unless the run is in progress.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    let dt = clamp_dt(dt, state.tuning.max_frame_dt);
    let t = state.tuning.clone();

    // Rover physics
    if input.jump {
        state.rover.jump(t.jump_velocity);
    }
    state.rover.integrate(t.gravity, t.ground_y, dt);
    state.rover.anim_t += dt;

    // Background scroll
    let wrap = (state.view_width * 2.0).max(1.0);
    for (i, offset) in state.dune_offsets.iter_mut().enumerate() {
        *offset = (*offset + state.speed * DUNE_PARALLAX[i] * DUNE_DRIFT[i] * dt) % wrap;
    }

    // Move the rock
    let travel = state.speed * dt;
    if let Some(rock) = state.rock.as_mut() {
        rock.pos.x -= travel;
    }

    // Spawning
    if state.rock.is_none() {
        state.spawn_countdown -= travel;
        if state.spawn_countdown <= 0.0 {
            if let Some(rock_id) = state.spawn_rock(rng) {
                events.push(GameEvent::Spawned { rock_id });
            }
            state.reroll_countdown(rng);
        }
    }

    // Cleanup once fully off-screen to the left
    let off_screen = state
        .rock
        .as_ref()
        .is_some_and(|rock| rock.right_edge() < -t.despawn_margin);
    if off_screen {
        if let Some(rock) = state.rock.take() {
            events.push(GameEvent::Despawned { rock_id: rock.id });
        }
        state.reroll_countdown(rng);
    }

    // Scoring
    let rover_left = state.rover.pos.x;
    if let Some(rock) = state.rock.as_mut() {
        if !rock.passed && rock.right_edge() < rover_left {
            rock.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
            log::debug!("Passed rock {} (score {})", rock.id, state.score);
        }
    }

    // Collision
    let rover_box = state.rover.bounds();
    if state
        .rock
        .as_ref()
        .is_some_and(|rock| rover_box.overlaps(&rock.bounds()))
    {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed { score: state.score });
        log::info!("Game over (score {})", state.score);
    }

    events
}
