//! Runner session state and entities
//!
//! Everything that changes during a run lives in [`GameState`], so the
//! renderer is a pure function of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::RUNNER_DEFAULT_WIDTH;
use crate::rng::RandomSource;
use crate::tuning::RunnerTuning;

/// Parallax factor of the far and near dune layers
pub const DUNE_PARALLAX: [f32; 2] = [0.15, 0.3];
/// Extra drift of each dune layer relative to its parallax
pub const DUNE_DRIFT: [f32; 2] = [1.0, 1.25];

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, waiting for the first start
    NotStarted,
    Running,
    /// Terminal until an explicit restart
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned { rock_id: u32 },
    Despawned { rock_id: u32 },
    Scored { score: u32 },
    Crashed { score: u32 },
}

/// The player's rover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rover {
    /// `x` is the left edge, `y` the ground contact line (bottom edge)
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub on_ground: bool,
    /// Seconds of running, drives wheel wobble
    pub anim_t: f32,
}

impl Rover {
    pub fn new(tuning: &RunnerTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.rover_x, tuning.ground_y),
            vel_y: 0.0,
            size: Vec2::new(tuning.rover_width, tuning.rover_height),
            on_ground: true,
            anim_t: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y - self.size.y, self.size.x, self.size.y)
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel_y = velocity;
        self.on_ground = false;
        true
    }

    /// Integrate gravity and clamp to the ground line
    pub fn integrate(&mut self, gravity: f32, ground_y: f32, dt: f32) {
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;
        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.vel_y = 0.0;
            self.on_ground = true;
        }
    }
}

/// The single obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Already counted toward the score
    pub passed: bool,
    /// Cosmetic tilt (radians)
    pub tilt: f32,
}

impl Rock {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Complete runner session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// World scroll speed (px/s)
    pub speed: f32,
    pub rover: Rover,
    /// At most one obstacle exists at a time
    pub rock: Option<Rock>,
    /// Distance left before the next spawn (only counts down with no rock)
    pub spawn_countdown: f32,
    /// Logical canvas width; rocks spawn past it
    pub view_width: f32,
    /// Scroll offsets of the far and near dune layers
    pub dune_offsets: [f32; 2],
    pub tuning: RunnerTuning,
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: RunnerTuning) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            speed: tuning.base_speed,
            rover: Rover::new(&tuning),
            rock: None,
            spawn_countdown: tuning.rock_min_gap,
            view_width: RUNNER_DEFAULT_WIDTH,
            dune_offsets: [0.0; 2],
            tuning,
            next_id: 1,
        }
    }

    pub fn set_view_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.view_width = width;
        }
    }

    /// Logical width to lay out at. A collapsed container (zero width)
    /// keeps the current width.
    pub fn fit_width(&self, measured: f32) -> f32 {
        if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            self.view_width
        }
    }

    /// X coordinate where new rocks appear
    pub fn spawn_x(&self) -> f32 {
        self.view_width + self.tuning.spawn_lead
    }

    /// Reset the run and spawn the first rock. Also used for the first start.
    pub fn restart(&mut self, rng: &mut impl RandomSource) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.rover = Rover::new(&self.tuning);
        self.rock = None;
        self.dune_offsets = [0.0; 2];
        self.spawn_rock(rng);
        self.reroll_countdown(rng);
        log::info!("Runner started");
    }

    /// Spawn a rock unless one already exists
    pub fn spawn_rock(&mut self, rng: &mut impl RandomSource) -> Option<u32> {
        if self.rock.is_some() {
            return None;
        }
        let t = &self.tuning;
        let side = rng.spread(t.rock_min_size, t.rock_size_var);
        let width = side * rng.spread(0.95, 0.15);
        let tilt = rng.next_unit() * std::f32::consts::PI * 0.08;
        let pos = Vec2::new(self.spawn_x(), t.ground_y - side);
        let id = self.next_id;
        self.next_id += 1;
        self.rock = Some(Rock {
            id,
            pos,
            size: Vec2::new(width, side),
            passed: false,
            tilt,
        });
        Some(id)
    }

    pub fn reroll_countdown(&mut self, rng: &mut impl RandomSource) {
        self.spawn_countdown = rng.spread(self.tuning.rock_min_gap, self.tuning.rock_var_gap);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
