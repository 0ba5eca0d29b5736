//! Data-driven constants
//!
//! Every struct uses `#[serde(default)]`, so a page can override a single
//! field with a partial JSON document such as `{"runner": {"gravity": 1500}}`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rover runner balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub ground_y: f32,
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,
    pub base_speed: f32,
    pub rock_min_gap: f32,
    pub rock_var_gap: f32,
    pub rock_min_size: f32,
    pub rock_size_var: f32,
    pub spawn_lead: f32,
    pub despawn_margin: f32,
    pub max_frame_dt: f32,
    pub rover_x: f32,
    pub rover_width: f32,
    pub rover_height: f32,
    /// Canvas height / width
    pub aspect: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            ground_y: GROUND_Y,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            base_speed: BASE_SPEED,
            rock_min_gap: ROCK_MIN_GAP,
            rock_var_gap: ROCK_VAR_GAP,
            rock_min_size: ROCK_MIN_SIZE,
            rock_size_var: ROCK_SIZE_VAR,
            spawn_lead: SPAWN_LEAD,
            despawn_margin: DESPAWN_MARGIN,
            max_frame_dt: MAX_FRAME_DT,
            rover_x: ROVER_X,
            rover_width: ROVER_WIDTH,
            rover_height: ROVER_HEIGHT,
            aspect: RUNNER_ASPECT,
        }
    }
}

/// Star generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldTuning {
    pub pixels_per_star: f32,
    pub radius_min: f32,
    pub radius_var: f32,
    pub phase_min: f32,
    pub phase_var: f32,
    pub speed_min: f32,
    pub speed_var: f32,
    /// Phase advances by `speed / phase_divisor` each frame
    pub phase_divisor: f32,
}

impl Default for StarfieldTuning {
    fn default() -> Self {
        Self {
            pixels_per_star: PIXELS_PER_STAR,
            radius_min: 0.3,
            radius_var: 1.2,
            phase_min: 0.1,
            phase_var: 0.7,
            speed_min: 0.2,
            speed_var: 0.5,
            phase_divisor: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxTuning {
    pub default_depth: f32,
    pub x_travel: f32,
    pub y_travel: f32,
}

impl Default for ParallaxTuning {
    fn default() -> Self {
        Self {
            default_depth: PARALLAX_DEFAULT_DEPTH,
            x_travel: PARALLAX_X_TRAVEL,
            y_travel: PARALLAX_Y_TRAVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanTuning {
    pub tick_ms: u32,
    pub step_min: f32,
    pub step_var: f32,
}

impl Default for ScanTuning {
    fn default() -> Self {
        Self {
            tick_ms: SCAN_TICK_MS,
            step_min: SCAN_STEP_MIN,
            step_var: SCAN_STEP_VAR,
        }
    }
}

/// All page tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub starfield: StarfieldTuning,
    pub parallax: ParallaxTuning,
    pub scan: ScanTuning,
}

impl Tuning {
    /// Element id of the optional inline override block
    pub const ELEMENT_ID: &'static str = "rover-tuning";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override document, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning document: {}", e);
                Self::default()
            }
        }
    }

    /// Load overrides from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        match document
            .get_element_by_id(Self::ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.runner.gravity, GRAVITY);
        assert_eq!(tuning.runner.max_frame_dt, 0.05);
        assert_eq!(tuning.starfield.pixels_per_star, 9000.0);
        assert_eq!(tuning.scan.tick_ms, 120);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"runner": {"gravity": 1500.0}, "scan": {"tick_ms": 60}}"#)
            .unwrap();
        assert_eq!(tuning.runner.gravity, 1500.0);
        assert_eq!(tuning.runner.jump_velocity, JUMP_VELOCITY);
        assert_eq!(tuning.scan.tick_ms, 60);
        assert_eq!(tuning.scan.step_min, SCAN_STEP_MIN);
        assert_eq!(tuning.parallax, ParallaxTuning::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert!(Tuning::from_json("{runner:").is_err());
        assert_eq!(Tuning::from_json_or_default("not json"), Tuning::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut tuning = Tuning::default();
        tuning.runner.base_speed = 300.0;
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
