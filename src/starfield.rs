//! Twinkling background stars
//!
//! The point set is regenerated on every resize, with density fixed per
//! pixel area. Each frame advances every star's phase; brightness follows
//! `(sin(phase) + 1) / 2`.

use glam::Vec2;

use crate::platform::{FrameDriven, FrameLoop, LoopControl};
use crate::rng::RandomSource;
use crate::tuning::StarfieldTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Phase angle (radians)
    pub phase: f32,
    /// Phase velocity (radians per frame, before the divisor)
    pub phase_speed: f32,
}

impl Star {
    /// Opacity in [0, 1]
    #[inline]
    pub fn brightness(&self) -> f32 {
        (self.phase.sin() + 1.0) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    size: Vec2,
    tuning: StarfieldTuning,
}

/// `round(area / pixels_per_star)`
pub fn star_count(width: f32, height: f32, pixels_per_star: f32) -> usize {
    if width <= 0.0 || height <= 0.0 || pixels_per_star <= 0.0 {
        return 0;
    }
    (width * height / pixels_per_star).round() as usize
}

impl Starfield {
    pub fn new(tuning: StarfieldTuning) -> Self {
        Self {
            stars: Vec::new(),
            size: Vec2::ZERO,
            tuning,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Replace the point set for a viewport of `width` x `height`
    pub fn regenerate(&mut self, width: f32, height: f32, rng: &mut impl RandomSource) {
        let t = &self.tuning;
        let count = star_count(width, height, t.pixels_per_star);
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.next_unit() * width, rng.next_unit() * height),
                radius: rng.spread(t.radius_min, t.radius_var),
                phase: rng.spread(t.phase_min, t.phase_var),
                phase_speed: rng.spread(t.speed_min, t.speed_var),
            })
            .collect();
    }

    /// Advance every star's phase by one frame
    pub fn advance(&mut self) {
        let divisor = self.tuning.phase_divisor.max(f32::EPSILON);
        for star in &mut self.stars {
            star.phase += star.phase_speed / divisor;
        }
    }
}

impl FrameDriven for Starfield {
    fn frame(&mut self, _dt: f32) -> LoopControl {
        self.advance();
        LoopControl::Continue
    }
}

/// Start or stop the animation for a reduced-motion setting.
///
/// Enabling reduced motion cancels the outstanding frame. Disabling it
/// regenerates the stars for the current size and resumes the loop.
/// Returns whether the loop is running afterwards.
pub fn apply_motion_preference(
    field: &mut Starfield,
    frames: &mut impl FrameLoop,
    reduced: bool,
    rng: &mut impl RandomSource,
) -> bool {
    if reduced {
        frames.halt();
    } else {
        let size = field.size();
        field.regenerate(size.x, size.y, rng);
        frames.resume();
    }
    frames.is_running()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualLoop;
    use crate::rng::{FixedSequence, seeded};

    fn field(w: f32, h: f32) -> Starfield {
        let mut f = Starfield::new(StarfieldTuning::default());
        f.regenerate(w, h, &mut seeded(1));
        f
    }

    #[test]
    fn test_count_proportional_to_area() {
        assert_eq!(star_count(900.0, 100.0, 9000.0), 10);
        assert_eq!(star_count(1920.0, 1080.0, 9000.0), 230);
        assert_eq!(star_count(0.0, 1080.0, 9000.0), 0);
        assert_eq!(field(1920.0, 1080.0).stars().len(), 230);
    }

    #[test]
    fn test_stars_within_bounds() {
        let f = field(800.0, 600.0);
        for s in f.stars() {
            assert!(s.pos.x >= 0.0 && s.pos.x < 800.0);
            assert!(s.pos.y >= 0.0 && s.pos.y < 600.0);
            assert!(s.radius >= 0.3 && s.radius < 1.5);
            assert!(s.phase_speed >= 0.2 && s.phase_speed < 0.7);
        }
    }

    #[test]
    fn test_advance_moves_phase() {
        let mut f = Starfield::new(StarfieldTuning::default());
        f.regenerate(300.0, 300.0, &mut FixedSequence::constant(0.5));
        let before = f.stars()[0].phase;
        let speed = f.stars()[0].phase_speed;
        f.advance();
        assert!((f.stars()[0].phase - (before + speed / 100.0)).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_range() {
        let mut star = Star {
            pos: Vec2::ZERO,
            radius: 1.0,
            phase: 0.0,
            phase_speed: 0.5,
        };
        assert!((star.brightness() - 0.5).abs() < 1e-6);
        for i in 0..100 {
            star.phase = i as f32 * 0.37;
            let b = star.brightness();
            assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_regenerate_replaces_set() {
        let mut f = field(600.0, 600.0);
        f.regenerate(300.0, 300.0, &mut seeded(2));
        assert_eq!(f.stars().len(), 10);
        assert_eq!(f.size(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_reduced_motion_stops_loop() {
        let mut f = field(600.0, 600.0);
        let mut frames = ManualLoop::new();
        frames.resume();
        assert!(!apply_motion_preference(&mut f, &mut frames, true, &mut seeded(3)));
        let phase = f.stars()[0].phase;
        assert!(!frames.pump(&mut f, 0.016));
        assert_eq!(f.stars()[0].phase, phase);
    }

    #[test]
    fn test_motion_restored_regenerates_and_resumes() {
        let mut rng = seeded(4);
        let mut f = field(600.0, 600.0);
        let mut frames = ManualLoop::new();
        frames.resume();

        apply_motion_preference(&mut f, &mut frames, true, &mut rng);
        let old = f.stars().to_vec();

        assert!(apply_motion_preference(&mut f, &mut frames, false, &mut rng));
        assert_eq!(f.stars().len(), old.len());
        assert_ne!(f.stars(), old.as_slice());
        assert!(frames.pump(&mut f, 0.016));
    }
}
