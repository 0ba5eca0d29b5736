//! Axis-aligned bounding boxes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Box with its top-left corner at `min` (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only touch along an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlap(self, other)
    }
}

/// Standard AABB overlap predicate
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_pairs() {
        let rover = Aabb::new(90.0, 138.0, 56.0, 32.0);
        // Rock sitting under the rover's front wheels
        assert!(overlap(&rover, &Aabb::new(130.0, 140.0, 30.0, 30.0)));
        // Fully contained
        assert!(overlap(&rover, &Aabb::new(100.0, 150.0, 5.0, 5.0)));
        // Containing
        assert!(overlap(&Aabb::new(100.0, 150.0, 5.0, 5.0), &rover));
        // Identical
        assert!(rover.overlaps(&rover));
    }

    #[test]
    fn test_separated_pairs() {
        let rover = Aabb::new(90.0, 138.0, 56.0, 32.0);
        // Rock to the right
        assert!(!overlap(&rover, &Aabb::new(200.0, 140.0, 30.0, 30.0)));
        // Rover high above the rock
        assert!(!overlap(&Aabb::new(90.0, 40.0, 56.0, 32.0), &Aabb::new(100.0, 140.0, 30.0, 30.0)));
        // Rock already behind
        assert!(!overlap(&rover, &Aabb::new(40.0, 140.0, 30.0, 30.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlap(&a, &Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlap(&a, &Aabb::new(0.0, 10.0, 10.0, 10.0)));
        assert!(overlap(&a, &Aabb::new(9.99, 9.99, 10.0, 10.0)));
    }

    #[test]
    fn test_symmetric() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(overlap(&a, &b), overlap(&b, &a));
        assert_eq!(a.max(), Vec2::new(10.0, 10.0));
    }
}
