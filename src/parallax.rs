//! Pointer parallax for decorative layers

use glam::Vec2;

use crate::tuning::ParallaxTuning;

/// Pointer offset from the viewport center, each axis in [-0.5, 0.5]
pub fn pointer_offset(pointer: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    (pointer / viewport - Vec2::splat(0.5)).clamp(Vec2::splat(-0.5), Vec2::splat(0.5))
}

/// Translation for a layer at `depth`; layers recede from the pointer
pub fn layer_translation(offset: Vec2, depth: f32, tuning: &ParallaxTuning) -> Vec2 {
    Vec2::new(
        -offset.x * tuning.x_travel * depth,
        -offset.y * tuning.y_travel * depth,
    )
}

/// Parse a `data-depth` attribute
pub fn parse_depth(attr: Option<&str>, default: f32) -> f32 {
    attr.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|d| d.is_finite())
        .unwrap_or(default)
}

pub fn transform_css(t: Vec2) -> String {
    format!("translate3d({}px, {}px, 0)", t.x, t.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero() {
        let off = pointer_offset(Vec2::new(500.0, 300.0), Vec2::new(1000.0, 600.0));
        assert_eq!(off, Vec2::ZERO);
    }

    #[test]
    fn test_corners() {
        let vp = Vec2::new(1000.0, 600.0);
        assert_eq!(pointer_offset(Vec2::ZERO, vp), Vec2::splat(-0.5));
        assert_eq!(pointer_offset(vp, vp), Vec2::splat(0.5));
        assert_eq!(pointer_offset(Vec2::new(5000.0, -10.0), vp), Vec2::new(0.5, -0.5));
        assert_eq!(pointer_offset(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_translation_inverted_and_scaled() {
        let tuning = ParallaxTuning::default();
        let t = layer_translation(Vec2::new(0.5, 0.5), 0.05, &tuning);
        assert!((t.x - -1.0).abs() < 1e-6);
        assert!((t.y - -0.75).abs() < 1e-6);

        let deep = layer_translation(Vec2::new(-0.5, 0.0), 0.2, &tuning);
        assert!((deep.x - 4.0).abs() < 1e-6);
        assert_eq!(deep.y, 0.0);
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth(Some("0.2"), 0.05), 0.2);
        assert_eq!(parse_depth(Some(" 0.1 "), 0.05), 0.1);
        assert_eq!(parse_depth(Some("deep"), 0.05), 0.05);
        assert_eq!(parse_depth(Some("NaN"), 0.05), 0.05);
        assert_eq!(parse_depth(None, 0.05), 0.05);
    }

    #[test]
    fn test_transform_css() {
        assert_eq!(transform_css(Vec2::new(-1.0, 0.5)), "translate3d(-1px, 0.5px, 0)");
    }
}
