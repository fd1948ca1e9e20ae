//! Motion law for floating nodes.
//!
//! Every function here is pure: the visual state of a node is computed from
//! its progress, its drift and the current viewport height, nothing else.

use driftnodes_core::{NodeShape, OFFSCREEN_MARGIN_PX};

/// Progress below which a node fades in.
const FADE_IN_END: f32 = 0.1;
/// Progress above which a node fades out.
const FADE_OUT_START: f32 = 0.9;
/// Opacity held between the fades.
const PLATEAU_OPACITY: f32 = 0.8;

/// Visual state of a node at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    /// Horizontal offset from the spawn position.
    pub offset_x_px: f32,
    /// Vertical offset from the spawn position; negative is up.
    pub offset_y_px: f32,
    pub opacity: f32,
    /// Body rotation, clockwise.
    pub rotation_deg: f32,
}

/// Normalized animation progress: 0 at spawn, 1 at expiry.
pub fn progress(elapsed_ms: u64, duration_ms: f32) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    elapsed_ms as f32 / duration_ms
}

/// Vertical travel from just below the bottom edge to just above the top.
pub fn offset_y(progress: f32, viewport_height_px: f32) -> f32 {
    -OFFSCREEN_MARGIN_PX - (viewport_height_px + 2.0 * OFFSCREEN_MARGIN_PX) * progress
}

/// Drifts out and back, netting zero displacement at expiry.
pub fn offset_x(progress: f32, drift_px: f32) -> f32 {
    drift_px * (progress * std::f32::consts::PI).sin()
}

/// Fade-in, plateau, fade-out envelope.
pub fn opacity(progress: f32) -> f32 {
    if progress < 0.0 {
        0.0
    } else if progress < FADE_IN_END {
        progress / FADE_IN_END
    } else if progress <= FADE_OUT_START {
        PLATEAU_OPACITY
    } else if progress <= 1.0 {
        PLATEAU_OPACITY * (1.0 - progress) / (1.0 - FADE_OUT_START)
    } else {
        0.0
    }
}

/// Evaluate the full motion law.
pub fn sample(
    progress: f32,
    drift_px: f32,
    viewport_height_px: f32,
    shape: NodeShape,
) -> MotionFrame {
    MotionFrame {
        offset_x_px: offset_x(progress, drift_px),
        offset_y_px: offset_y(progress, viewport_height_px),
        opacity: opacity(progress),
        rotation_deg: shape.body_rotation_deg(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_start_of_animation() {
        let frame = sample(0.0, 37.0, 800.0, NodeShape::Circle);
        assert!(approx(frame.offset_y_px, -30.0));
        assert!(approx(frame.offset_x_px, 0.0));
        assert!(approx(frame.opacity, 0.0));
        assert_eq!(frame.rotation_deg, 0.0);
    }

    #[test]
    fn test_midpoint() {
        let height = 800.0;
        let drift = -42.5;
        let frame = sample(0.5, drift, height, NodeShape::Square);
        assert!(approx(frame.offset_y_px, -30.0 - 0.5 * (height + 60.0)));
        assert!(approx(frame.offset_x_px, drift));
        assert!(approx(frame.opacity, 0.8));
    }

    #[test]
    fn test_end_of_animation() {
        let height = 600.0;
        let frame = sample(1.0, 20.0, height, NodeShape::Circle);
        assert!(approx(frame.offset_y_px, -30.0 - (height + 60.0)));
        assert!(frame.offset_x_px.abs() < 1e-3);
        assert!(approx(frame.opacity, 0.0));
    }

    #[test]
    fn test_diamond_rotation_is_constant() {
        for p in [0.0, 0.25, 0.5, 0.99] {
            assert_eq!(sample(p, 10.0, 500.0, NodeShape::Diamond).rotation_deg, 45.0);
        }
    }

    #[test]
    fn test_opacity_envelope() {
        assert!(approx(opacity(0.05), 0.5));
        assert!(approx(opacity(0.1), 0.8));
        assert!(approx(opacity(0.9), 0.8));
        assert!(approx(opacity(0.95), 0.4));
        assert_eq!(opacity(1.5), 0.0);
        assert_eq!(opacity(-0.1), 0.0);
    }

    #[test]
    fn test_progress() {
        assert!(approx(progress(10_000, 20_000.0), 0.5));
        assert!(approx(progress(35_000, 35_000.0), 1.0));
        assert_eq!(progress(5, 0.0), 1.0);
    }

    #[test]
    fn test_motion_is_reproducible() {
        let a = sample(0.37, 12.0, 720.0, NodeShape::Diamond);
        let b = sample(0.37, 12.0, 720.0, NodeShape::Diamond);
        assert_eq!(a, b);
    }
}
