//! Core types shared by the driftnodes crates.
//!
//! Everything here is immutable data: node shapes and colors, the fixed set
//! of node templates, the color palette and the timing constants that drive
//! the floating background.

mod palette;
mod templates;

use std::ops::Range;

pub use palette::{ColorStyle, Rgb, Rgba};
pub use templates::{NODE_CONFIGS, NodeConfig};

/// Node body size in pixels.
pub const SIZE_RANGE_PX: Range<f32> = 10.0..24.0;

/// Horizontal spawn position as a percentage of the viewport width.
pub const POSITION_RANGE_PERCENT: Range<f32> = 0.0..100.0;

/// Time a node takes to cross the viewport.
pub const DURATION_RANGE_MS: Range<f32> = 20_000.0..35_000.0;

/// Peak horizontal drift, reached halfway through the animation.
pub const DRIFT_RANGE_PX: Range<f32> = -50.0..50.0;

/// Tail line length in pixels.
pub const TAIL_LENGTH_RANGE_PX: Range<f32> = 50.0..100.0;

/// Nodes start this far below the bottom edge and end this far above the top.
pub const OFFSCREEN_MARGIN_PX: f32 = 30.0;

/// Fixed body rotation applied to diamonds.
pub const DIAMOND_ROTATION_DEG: f32 = 45.0;

/// Default number of nodes spawned at startup.
pub const DEFAULT_BURST_COUNT: u32 = 8;

/// Default delay between the startup spawns.
pub const DEFAULT_BURST_STAGGER_MS: u64 = 500;

/// Default period of the continuous spawner.
pub const DEFAULT_SPAWN_INTERVAL_MS: u64 = 2_500;

/// Shape of a floating node body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Circle,
    Square,
    Diamond,
}

impl NodeShape {
    /// Rotation of the node body in degrees.
    pub fn body_rotation_deg(self) -> f32 {
        match self {
            NodeShape::Diamond => DIAMOND_ROTATION_DEG,
            NodeShape::Circle | NodeShape::Square => 0.0,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            NodeShape::Circle => "circle",
            NodeShape::Square => "square",
            NodeShape::Diamond => "diamond",
        }
    }
}

/// Color family of a floating node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeColor {
    Teal,
    Gold,
    Green,
}

impl NodeColor {
    /// Resolve the visual style for this color.
    pub fn style(self) -> &'static ColorStyle {
        match self {
            NodeColor::Teal => &palette::TEAL,
            NodeColor::Gold => &palette::GOLD,
            NodeColor::Green => &palette::GREEN,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            NodeColor::Teal => "teal",
            NodeColor::Gold => "gold",
            NodeColor::Green => "green",
        }
    }
}

/// Pixel dimensions of the surface nodes are rendered into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// A viewport with no area cannot hold any nodes.
    pub fn is_empty(&self) -> bool {
        self.width_px <= 0.0 || self.height_px <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_diamonds_rotate() {
        assert_eq!(NodeShape::Diamond.body_rotation_deg(), 45.0);
        assert_eq!(NodeShape::Circle.body_rotation_deg(), 0.0);
        assert_eq!(NodeShape::Square.body_rotation_deg(), 0.0);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0.0, 480.0).is_empty());
        assert!(Viewport::new(640.0, 0.0).is_empty());
        assert!(!Viewport::new(640.0, 480.0).is_empty());
    }
}
