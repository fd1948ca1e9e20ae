//! The fixed set of node templates.

use crate::{ColorStyle, NodeColor, NodeShape};

/// Immutable template a floating node is spawned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    pub shape: NodeShape,
    pub color: NodeColor,
    /// Tail angle as it should appear on screen, clockwise.
    pub tail_angle_deg: i32,
}

impl NodeConfig {
    const fn new(shape: NodeShape, color: NodeColor, tail_angle_deg: i32) -> Self {
        Self {
            shape,
            color,
            tail_angle_deg,
        }
    }

    pub fn style(&self) -> &'static ColorStyle {
        self.color.style()
    }

    /// Tail rotation relative to the node body.
    ///
    /// The tail is a child of the body, so a rotated body rotates its tail
    /// too. Subtracting the body rotation keeps the on-screen angle equal to
    /// [`NodeConfig::tail_angle_deg`].
    pub fn tail_rotation_deg(&self) -> f32 {
        self.tail_angle_deg as f32 - self.shape.body_rotation_deg()
    }
}

/// Templates are picked uniformly, so duplicates weight the draw.
pub static NODE_CONFIGS: [NodeConfig; 10] = [
    NodeConfig::new(NodeShape::Circle, NodeColor::Teal, -15),
    NodeConfig::new(NodeShape::Circle, NodeColor::Teal, 20),
    NodeConfig::new(NodeShape::Circle, NodeColor::Teal, -30),
    NodeConfig::new(NodeShape::Circle, NodeColor::Teal, 35),
    NodeConfig::new(NodeShape::Square, NodeColor::Gold, -20),
    NodeConfig::new(NodeShape::Square, NodeColor::Gold, 25),
    NodeConfig::new(NodeShape::Square, NodeColor::Teal, -40),
    NodeConfig::new(NodeShape::Diamond, NodeColor::Green, 0),
    NodeConfig::new(NodeShape::Diamond, NodeColor::Gold, 15),
    NodeConfig::new(NodeShape::Diamond, NodeColor::Green, -25),
];
