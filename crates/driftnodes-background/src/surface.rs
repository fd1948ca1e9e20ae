//! Rendering adapter between the animator and a drawing surface.

use driftnodes_core::{ColorStyle, NodeShape, Viewport};

use crate::node::NodeId;

/// Anything floating nodes can be drawn onto.
pub trait Surface {
    /// Current surface size. Queried once per frame.
    fn viewport(&self) -> Viewport;

    /// Draw one node in its computed state.
    fn draw_node(&mut self, sprite: &NodeSprite);
}

/// Tail line attached to a node body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailSprite {
    pub length_px: f32,
    /// Rotation relative to the node body.
    pub rotation_deg: f32,
}

/// Fully computed visual state of one node for one frame.
///
/// Positions follow the CSS box model: the node box is anchored at
/// `left_px` from the left edge and `bottom_px` from the bottom edge, then
/// translated by the motion offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSprite {
    pub id: NodeId,
    pub shape: NodeShape,
    pub style: &'static ColorStyle,
    pub size_px: f32,
    pub left_px: f32,
    pub bottom_px: f32,
    pub offset_x_px: f32,
    pub offset_y_px: f32,
    pub opacity: f32,
    /// Body rotation, clockwise.
    pub rotation_deg: f32,
    pub tail: TailSprite,
}

impl NodeSprite {
    /// Center of the node body in surface pixels, y growing downward.
    pub fn center_px(&self, viewport: Viewport) -> (f32, f32) {
        let half = self.size_px / 2.0;
        let x = self.left_px + self.offset_x_px + half;
        let top = viewport.height_px - self.bottom_px - self.size_px + self.offset_y_px;
        (x, top + half)
    }

    /// Angle of the tail as it appears on screen.
    pub fn tail_screen_angle_deg(&self) -> f32 {
        self.rotation_deg + self.tail.rotation_deg
    }

    /// Point where the tail leaves the body: the middle of its right edge,
    /// carried around by the body rotation.
    pub fn tail_anchor_px(&self, viewport: Viewport) -> (f32, f32) {
        let (cx, cy) = self.center_px(viewport);
        let angle = self.rotation_deg.to_radians();
        let half = self.size_px / 2.0;
        (cx + angle.cos() * half, cy + angle.sin() * half)
    }

    /// Far end of the tail.
    pub fn tail_end_px(&self, viewport: Viewport) -> (f32, f32) {
        let (ax, ay) = self.tail_anchor_px(viewport);
        let angle = self.tail_screen_angle_deg().to_radians();
        (
            ax + angle.cos() * self.tail.length_px,
            ay + angle.sin() * self.tail.length_px,
        )
    }
}
