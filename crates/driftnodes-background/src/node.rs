//! Floating node instances and their lifecycle.

use driftnodes_core::{
    DRIFT_RANGE_PX, DURATION_RANGE_MS, NODE_CONFIGS, NodeConfig, OFFSCREEN_MARGIN_PX,
    POSITION_RANGE_PERCENT, SIZE_RANGE_PX, TAIL_LENGTH_RANGE_PX, Viewport,
};
use rand::Rng;

use crate::motion;
use crate::surface::{NodeSprite, TailSprite};

/// Handle identifying one node within an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// Lifecycle phase of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    /// Created, not yet advanced by a tick.
    Spawned,
    /// Moving across the viewport.
    Animating,
    /// Finished; removed at the end of the tick that expired it.
    Expired,
}

/// One ephemeral floating node.
#[derive(Debug, Clone)]
pub struct FloatingNode {
    pub id: NodeId,
    pub config: &'static NodeConfig,
    pub size_px: f32,
    pub position_percent: f32,
    pub duration_ms: f32,
    pub drift_px: f32,
    pub tail_length_px: f32,
    /// Animation time at which the node was spawned.
    pub start_ms: u64,
    phase: NodePhase,
}

impl FloatingNode {
    /// Spawn a node with randomized template and motion parameters.
    pub fn spawn<R: Rng + ?Sized>(id: NodeId, start_ms: u64, rng: &mut R) -> Self {
        let config = &NODE_CONFIGS[rng.gen_range(0..NODE_CONFIGS.len())];
        Self {
            id,
            config,
            size_px: rng.gen_range(SIZE_RANGE_PX),
            position_percent: rng.gen_range(POSITION_RANGE_PERCENT),
            duration_ms: rng.gen_range(DURATION_RANGE_MS),
            drift_px: rng.gen_range(DRIFT_RANGE_PX),
            tail_length_px: rng.gen_range(TAIL_LENGTH_RANGE_PX),
            start_ms,
            phase: NodePhase::Spawned,
        }
    }

    pub fn phase(&self) -> NodePhase {
        self.phase
    }

    pub fn is_expired(&self) -> bool {
        self.phase == NodePhase::Expired
    }

    /// Progress at `now_ms`; times before the spawn count as zero.
    pub fn progress_at(&self, now_ms: u64) -> f32 {
        motion::progress(now_ms.saturating_sub(self.start_ms), self.duration_ms)
    }

    /// Advance the lifecycle to `now_ms` and return the new phase.
    ///
    /// Expiry is terminal; an expired node never becomes live again.
    pub fn advance(&mut self, now_ms: u64) -> NodePhase {
        self.phase = match self.phase {
            NodePhase::Expired => NodePhase::Expired,
            _ if self.progress_at(now_ms) >= 1.0 => NodePhase::Expired,
            NodePhase::Spawned | NodePhase::Animating => NodePhase::Animating,
        };
        self.phase
    }

    /// Compute the node's visual state for one frame.
    pub fn sprite_at(&self, now_ms: u64, viewport: Viewport) -> NodeSprite {
        let frame = motion::sample(
            self.progress_at(now_ms),
            self.drift_px,
            viewport.height_px,
            self.config.shape,
        );
        NodeSprite {
            id: self.id,
            shape: self.config.shape,
            style: self.config.style(),
            size_px: self.size_px,
            left_px: viewport.width_px * self.position_percent / 100.0,
            bottom_px: -OFFSCREEN_MARGIN_PX,
            offset_x_px: frame.offset_x_px,
            offset_y_px: frame.offset_y_px,
            opacity: frame.opacity,
            rotation_deg: frame.rotation_deg,
            tail: TailSprite {
                length_px: self.tail_length_px,
                rotation_deg: self.config.tail_rotation_deg(),
            },
        }
    }
}
