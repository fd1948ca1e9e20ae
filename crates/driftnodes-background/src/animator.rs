//! The floating node animator.
//!
//! Owns every live node and drives all of them from a single tick per frame.
//! Nodes are spawned from a [`SpawnSchedule`], advanced through their
//! lifecycle and dropped from the collection as soon as they expire.

use driftnodes_core::{
    DEFAULT_BURST_COUNT, DEFAULT_BURST_STAGGER_MS, DEFAULT_SPAWN_INTERVAL_MS, Viewport,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::node::{FloatingNode, NodeId, NodePhase};
use crate::schedule::SpawnSchedule;
use crate::surface::Surface;

/// Construction parameters for [`NodeAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorSettings {
    pub burst_count: u32,
    pub burst_stagger_ms: u64,
    pub interval_ms: u64,
    /// Maximum concurrently live nodes; unbounded when `None`.
    pub max_live_nodes: Option<usize>,
    /// Fixed RNG seed; drawn from entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            burst_count: DEFAULT_BURST_COUNT,
            burst_stagger_ms: DEFAULT_BURST_STAGGER_MS,
            interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            max_live_nodes: None,
            seed: None,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
    /// Due spawns dropped for lack of a container or because of the cap.
    pub skipped: usize,
    /// Live nodes after the tick.
    pub live: usize,
}

/// Spawns, animates and retires floating nodes.
#[derive(Debug)]
pub struct NodeAnimator {
    nodes: Vec<FloatingNode>,
    schedule: SpawnSchedule,
    rng: StdRng,
    next_id: u64,
    max_live_nodes: Option<usize>,
}

impl Default for NodeAnimator {
    fn default() -> Self {
        Self::new(AnimatorSettings::default())
    }
}

impl NodeAnimator {
    pub fn new(settings: AnimatorSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            nodes: Vec::new(),
            schedule: SpawnSchedule::new(
                settings.burst_count,
                settings.burst_stagger_ms,
                settings.interval_ms,
            ),
            rng,
            next_id: 0,
            max_live_nodes: settings.max_live_nodes,
        }
    }

    /// Live nodes, oldest first.
    pub fn nodes(&self) -> &[FloatingNode] {
        &self.nodes
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&FloatingNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn at_capacity(&self) -> bool {
        self.max_live_nodes.is_some_and(|cap| self.nodes.len() >= cap)
    }

    /// Spawn one node starting at `start_ms`.
    ///
    /// Returns `None` when the live-node cap is reached.
    pub fn spawn_node(&mut self, start_ms: u64) -> Option<NodeId> {
        if self.at_capacity() {
            debug!(live = self.nodes.len(), "live-node cap reached, spawn skipped");
            return None;
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;
        let node = FloatingNode::spawn(id, start_ms, &mut self.rng);
        debug!(
            id = id.0,
            shape = node.config.shape.name(),
            color = node.config.color.name(),
            duration_ms = node.duration_ms,
            "spawned node"
        );
        self.nodes.push(node);
        Some(id)
    }

    /// Remove a live node before it expires.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        before != self.nodes.len()
    }

    /// Remove every live node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Advance the animation to `now_ms`.
    ///
    /// `container` is the surface nodes are spawned into; when it is absent
    /// due spawns are dropped while existing nodes keep animating.
    pub fn tick(&mut self, now_ms: u64, container: Option<Viewport>) -> TickReport {
        let mut report = TickReport::default();
        let has_container = container.is_some_and(|v| !v.is_empty());

        for start_ms in self.schedule.drain_due(now_ms) {
            if !has_container {
                trace!(start_ms, "no container, spawn skipped");
                report.skipped += 1;
                continue;
            }
            match self.spawn_node(start_ms) {
                Some(_) => report.spawned += 1,
                None => report.skipped += 1,
            }
        }

        for node in &mut self.nodes {
            if node.advance(now_ms) == NodePhase::Expired {
                trace!(id = node.id.0, "node expired");
                report.expired += 1;
            }
        }
        self.nodes.retain(|n| !n.is_expired());

        report.live = self.nodes.len();
        report
    }

    /// Draw every live node onto `surface`. Returns the number drawn.
    pub fn render<S: Surface + ?Sized>(&self, now_ms: u64, surface: &mut S) -> usize {
        let viewport = surface.viewport();
        if viewport.is_empty() {
            return 0;
        }
        for node in &self.nodes {
            surface.draw_node(&node.sprite_at(now_ms, viewport));
        }
        self.nodes.len()
    }
}
