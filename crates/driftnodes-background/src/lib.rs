//! Floating node background for the driftnodes terminal app.
//!
//! Nodes are spawned on a schedule, drift upward across the viewport while
//! fading in and out, and are retired when their animation completes. The
//! motion law is pure; drawing goes through the [`Surface`] trait, with
//! [`CellCanvas`] rasterizing onto terminal cells and
//! [`FloatingBackground`] wiring everything into a ratatui frame.

mod animator;
mod canvas;
mod chars;
mod clock;
pub mod motion;
mod node;
mod schedule;
mod state;
mod surface;

pub use animator::{AnimatorSettings, NodeAnimator, TickReport};
pub use canvas::CellCanvas;
pub use clock::{AnimationClock, MonotonicSource, TimeSource};
pub use node::{FloatingNode, NodeId, NodePhase};
pub use schedule::SpawnSchedule;
pub use state::FloatingBackground;
pub use surface::{NodeSprite, Surface, TailSprite};
