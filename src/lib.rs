//! Pursuit Arena - a top-down chase game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, steering, collisions, session clock)
//! - `tuning`: Data-driven game balance
//! - `error`: Session construction errors

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::SessionError;
pub use sim::{FrameSnapshot, Session, SessionPhase, TickInput, tick};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame time the per-frame speeds were tuned against (ms)
    pub const FRAME_MS: f32 = 16.0;

    /// Side length of the player and of every pursuer
    pub const ENTITY_SIZE: f32 = 40.0;
    /// Player displacement per frame and per held direction
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Pursuer displacement per frame
    pub const PURSUER_SPEED: f32 = 2.0;

    /// Arena border strip thickness
    pub const BORDER_THICKNESS: f32 = 10.0;
    /// Interior block side length
    pub const BLOCK_SIZE: f32 = 100.0;
    /// Clearance between interior blocks: two entity widths
    pub const BLOCK_CLEARANCE: f32 = 2.0 * ENTITY_SIZE;
    /// Arena area per interior block
    pub const AREA_PER_BLOCK: f32 = 80_000.0;
    /// Arena area per initial pursuer
    pub const AREA_PER_PURSUER: f32 = 100_000.0;
    /// Clearance kept around pursuers when they are placed
    pub const PURSUER_CLEARANCE: f32 = 10.0;

    /// Rejection sampling attempt ceiling
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Initial pursuers keep at least this far from the player
    pub const INITIAL_SPAWN_MIN_DISTANCE: f32 = 200.0;
    /// Polar spawn ring around the player
    pub const SPAWN_MIN_DISTANCE: f32 = 200.0;
    pub const SPAWN_MAX_DISTANCE: f32 = 400.0;
    /// Spawned pursuers keep at least this far from every arena edge
    pub const SPAWN_EDGE_MARGIN: f32 = 200.0;

    /// Pursuer target refresh interval (ms)
    pub const TARGET_REFRESH_MS: u64 = 500;
    /// How far ahead pursuers extrapolate the player (ms)
    pub const PREDICTION_HORIZON_MS: f32 = 500.0;
    /// Number of headings probed by local avoidance
    pub const AVOIDANCE_PROBES: u32 = 16;

    /// Grace period before pursuers wake up (ms)
    pub const GRACE_PERIOD_MS: u64 = 3_000;
    /// Cadence of spawn batches while active (ms)
    pub const SPAWN_INTERVAL_MS: u64 = 2_500;
    /// Batch size grows by one on this cadence (ms)
    pub const ESCALATION_INTERVAL_MS: u64 = 30_000;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Shortest distance from a point to any edge of a `width` x `height` arena
#[inline]
pub fn distance_to_edge(pos: Vec2, width: f32, height: f32) -> f32 {
    let horizontal = pos.x.min(width - pos.x);
    let vertical = pos.y.min(height - pos.y);
    horizontal.min(vertical)
}
