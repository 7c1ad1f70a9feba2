//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the caller's clock reading
//! - Seeded RNG only
//! - Stable iteration order (insertion order of pursuers)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod placement;
pub mod rect;
pub mod state;
pub mod steering;
pub mod tick;

pub use clock::{ClockUpdate, SessionClock, SessionPhase};
pub use collision::{
    MoveResult, blocked_by_obstacles, blocked_for_pursuer, catching_pursuer, resolve_player_move,
};
pub use obstacles::{Obstacle, ObstacleField, ObstacleKind};
pub use placement::{
    PlacementExhausted, PlacementRequest, SpawnRing, find_free_position, find_spawn_near,
};
pub use rect::Rect;
pub use state::{FrameSnapshot, Player, Pursuer, Session};
pub use steering::{avoidance_step, predict_target, step_toward};
pub use tick::{TickInput, tick};
