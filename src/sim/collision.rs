//! Collision resolution for axis-aligned entities
//!
//! Three uses of the same strict rectangle overlap test: blocking illegal
//! moves, feasibility checks for pursuer avoidance, and detecting the
//! player getting caught.

use glam::Vec2;

use super::obstacles::ObstacleField;
use super::rect::Rect;
use super::state::{Player, Pursuer};

/// Result of moving the player for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Whether the move was rolled back
    pub blocked: bool,
    /// Position after resolution
    pub pos: Vec2,
}

/// True if `rect` overlaps any obstacle
#[inline]
pub fn blocked_by_obstacles(rect: &Rect, field: &ObstacleField) -> bool {
    field.intersects(rect)
}

/// Feasibility test for a pursuer destination: obstacles and every other
/// pursuer block, the pursuer at index `skip` does not.
pub fn blocked_for_pursuer(
    rect: &Rect,
    field: &ObstacleField,
    pursuers: &[Pursuer],
    skip: usize,
) -> bool {
    blocked_by_obstacles(rect, field)
        || pursuers
            .iter()
            .enumerate()
            .any(|(i, other)| i != skip && rect.intersects(&other.rect()))
}

/// Move the player by `delta`, clamped so it stays inside `[0, arena - size]`.
///
/// A destination overlapping an obstacle is rolled back to the previous
/// position and the velocity zeroed, so pursuers do not extrapolate a move
/// that never happened.
pub fn resolve_player_move(
    player: &mut Player,
    delta: Vec2,
    arena: Vec2,
    field: &ObstacleField,
) -> MoveResult {
    let old = player.pos;
    let max = (arena - Vec2::splat(player.size)).max(Vec2::ZERO);
    let pos = (old + delta).clamp(Vec2::ZERO, max);

    if blocked_by_obstacles(&Rect::square(pos, player.size), field) {
        player.pos = old;
        player.vel = Vec2::ZERO;
        return MoveResult {
            blocked: true,
            pos: old,
        };
    }

    player.vel = pos - old;
    player.pos = pos;
    MoveResult {
        blocked: false,
        pos,
    }
}

/// Id of the first pursuer touching the player, if any
pub fn catching_pursuer(player: &Player, pursuers: &[Pursuer]) -> Option<u32> {
    let rect = player.rect();
    pursuers
        .iter()
        .find(|p| rect.intersects(&p.rect()))
        .map(|p| p.id)
}
