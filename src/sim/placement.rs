//! Rejection-sampling placement
//!
//! Every placed entity (interior blocks, initial pursuers, spawned pursuers)
//! goes through one of the two samplers here. Both draw random candidates
//! until one satisfies all constraints or the attempt ceiling is hit; they
//! never loop unbounded, so a saturated arena costs a missing entity rather
//! than a hang.

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::rect::Rect;
use crate::distance_to_edge;
use crate::polar_to_cartesian;

/// The sampler ran out of attempts. Non-fatal: the caller skips the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free position found after {attempts} attempts")]
pub struct PlacementExhausted {
    pub attempts: u32,
}

/// Arena-uniform placement request
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest {
    /// Region the whole new rectangle must fit inside
    pub bounds: Rect,
    /// Size of the new rectangle
    pub size: Vec2,
    /// Per-side expansion applied to the candidate and to every occupied rect
    pub clearance: f32,
    /// Keeps candidates this far inside `bounds`
    pub inset: f32,
    /// Reject candidates whose top-left lies closer than the distance to the point
    pub keep_away: Option<(Vec2, f32)>,
    pub max_attempts: u32,
}

impl PlacementRequest {
    pub fn new(bounds: Rect, size: Vec2, max_attempts: u32) -> Self {
        Self {
            bounds,
            size,
            clearance: 0.0,
            inset: 0.0,
            keep_away: None,
            max_attempts,
        }
    }

    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_inset(mut self, inset: f32) -> Self {
        self.inset = inset;
        self
    }

    pub fn keep_away_from(mut self, point: Vec2, min_distance: f32) -> Self {
        self.keep_away = Some((point, min_distance));
        self
    }

    /// Inclusive range of legal top-left corners, `None` if nothing fits
    fn candidate_range(&self) -> Option<(Vec2, Vec2)> {
        let lo = Vec2::new(self.bounds.x + self.inset, self.bounds.y + self.inset);
        let hi = Vec2::new(
            self.bounds.right() - self.size.x - self.inset,
            self.bounds.bottom() - self.size.y - self.inset,
        );
        (lo.x <= hi.x && lo.y <= hi.y).then_some((lo, hi))
    }
}

/// True if `rect` keeps `clearance` from every occupied rectangle
#[inline]
pub fn is_clear(rect: &Rect, occupied: &[Rect], clearance: f32) -> bool {
    let grown = rect.expanded(clearance);
    occupied
        .iter()
        .all(|other| !grown.intersects(&other.expanded(clearance)))
}

/// Find a top-left position for a new rectangle, drawn uniformly inside the
/// request bounds.
pub fn find_free_position<R: Rng>(
    rng: &mut R,
    request: &PlacementRequest,
    occupied: &[Rect],
) -> Result<Vec2, PlacementExhausted> {
    let Some((lo, hi)) = request.candidate_range() else {
        return Err(PlacementExhausted { attempts: 0 });
    };

    for _ in 0..request.max_attempts {
        let pos = Vec2::new(rng.random_range(lo.x..=hi.x), rng.random_range(lo.y..=hi.y));

        if let Some((point, min_distance)) = request.keep_away {
            if pos.distance(point) < min_distance {
                continue;
            }
        }

        let candidate = Rect::new(pos.x, pos.y, request.size.x, request.size.y);
        if is_clear(&candidate, occupied, request.clearance) {
            return Ok(pos);
        }
    }

    Err(PlacementExhausted {
        attempts: request.max_attempts,
    })
}

/// Polar spawn request: a ring around an anchor, away from the arena edges
#[derive(Debug, Clone, Copy)]
pub struct SpawnRing {
    pub anchor: Vec2,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Candidates closer than this to any arena edge are re-rolled
    pub edge_margin: f32,
    /// Arena width and height
    pub arena: Vec2,
    /// Side length of the spawned square
    pub size: f32,
    pub clearance: f32,
    pub max_attempts: u32,
}

/// Find a spawn position at a random angle and distance from the ring anchor.
///
/// The candidate is clamped into the arena; a clamped candidate ends up on
/// an arena edge and is then rejected by the edge margin.
pub fn find_spawn_near<R: Rng>(
    rng: &mut R,
    ring: &SpawnRing,
    occupied: &[Rect],
) -> Result<Vec2, PlacementExhausted> {
    let max = (ring.arena - Vec2::splat(ring.size)).max(Vec2::ZERO);

    for _ in 0..ring.max_attempts {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let radius = rng.random_range(ring.min_radius..=ring.max_radius);
        let pos = (ring.anchor + polar_to_cartesian(radius, theta)).clamp(Vec2::ZERO, max);

        if distance_to_edge(pos, ring.arena.x, ring.arena.y) < ring.edge_margin {
            continue;
        }

        let candidate = Rect::square(pos, ring.size);
        if is_clear(&candidate, occupied, ring.clearance) {
            return Ok(pos);
        }
    }

    Err(PlacementExhausted {
        attempts: ring.max_attempts,
    })
}
