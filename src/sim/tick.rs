//! Per-frame simulation tick
//!
//! One call per rendered frame. Order within a tick is fixed: clock, spawns,
//! player movement, pursuer steering, contact check. Speeds are per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::SessionPhase;
use super::collision::{blocked_for_pursuer, catching_pursuer, resolve_player_move};
use super::rect::Rect;
use super::state::{FrameSnapshot, Session};
use super::steering::{predict_target, step_toward};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start a new round; only honoured once the player has been caught
    pub restart: bool,
}

impl TickInput {
    /// Unit-per-axis direction; opposite keys cancel and diagonals are not
    /// normalised
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the session to the caller's clock reading `now_ms`
pub fn tick(session: &mut Session, now_ms: u64, input: &TickInput) -> FrameSnapshot {
    if session.clock.is_terminal() {
        if !input.restart {
            return session.snapshot();
        }
        session.reset();
        log::info!("Session restarted (seed {})", session.seed());
    }

    let update = session.clock.advance(now_ms, &session.tuning);

    if update.grace_ended {
        for pursuer in &mut session.pursuers {
            pursuer.dormant = false;
        }
        log::info!(
            "Grace period over at {} ms, {} pursuers awake",
            session.clock.elapsed_ms(),
            session.pursuers.len()
        );
    }

    if update.spawn_batch > 0 {
        spawn_batch(session, update.spawn_batch);
    }

    if let Some(size) = update.escalated_to {
        log::debug!("Spawn batch size now {} at {} ms", size, session.clock.elapsed_ms());
    }

    let step = input.direction() * session.tuning.player_speed;
    let arena = session.arena_size();
    let moved = resolve_player_move(&mut session.player, step, arena, &session.obstacles);
    if moved.blocked {
        log::trace!("Player move blocked, holding at {}", moved.pos);
    }

    steer_pursuers(session);

    if let Some(id) = catching_pursuer(&session.player, &session.pursuers) {
        session.clock.mark_terminal();
        log::info!(
            "Caught by pursuer {} after {} ({} pursuers)",
            id,
            session.snapshot().clock_label(),
            session.pursuers.len()
        );
    }

    session.snapshot()
}

fn current_target(session: &Session) -> Vec2 {
    predict_target(
        session.player.pos,
        session.player.vel,
        session.arena_size(),
        session.tuning.entity_size,
        session.tuning.prediction_scale(),
    )
}

fn spawn_batch(session: &mut Session, count: u32) {
    let target = current_target(session);
    let mut placed = 0;
    for _ in 0..count {
        if session.spawn_pursuer_near_player(target) {
            placed += 1;
        }
    }
    log::debug!(
        "Spawned {}/{} pursuers at {} ms (total {})",
        placed,
        count,
        session.clock.elapsed_ms(),
        session.pursuers.len()
    );
}

/// Refresh targets and step every awake pursuer.
///
/// Iterates by index: each pursuer sees the already-updated positions of the
/// pursuers before it.
fn steer_pursuers(session: &mut Session) {
    if session.clock.phase() != SessionPhase::Active {
        return;
    }

    let now = session.clock.elapsed_ms();
    let target = current_target(session);
    let tuning = &session.tuning;

    for i in 0..session.pursuers.len() {
        if session.pursuers[i].dormant {
            continue;
        }
        if session.pursuers[i].target_due(now, tuning.target_refresh_ms) {
            session.pursuers[i].retarget(target, now);
        }

        let pursuer = &session.pursuers[i];
        let size = pursuer.size;
        let next = step_toward(
            pursuer.pos,
            pursuer.target,
            tuning.pursuer_speed,
            tuning.avoidance_probes,
            |pos| {
                let rect = Rect::square(pos, size);
                blocked_for_pursuer(&rect, &session.obstacles, &session.pursuers, i)
            },
        );
        session.pursuers[i].pos = next;
    }
}
