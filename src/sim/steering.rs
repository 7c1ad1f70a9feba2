//! Pursuer steering: predictive targeting plus radial local avoidance
//!
//! Pursuers lead the player instead of chasing its trailing position, and
//! sidestep blocked headings by probing rotated directions. There is no
//! global path search; a pursuer boxed in on every probed heading simply
//! holds position for the frame.

use glam::Vec2;

/// Where a pursuer should head: the player's position extrapolated along
/// its last-frame velocity, clamped so a `pursuer_size` square stays in the
/// arena. A stationary player is targeted where it stands.
pub fn predict_target(
    player_pos: Vec2,
    player_vel: Vec2,
    arena: Vec2,
    pursuer_size: f32,
    prediction_scale: f32,
) -> Vec2 {
    if player_vel == Vec2::ZERO {
        return player_pos;
    }
    let max = (arena - Vec2::splat(pursuer_size)).max(Vec2::ZERO);
    (player_pos + player_vel * prediction_scale).clamp(Vec2::ZERO, max)
}

/// Heading `index` of `probes` evenly spaced rotations starting at `heading`
#[inline]
fn probe_heading(heading: f32, index: u32, probes: u32) -> f32 {
    heading + index as f32 * std::f32::consts::TAU / probes as f32
}

/// First collision-free step of length `speed`, probing `probes` headings
/// rotated from `heading` in increasing order. Index 0 is the heading itself.
///
/// `blocked` tests a destination top-left position.
pub fn avoidance_step<F>(
    pos: Vec2,
    heading: f32,
    speed: f32,
    probes: u32,
    blocked: F,
) -> Option<Vec2>
where
    F: Fn(Vec2) -> bool,
{
    (0..probes)
        .map(|i| {
            let theta = probe_heading(heading, i, probes);
            Vec2::new(theta.cos(), theta.sin()) * speed
        })
        .find(|step| !blocked(pos + *step))
}

/// Next position of a pursuer at `pos` walking toward `target`.
///
/// Within one step of the target it snaps onto it (no overshoot); a blocked
/// snap holds position. Otherwise the straight step is tried first, then the
/// rotated probes; if every probe is blocked the pursuer stays put.
pub fn step_toward<F>(pos: Vec2, target: Vec2, speed: f32, probes: u32, blocked: F) -> Vec2
where
    F: Fn(Vec2) -> bool,
{
    let delta = target - pos;
    let distance = delta.length();

    if distance < speed {
        return if blocked(target) { pos } else { target };
    }

    let heading = delta.y.atan2(delta.x);
    match avoidance_step(pos, heading, speed, probes, blocked) {
        Some(step) => pos + step,
        None => pos,
    }
}
