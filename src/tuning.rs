//! Game balance knobs
//!
//! Every gameplay constant the simulation reads goes through `Tuning`, so a
//! front end can load a JSON override without recompiling. Missing fields
//! fall back to the defaults in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SessionError, SessionResult};

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Entities ===
    /// Side length of the player and pursuers
    pub entity_size: f32,
    /// Player displacement per frame
    pub player_speed: f32,
    /// Pursuer displacement per frame
    pub pursuer_speed: f32,

    // === Obstacle field ===
    pub border_thickness: f32,
    pub block_size: f32,
    /// Per-side clearance between interior blocks
    pub block_clearance: f32,
    /// Arena area per interior block
    pub area_per_block: f32,

    // === Placement ===
    /// Arena area per initial pursuer
    pub area_per_pursuer: f32,
    /// Per-side clearance around placed pursuers
    pub pursuer_clearance: f32,
    pub max_placement_attempts: u32,
    pub initial_spawn_min_distance: f32,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    pub spawn_edge_margin: f32,

    // === Steering ===
    pub target_refresh_ms: u64,
    /// Look-ahead used when predicting the player's position
    pub prediction_horizon_ms: f32,
    /// Frame time a unit of player velocity corresponds to
    pub frame_ms: f32,
    pub avoidance_probes: u32,

    // === Session clock ===
    pub grace_period_ms: u64,
    pub spawn_interval_ms: u64,
    pub escalation_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            entity_size: ENTITY_SIZE,
            player_speed: PLAYER_SPEED,
            pursuer_speed: PURSUER_SPEED,

            border_thickness: BORDER_THICKNESS,
            block_size: BLOCK_SIZE,
            block_clearance: BLOCK_CLEARANCE,
            area_per_block: AREA_PER_BLOCK,

            area_per_pursuer: AREA_PER_PURSUER,
            pursuer_clearance: PURSUER_CLEARANCE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            initial_spawn_min_distance: INITIAL_SPAWN_MIN_DISTANCE,
            spawn_min_distance: SPAWN_MIN_DISTANCE,
            spawn_max_distance: SPAWN_MAX_DISTANCE,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,

            target_refresh_ms: TARGET_REFRESH_MS,
            prediction_horizon_ms: PREDICTION_HORIZON_MS,
            frame_ms: FRAME_MS,
            avoidance_probes: AVOIDANCE_PROBES,

            grace_period_ms: GRACE_PERIOD_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            escalation_interval_ms: ESCALATION_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning override
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SessionResult<()> {
        let positive = [
            ("entity_size", self.entity_size),
            ("player_speed", self.player_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("border_thickness", self.border_thickness),
            ("block_size", self.block_size),
            ("area_per_block", self.area_per_block),
            ("area_per_pursuer", self.area_per_pursuer),
            ("frame_ms", self.frame_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("block_clearance", self.block_clearance),
            ("pursuer_clearance", self.pursuer_clearance),
            ("initial_spawn_min_distance", self.initial_spawn_min_distance),
            ("spawn_min_distance", self.spawn_min_distance),
            ("spawn_edge_margin", self.spawn_edge_margin),
            ("prediction_horizon_ms", self.prediction_horizon_ms),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.spawn_max_distance.is_finite()
            && self.spawn_max_distance >= self.spawn_min_distance)
        {
            return Err(SessionError::InvalidTuning(format!(
                "spawn distance range {}..{} is empty",
                self.spawn_min_distance, self.spawn_max_distance
            )));
        }
        if self.max_placement_attempts == 0 || self.avoidance_probes == 0 {
            return Err(SessionError::InvalidTuning(
                "attempt and probe counts must be at least 1".to_string(),
            ));
        }
        if self.target_refresh_ms == 0
            || self.spawn_interval_ms == 0
            || self.escalation_interval_ms == 0
        {
            return Err(SessionError::InvalidTuning(
                "clock intervals must be non-zero".to_string(),
            ));
        }

        // Densities finer than one footprint per entity ask for more entities
        // than the arena can hold
        let densities = [
            ("area_per_block", self.area_per_block, self.block_size),
            ("area_per_pursuer", self.area_per_pursuer, self.entity_size),
        ];
        for (name, area, side) in densities {
            if area < side * side {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must be at least {}, got {area}",
                    side * side
                )));
            }
        }
        Ok(())
    }

    /// Multiplier turning one frame of player velocity into the look-ahead offset
    #[inline]
    pub fn prediction_scale(&self) -> f32 {
        self.prediction_horizon_ms / self.frame_ms
    }

    /// Smallest arena side that fits both borders and one entity between them
    #[inline]
    pub fn min_arena_side(&self) -> f32 {
        2.0 * self.border_thickness + self.entity_size
    }
}
