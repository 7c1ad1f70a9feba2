//! Session state and core simulation types
//!
//! A `Session` owns everything one game needs: the obstacle field, the
//! player, the pursuers, the clock and a seeded RNG. Nothing is global, so
//! several sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{SessionClock, SessionPhase};
use super::obstacles::ObstacleField;
use super::placement::{PlacementRequest, SpawnRing, find_free_position, find_spawn_near};
use super::rect::Rect;
use crate::error::{SessionError, SessionResult};
use crate::tuning::Tuning;

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Position delta of the last tick, zero after a blocked move
    pub vel: Vec2,
    pub size: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// A chasing entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Point the pursuer is currently walking toward
    pub target: Vec2,
    /// Session time of the last target refresh (ms)
    pub target_refreshed_ms: u64,
    /// Dormant pursuers do not move
    pub dormant: bool,
}

impl Pursuer {
    pub fn new(id: u32, pos: Vec2, size: f32, target: Vec2, now_ms: u64, dormant: bool) -> Self {
        Self {
            id,
            pos,
            size,
            target,
            target_refreshed_ms: now_ms,
            dormant,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// True once `interval_ms` have passed since the last refresh
    #[inline]
    pub fn target_due(&self, now_ms: u64, interval_ms: u64) -> bool {
        now_ms.saturating_sub(self.target_refreshed_ms) >= interval_ms
    }

    pub fn retarget(&mut self, target: Vec2, now_ms: u64) {
        self.target = target;
        self.target_refreshed_ms = now_ms;
    }
}

/// Consistent view of a session, produced once at the end of every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player: Vec2,
    pub pursuers: Vec<Vec2>,
    pub elapsed_ms: u64,
    pub pursuer_count: usize,
    pub batch_size: u32,
    pub phase: SessionPhase,
    pub terminal: bool,
}

impl FrameSnapshot {
    /// Elapsed session time as `MM:SS`
    pub fn clock_label(&self) -> String {
        let secs = self.elapsed_ms / 1000;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// One game: arena, entities, clock and RNG
#[derive(Debug, Clone)]
pub struct Session {
    width: f32,
    height: f32,
    pub(crate) tuning: Tuning,
    /// Seed the current round was built from
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) clock: SessionClock,
    pub(crate) obstacles: ObstacleField,
    pub(crate) player: Player,
    pub(crate) pursuers: Vec<Pursuer>,
    next_id: u32,
}

impl Session {
    /// New session with default tuning and a random seed
    pub fn new(width: f32, height: f32) -> SessionResult<Self> {
        Self::with_tuning(width, height, Tuning::default(), rand::random())
    }

    /// New session with explicit tuning and seed (deterministic)
    pub fn with_tuning(width: f32, height: f32, tuning: Tuning, seed: u64) -> SessionResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SessionError::InvalidArena { width, height });
        }
        tuning.validate()?;
        let min = tuning.min_arena_side();
        if width < min || height < min {
            return Err(SessionError::ArenaTooSmall { width, height, min });
        }

        let mut session = Self {
            width,
            height,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: SessionClock::new(&tuning),
            obstacles: ObstacleField::default(),
            player: Player::new(Vec2::ZERO, tuning.entity_size),
            pursuers: Vec::new(),
            next_id: 1,
            tuning,
        };
        session.populate(seed);
        Ok(session)
    }

    /// Start over with the same arena and tuning.
    ///
    /// The next seed comes from the session RNG, so a seeded session resets
    /// reproducibly.
    pub fn reset(&mut self) {
        let seed = self.rng.random();
        self.populate(seed);
    }

    /// Rebuild obstacles, player and initial pursuers from `seed`
    fn populate(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.clock = SessionClock::new(&self.tuning);
        self.next_id = 1;
        self.pursuers.clear();

        let start = self.player_start();
        let reserved = [Rect::square(start, self.tuning.entity_size)];
        self.obstacles = ObstacleField::generate(
            &mut self.rng,
            self.width,
            self.height,
            &self.tuning,
            &reserved,
        );
        self.player = Player::new(start, self.tuning.entity_size);
        self.spawn_initial_pursuers();

        log::info!(
            "Session {}x{} seed {}: {} blocks, {} pursuers",
            self.width,
            self.height,
            seed,
            self.obstacles.blocks().count(),
            self.pursuers.len()
        );
    }

    /// Arena centre; reserved before blocks are placed so it is always free
    fn player_start(&self) -> Vec2 {
        let size = self.tuning.entity_size;
        Vec2::new((self.width - size) / 2.0, (self.height - size) / 2.0)
    }

    fn spawn_initial_pursuers(&mut self) {
        let size = self.tuning.entity_size;
        let wanted = ((self.width * self.height) / self.tuning.area_per_pursuer).floor() as usize;
        let request = PlacementRequest::new(
            self.arena_rect(),
            Vec2::splat(size),
            self.tuning.max_placement_attempts,
        )
        .with_clearance(self.tuning.pursuer_clearance)
        .keep_away_from(self.player.pos, self.tuning.initial_spawn_min_distance);

        let mut skipped = 0;
        for _ in 0..wanted {
            let occupied = self.occupied_rects();
            match find_free_position(&mut self.rng, &request, &occupied) {
                Ok(pos) => {
                    // Player starts at rest, so the first target is where it stands
                    let target = self.player.pos;
                    self.add_pursuer(pos, target, true);
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {skipped} of {wanted} initial pursuers: no free position");
        }
    }

    /// Spawn one pursuer on the ring around the player.
    ///
    /// Returns false, logging a warning, when no position was found.
    pub(crate) fn spawn_pursuer_near_player(&mut self, target: Vec2) -> bool {
        let ring = SpawnRing {
            anchor: self.player.pos,
            min_radius: self.tuning.spawn_min_distance,
            max_radius: self.tuning.spawn_max_distance,
            edge_margin: self.tuning.spawn_edge_margin,
            arena: Vec2::new(self.width, self.height),
            size: self.tuning.entity_size,
            clearance: self.tuning.pursuer_clearance,
            max_attempts: self.tuning.max_placement_attempts,
        };
        let occupied = self.occupied_rects();
        match find_spawn_near(&mut self.rng, &ring, &occupied) {
            Ok(pos) => {
                let dormant = self.clock.phase() == SessionPhase::Grace;
                self.add_pursuer(pos, target, dormant);
                true
            }
            Err(e) => {
                log::warn!("Pursuer spawn skipped: {e}");
                false
            }
        }
    }

    fn add_pursuer(&mut self, pos: Vec2, target: Vec2, dormant: bool) {
        let id = self.next_id;
        self.next_id += 1;
        let now = self.clock.elapsed_ms();
        self.pursuers.push(Pursuer::new(
            id,
            pos,
            self.tuning.entity_size,
            target,
            now,
            dormant,
        ));
    }

    /// Obstacles plus pursuers, for placement checks
    fn occupied_rects(&self) -> Vec<Rect> {
        let mut rects = self.obstacles.rects();
        rects.extend(self.pursuers.iter().map(Pursuer::rect));
        rects
    }

    pub fn arena_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Arena width and height
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> SessionPhase {
        self.clock.phase()
    }

    pub fn batch_size(&self) -> u32 {
        self.clock.batch_size()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            player: self.player.pos,
            pursuers: self.pursuers.iter().map(|p| p.pos).collect(),
            elapsed_ms: self.clock.elapsed_ms(),
            pursuer_count: self.pursuers.len(),
            batch_size: self.clock.batch_size(),
            phase: self.clock.phase(),
            terminal: self.clock.is_terminal(),
        }
    }
}
