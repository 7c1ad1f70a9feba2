//! Session clock and escalation state machine
//!
//! Grace -> Active -> Terminal. Time only moves when the caller hands in a
//! clock reading; the first reading anchors session time zero.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Pursuers exist but stay dormant
    Grace,
    /// Pursuers chase and spawn batches arrive
    Active,
    /// Player was caught; frozen until reset
    Terminal,
}

/// What changed during one clock advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockUpdate {
    /// Grace period ended on this advance
    pub grace_ended: bool,
    /// Pursuers to spawn on this advance (0 when no batch is due)
    pub spawn_batch: u32,
    /// New batch size if it grew on this advance
    pub escalated_to: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    /// Caller clock reading that maps to session time zero
    start_ms: Option<u64>,
    elapsed_ms: u64,
    phase: SessionPhase,
    grace_ends_ms: u64,
    last_spawn_ms: u64,
    next_escalation_ms: u64,
    batch_size: u32,
}

impl SessionClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            start_ms: None,
            elapsed_ms: 0,
            phase: SessionPhase::Grace,
            grace_ends_ms: tuning.grace_period_ms,
            last_spawn_ms: 0,
            next_escalation_ms: tuning.escalation_interval_ms,
            batch_size: 1,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session time in ms; frozen once terminal
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Advance to the caller's clock reading.
    ///
    /// Readings earlier than the anchor clamp to zero and time never runs
    /// backwards. No-op once terminal.
    pub fn advance(&mut self, now_ms: u64, tuning: &Tuning) -> ClockUpdate {
        let mut update = ClockUpdate::default();
        if self.is_terminal() {
            return update;
        }

        let start = *self.start_ms.get_or_insert(now_ms);
        self.elapsed_ms = self.elapsed_ms.max(now_ms.saturating_sub(start));

        if self.phase == SessionPhase::Grace && self.elapsed_ms >= self.grace_ends_ms {
            self.phase = SessionPhase::Active;
            update.grace_ended = true;
        }

        if self.phase == SessionPhase::Active {
            if self.elapsed_ms - self.last_spawn_ms >= tuning.spawn_interval_ms {
                update.spawn_batch = self.batch_size;
                self.last_spawn_ms = self.elapsed_ms;
            }

            // Catch up when the caller's clock jumps several intervals at once
            while self.elapsed_ms >= self.next_escalation_ms {
                self.batch_size += 1;
                self.next_escalation_ms += tuning.escalation_interval_ms;
                update.escalated_to = Some(self.batch_size);
            }
        }

        update
    }

    /// Enter the terminal phase; time freezes at the current reading
    pub fn mark_terminal(&mut self) {
        self.phase = SessionPhase::Terminal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grace_then_active() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);

        let update = clock.advance(10_000, &tuning);
        assert_eq!(clock.phase(), SessionPhase::Grace);
        assert_eq!(clock.elapsed_ms(), 0);
        assert!(!update.grace_ended);

        let update = clock.advance(12_999, &tuning);
        assert_eq!(clock.phase(), SessionPhase::Grace);
        assert_eq!(update.spawn_batch, 0);

        let update = clock.advance(13_000, &tuning);
        assert!(update.grace_ended);
        assert_eq!(clock.phase(), SessionPhase::Active);
        // Last spawn marker sits at session start, so a batch is already due
        assert_eq!(update.spawn_batch, 1);
    }

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);
        clock.advance(0, &tuning);
        assert_eq!(clock.advance(3_000, &tuning).spawn_batch, 1);
        assert_eq!(clock.advance(5_000, &tuning).spawn_batch, 0);
        assert_eq!(clock.advance(5_499, &tuning).spawn_batch, 0);
        assert_eq!(clock.advance(5_500, &tuning).spawn_batch, 1);
        assert_eq!(clock.advance(7_999, &tuning).spawn_batch, 0);
        assert_eq!(clock.advance(8_000, &tuning).spawn_batch, 1);
    }

    #[test]
    fn test_escalation_ramp() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);
        clock.advance(0, &tuning);
        assert_eq!(clock.batch_size(), 1);

        let update = clock.advance(30_000, &tuning);
        assert_eq!(clock.batch_size(), 2);
        assert_eq!(update.escalated_to, Some(2));

        clock.advance(45_000, &tuning);
        assert_eq!(clock.batch_size(), 2);

        clock.advance(60_000, &tuning);
        assert_eq!(clock.batch_size(), 3);
    }

    #[test]
    fn test_escalation_catches_up_on_clock_jump() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);
        clock.advance(0, &tuning);
        let update = clock.advance(95_000, &tuning);
        assert_eq!(clock.batch_size(), 4);
        assert_eq!(update.escalated_to, Some(4));
        // The batch due on this advance uses the size from before the jump
        assert_eq!(update.spawn_batch, 1);
    }

    #[test]
    fn test_terminal_freezes_time() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);
        clock.advance(0, &tuning);
        clock.advance(4_000, &tuning);
        clock.mark_terminal();

        let update = clock.advance(90_000, &tuning);
        assert_eq!(update, ClockUpdate::default());
        assert_eq!(clock.elapsed_ms(), 4_000);
        assert_eq!(clock.batch_size(), 1);
        assert!(clock.is_terminal());
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let tuning = Tuning::default();
        let mut clock = SessionClock::new(&tuning);
        clock.advance(1_000, &tuning);
        clock.advance(2_000, &tuning);
        clock.advance(500, &tuning);
        assert_eq!(clock.elapsed_ms(), 1_000);
    }
}
