use std::time::{Duration, Instant};

use tracing::debug;

use crate::game::{GameLoop, Phase};

/// Drives [`GameLoop::tick`] at the game's current interval.
///
/// The interval is re-read after every tick so a speed-up applies to the very
/// next wait. Waits never drop below `min_interval`.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    last_tick: Instant,
    min_interval: Duration,
}

impl TickScheduler {
    #[must_use]
    pub fn new(now: Instant, min_interval: Duration) -> Self {
        Self {
            last_tick: now,
            min_interval,
        }
    }

    /// Interval actually waited between ticks.
    #[must_use]
    pub fn effective_interval(&self, game: &GameLoop) -> Duration {
        game.tick_interval().max(self.min_interval)
    }

    /// Instant of the next tick, or `None` when nothing will be scheduled.
    #[must_use]
    pub fn next_due(&self, game: &GameLoop) -> Option<Instant> {
        match game.phase() {
            Phase::Running | Phase::Paused => Some(self.last_tick + self.effective_interval(game)),
            Phase::NotStarted | Phase::Over => None,
        }
    }

    /// Fires at most one tick if it is due at `now`. Returns whether it fired.
    ///
    /// Before the game starts the schedule is held at `now`, so the first
    /// tick lands one full interval after `start`. Once the game is over the
    /// scheduler stops requeuing.
    pub fn poll(&mut self, game: &mut GameLoop, now: Instant) -> bool {
        let Some(due) = self.next_due(game) else {
            if game.phase() == Phase::NotStarted {
                self.last_tick = now;
            }
            return false;
        };

        if now < due {
            return false;
        }

        game.tick();
        self.last_tick = now;
        true
    }
}

/// One-shot deferred restart after game over.
#[derive(Debug, Clone)]
pub struct ResetTimer {
    delay: Duration,
    armed_at: Option<Instant>,
}

impl ResetTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed_at: None,
        }
    }

    /// Starts the countdown. Re-arming an armed timer keeps the first start.
    pub fn arm(&mut self, now: Instant) {
        if self.armed_at.is_none() {
            debug!(delay_ms = self.delay.as_millis(), "reset timer armed");
            self.armed_at = Some(now);
        }
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.armed_at
            .is_some_and(|armed_at| now.saturating_duration_since(armed_at) >= self.delay)
    }

    /// Time left before the reset, or `None` when not armed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.armed_at
            .map(|armed_at| self.delay.saturating_sub(now.saturating_duration_since(armed_at)))
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
    }
}
