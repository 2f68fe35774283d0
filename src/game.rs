use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::{GameSettings, GridSize};
use crate::food::{Food, Placement};
use crate::input::Command;
use crate::snake::{Heading, Position, Snake, Velocity};

/// Coarse game state machine.
///
/// `NotStarted -> Running <-> Paused`, and `Running -> Over`. `Over` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    Over,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable state of one game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub velocity: Velocity,
    pub food: Food,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub phase: Phase,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
}

impl GameState {
    /// Returns the start-of-game state described by `settings`.
    #[must_use]
    pub fn initial(settings: &GameSettings) -> Self {
        Self {
            snake: Snake::new(settings.initial_snake),
            velocity: Velocity::STILL,
            food: Food::new(settings.initial_food),
            score: 0,
            tick_interval_ms: settings.initial_tick_interval_ms,
            phase: Phase::NotStarted,
            tick_count: 0,
            death_reason: None,
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub velocity: Velocity,
    pub food: Position,
    pub score: u32,
    pub phase: Phase,
    pub tick_interval_ms: u64,
    pub grid: GridSize,
    pub death_reason: Option<DeathReason>,
}

/// Simulation engine that owns one [`GameState`] and advances it tick by tick.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    settings: GameSettings,
    /// Velocity used by the most recent executed tick.
    last_step: Velocity,
    rng: StdRng,
}

impl GameLoop {
    /// Creates a game seeded from OS entropy.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    /// Resumes from an arbitrary state, e.g. a scripted scenario.
    #[must_use]
    pub fn from_state(settings: GameSettings, state: GameState, seed: u64) -> Self {
        Self {
            last_step: state.velocity,
            state,
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(settings: GameSettings, rng: StdRng) -> Self {
        Self {
            state: GameState::initial(&settings),
            settings,
            last_step: Velocity::STILL,
            rng,
        }
    }

    /// Leaves `NotStarted`. Later calls are ignored.
    pub fn start(&mut self) {
        if self.state.phase == Phase::NotStarted {
            self.state.phase = Phase::Running;
            debug!("game started");
        }
    }

    /// Turns the snake towards `heading` if the turn is legal.
    ///
    /// Only applies while running, and only for turns perpendicular to the
    /// pending velocity. A turn straight back against the last executed step
    /// is also refused, so two quick turns between ticks cannot fold the
    /// snake into its own neck.
    pub fn set_direction(&mut self, heading: Heading) {
        if self.state.phase != Phase::Running {
            return;
        }

        let reverses_last_step = self.last_step.heading() == Some(heading.opposite());
        if !self.state.velocity.permits(heading) || reverses_last_step {
            trace!(?heading, velocity = ?self.state.velocity, "turn rejected");
            return;
        }

        self.state.velocity = heading.velocity();
    }

    /// Flips between `Running` and `Paused`.
    pub fn toggle_pause(&mut self) {
        let next = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::NotStarted | Phase::Over => return,
        };

        self.state.phase = next;
        debug!(phase = ?next, "pause toggled");
    }

    /// Routes an input command to the matching operation.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Direction(heading) => self.set_direction(heading),
            Command::TogglePause => self.toggle_pause(),
            Command::Start => self.start(),
            Command::Quit => {}
        }
    }

    /// Advances the simulation by one step. Does nothing unless running.
    pub fn tick(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }

        let placement = self.placement();
        let state = &mut self.state;
        state.tick_count += 1;

        let velocity = state.velocity;
        let next_head = state.snake.head().stepped(velocity);
        let eats = next_head == state.food.position;

        state.snake.advance(velocity, eats);
        self.last_step = velocity;

        if eats {
            state.food = Food::spawn(
                &mut self.rng,
                self.settings.grid,
                &state.snake,
                placement,
            );
            state.score += self.settings.food_reward;
            state.tick_interval_ms = state
                .tick_interval_ms
                .saturating_sub(self.settings.speed_step_ms);
            debug!(
                score = state.score,
                interval_ms = state.tick_interval_ms,
                food = %state.food.position,
                "food eaten"
            );
        }

        let death = if !next_head.is_within_bounds(self.settings.grid) {
            Some(DeathReason::WallCollision)
        } else if state.snake.head_overlaps_body() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = death {
            state.phase = Phase::Over;
            state.death_reason = Some(reason);
            info!(
                score = state.score,
                length = state.snake.len(),
                ticks = state.tick_count,
                ?reason,
                "game over"
            );
        }
    }

    fn placement(&self) -> Placement {
        if self.settings.food_avoids_snake {
            Placement::FreeCell
        } else {
            Placement::Anywhere
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.state.velocity
    }

    /// Current delay between ticks as stored in the state (may reach zero).
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.tick_interval_ms)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.state.snake,
            velocity: self.state.velocity,
            food: self.state.food.position,
            score: self.state.score,
            phase: self.state.phase,
            tick_interval_ms: self.state.tick_interval_ms,
            grid: self.settings.grid,
            death_reason: self.state.death_reason,
        }
    }
}
