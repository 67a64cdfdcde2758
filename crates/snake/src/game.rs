//! The Snake engine: owns all session state and advances one cell per `step()`.
//!
//! The engine never schedules anything itself. The host calls [`SnakeGame::step`]
//! from its own repeating timer and reschedules that timer whenever a step
//! reports a speed change.

use std::collections::VecDeque;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cell::{Direction, Grid, Position};
use crate::config::{GameConfig, START_HEAD_X, START_LENGTH};
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::storage::{HighScoreStore, Storage};

/// Coarse lifecycle phase. `Crashed` is only left through [`SnakeGame::reset`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RunState {
    Paused,
    Running,
    Crashed,
}

/// What a single call to [`SnakeGame::step`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// Not running; nothing changed.
    Idle,
    Moved,
    Ate { speed_changed: bool },
    Crashed,
}

impl StepOutcome {
    /// True when the host must reschedule its tick timer.
    #[must_use]
    pub const fn speed_changed(self) -> bool {
        matches!(self, Self::Ate { speed_changed: true })
    }
}

#[derive(Debug)]
pub struct SnakeGame<S, R = XorShiftRng> {
    config: GameConfig,
    grid: Grid,
    /// Head first.
    snake: VecDeque<Position>,
    direction: Direction,
    next_direction: Direction,
    food: Position,
    score: u32,
    high_score: u32,
    interval_ms: u32,
    state: RunState,
    store: HighScoreStore<S>,
    rng: R,
}

impl<S: Storage> SnakeGame<S, XorShiftRng> {
    /// Build a game with a deterministic RNG.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] if `config` does not validate.
    pub fn with_seed(config: GameConfig, storage: S, seed: u64) -> Result<Self> {
        Self::new(config, storage, XorShiftRng::seed_from_u64(seed))
    }
}

impl<S: Storage, R: Rng> SnakeGame<S, R> {
    /// Build a game and reset it into its initial paused state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] if `config` does not validate.
    pub fn new(config: GameConfig, storage: S, rng: R) -> Result<Self> {
        let grid = config.validate()?;
        let store = HighScoreStore::new(storage, config.high_score_key.clone());
        let mut game = Self {
            interval_ms: config.base_interval_ms,
            config,
            grid,
            snake: VecDeque::with_capacity(grid.cell_count()),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Position::default(),
            score: 0,
            high_score: 0,
            state: RunState::Paused,
            store,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Discard the session and start over, paused, with a fresh snake and food.
    pub fn reset(&mut self) {
        let row = self.grid.rows / 2 - 1;
        self.snake.clear();
        self.snake
            .extend((0..START_LENGTH).map(|i| Position::new(START_HEAD_X - i, row)));
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.interval_ms = self.config.base_interval_ms;
        self.state = RunState::Paused;
        self.spawn_food();
        self.high_score = self.store.load();
        debug!(
            "snake reset: {}x{} grid, high score {}",
            self.grid.cols, self.grid.rows, self.high_score
        );
    }

    /// Move the food to a uniformly random cell not covered by the snake.
    ///
    /// Rejection-samples while the snake covers less than half the grid, then
    /// switches to picking from the enumerated free cells. With no free cell
    /// left the food stays put.
    pub fn spawn_food(&mut self) -> Position {
        let total = self.grid.cell_count();
        let free = total.saturating_sub(self.snake.len());
        if free == 0 {
            return self.food;
        }
        self.food = if self.snake.len() * 2 >= total {
            self.pick_free_cell(free)
        } else {
            self.sample_free_cell()
        };
        self.food
    }

    fn sample_free_cell(&mut self) -> Position {
        loop {
            let candidate = Position::new(
                self.rng.gen_range(0..self.grid.cols),
                self.rng.gen_range(0..self.grid.rows),
            );
            if !self.occupies(candidate) {
                return candidate;
            }
        }
    }

    fn pick_free_cell(&mut self, free: usize) -> Position {
        let mut taken = vec![false; self.grid.cell_count()];
        for &pos in &self.snake {
            taken[self.grid.index(pos)] = true;
        }
        let nth = self.rng.gen_range(0..free);
        let grid = self.grid;
        grid.positions()
            .filter(|&pos| !taken[grid.index(pos)])
            .nth(nth)
            .unwrap_or(self.food)
    }

    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// Queue a turn for the next tick.
    ///
    /// A turn straight back onto the current heading is rejected. Any
    /// directional input starts a paused game.
    pub fn set_direction(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.next_direction = dir;
        }
        if self.state == RunState::Paused {
            self.state = RunState::Running;
        }
    }

    /// Flip between Paused and Running. No-op once crashed.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
            RunState::Crashed => RunState::Crashed,
        };
    }

    /// Advance one tick. Does nothing unless running.
    pub fn step(&mut self) -> StepOutcome {
        if self.state != RunState::Running {
            return StepOutcome::Idle;
        }
        self.direction = self.next_direction;
        let Some(&head) = self.snake.front() else {
            return StepOutcome::Idle;
        };
        let new_head = self.grid.step(head, self.direction);

        if self.occupies(new_head) {
            self.state = RunState::Crashed;
            debug!("snake crashed at {new_head} with score {}", self.score);
            return StepOutcome::Crashed;
        }

        self.snake.push_front(new_head);
        if new_head != self.food {
            self.snake.pop_back();
            return StepOutcome::Moved;
        }

        self.score += 1;
        let before = self.interval_ms;
        self.interval_ms = before
            .saturating_sub(self.config.speedup_ms)
            .max(self.config.min_interval_ms);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
            info!("new snake high score: {}", self.high_score);
        }
        self.spawn_food();
        StepOutcome::Ate {
            speed_changed: self.interval_ms != before,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.front().copied()
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn buffered_direction(&self) -> Direction {
        self.next_direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Tick interval the host timer should run at.
    #[must_use]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Replace the snake, heading and food. Test setup only.
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, body: &[Position], direction: Direction, food: Position) {
        self.snake = body.iter().copied().collect();
        self.direction = direction;
        self.next_direction = direction;
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, food: Position) {
        self.food = food;
    }
}
