//! Popup controller: panel visibility, input routing and the tick timer.
//!
//! The widget owns the only repeating timer. It is started the first time the
//! panel opens, cancelled on close, and rescheduled whenever the game resets
//! or speeds up. Closing never touches game state, so reopening resumes
//! mid-game.

use std::fmt;

use log::debug;
use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::game::{SnakeGame, StepOutcome};
use crate::input::Input;
use crate::storage::Storage;

/// Host repeating-timer facility, e.g. `setInterval` / `clearInterval`.
pub trait Timer {
    type Handle;

    /// Start calling the tick callback every `interval_ms`. `None` if the host refused.
    fn schedule_repeating(&mut self, interval_ms: u32) -> Option<Self::Handle>;

    fn cancel(&mut self, handle: Self::Handle);
}

pub struct Widget<S, T: Timer, R = XorShiftRng> {
    game: SnakeGame<S, R>,
    timer: T,
    handle: Option<T::Handle>,
    open: bool,
    started: bool,
}

impl<S: Storage, T: Timer, R: Rng> Widget<S, T, R> {
    /// Wrap a game. The panel starts closed and no timer runs yet.
    pub fn new(game: SnakeGame<S, R>, timer: T) -> Self {
        Self {
            game,
            timer,
            handle: None,
            open: false,
            started: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a tick timer is currently scheduled.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.handle.is_some()
    }

    pub fn toggle_open(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the panel. The first open resets the game.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        if !self.started {
            self.started = true;
            self.game.reset();
        }
        self.reschedule();
    }

    /// Hide the panel and stop ticking. Game state is kept.
    pub fn close(&mut self) {
        self.open = false;
        self.stop_timer();
    }

    /// Start a fresh session. Restarts the timer at the base interval if the panel is open.
    pub fn restart(&mut self) {
        self.game.reset();
        if self.open {
            self.reschedule();
        }
    }

    /// Route one input event. Returns true when the host should swallow the
    /// key's default action (page scroll).
    pub fn handle_input(&mut self, input: Input) -> bool {
        let captured = self.open && input.captures_scroll();
        match input {
            Input::Close => self.close(),
            Input::Restart => self.restart(),
            Input::TogglePause if self.open => self.game.toggle_pause(),
            Input::Up | Input::Down | Input::Left | Input::Right if self.open => {
                if let Some(dir) = input.direction() {
                    self.game.set_direction(dir);
                }
            }
            _ => {}
        }
        captured
    }

    /// Timer callback. Advances the game and follows any speed change.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.open {
            return StepOutcome::Idle;
        }
        let outcome = self.game.step();
        if outcome.speed_changed() {
            self.reschedule();
        }
        outcome
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.game.snapshot().overlay_visible()
    }

    #[must_use]
    pub fn game(&self) -> &SnakeGame<S, R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut SnakeGame<S, R> {
        &mut self.game
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    fn reschedule(&mut self) {
        self.stop_timer();
        let interval = self.game.interval_ms();
        self.handle = self.timer.schedule_repeating(interval);
        debug!("snake timer scheduled every {interval}ms");
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.timer.cancel(handle);
        }
    }
}

impl<S: Storage, T: Timer, R: Rng> fmt::Debug for Widget<S, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("open", &self.open)
            .field("started", &self.started)
            .field("ticking", &self.handle.is_some())
            .field("run_state", &self.game.run_state())
            .field("interval_ms", &self.game.interval_ms())
            .finish_non_exhaustive()
    }
}
