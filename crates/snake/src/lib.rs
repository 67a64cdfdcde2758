//! Snake widget engine.
//!
//! [`SnakeGame`] owns one session and advances it with explicit `step()` calls.
//! [`Widget`] adds the popup's open/close behaviour and drives a host [`Timer`].
//! On `wasm32` the [`web`] module mounts everything onto the page.

pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod snapshot;
pub mod storage;
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod scenario_test;

pub use cell::{CellKind, Direction, Grid, Position};
pub use config::GameConfig;
pub use error::{ConfigError, StorageError};
pub use game::{RunState, SnakeGame, StepOutcome};
pub use input::Input;
pub use snapshot::Snapshot;
pub use storage::{HighScoreStore, MemoryStorage, Storage};
pub use widget::{Timer, Widget};
