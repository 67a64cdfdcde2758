//! Tunable constants for one widget.

use crate::cell::Grid;
use crate::error::{ConfigError, Result};

/// Side length of the square drawing surface, in logical units.
pub const LOGICAL_SIZE: u32 = 220;
/// Side length of one cell, in logical units.
pub const CELL_SIZE: u32 = 10;
pub const BASE_INTERVAL_MS: u32 = 120;
pub const MIN_INTERVAL_MS: u32 = 60;
/// How much faster the tick gets per food eaten.
pub const SPEEDUP_MS: u32 = 4;
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";
/// Backing-store scale is capped so a 220-unit canvas never exceeds 440 pixels.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// The starting snake's head sits at this column; the body trails two cells left of it.
pub(crate) const START_HEAD_X: i32 = 5;
pub(crate) const START_LENGTH: i32 = 3;
const MIN_ROWS: i32 = 2;
/// Largest grid side accepted. Food placement allocates one flag per cell on dense boards.
pub const MAX_GRID_SIDE: i32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub logical_size: u32,
    pub cell_size: u32,
    pub base_interval_ms: u32,
    pub min_interval_ms: u32,
    pub speedup_ms: u32,
    pub high_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            logical_size: LOGICAL_SIZE,
            cell_size: CELL_SIZE,
            base_interval_ms: BASE_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            speedup_ms: SPEEDUP_MS,
            high_score_key: HIGH_SCORE_KEY.to_owned(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_logical_size(mut self, logical_size: u32) -> Self {
        self.logical_size = logical_size;
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    #[must_use]
    pub fn with_intervals(mut self, base_ms: u32, min_ms: u32, speedup_ms: u32) -> Self {
        self.base_interval_ms = base_ms;
        self.min_interval_ms = min_ms;
        self.speedup_ms = speedup_ms;
        self
    }

    #[must_use]
    pub fn with_high_score_key(mut self, key: impl Into<String>) -> Self {
        self.high_score_key = key.into();
        self
    }

    /// Square grid derived from the surface: `floor(logical_size / cell_size)` cells per side.
    /// Returns an empty grid when the cell size is zero.
    #[must_use]
    pub fn grid(&self) -> Grid {
        let side = self.logical_size.checked_div(self.cell_size).unwrap_or(0);
        let side = i32::try_from(side).unwrap_or(i32::MAX);
        Grid::new(side, side)
    }

    /// Check that a game can be built from this config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the cell size is zero, the grid cannot hold the
    /// starting snake or exceeds [`MAX_GRID_SIDE`], or the interval bounds are inverted.
    pub fn validate(&self) -> Result<Grid> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.base_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::IntervalRange {
                base_ms: self.base_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        let grid = self.grid();
        let min_cols = START_HEAD_X + 1;
        if grid.cols < min_cols || grid.rows < MIN_ROWS {
            return Err(ConfigError::GridTooSmall {
                cols: grid.cols,
                rows: grid.rows,
                min_cols,
                min_rows: MIN_ROWS,
            });
        }
        if grid.cols > MAX_GRID_SIDE || grid.rows > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                cols: grid.cols,
                rows: grid.rows,
                max_side: MAX_GRID_SIDE,
            });
        }
        Ok(grid)
    }
}

/// Clamp a device pixel ratio to `[1, MAX_PIXEL_RATIO]`. Non-finite ratios count as 1.
#[must_use]
pub fn clamp_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(1.0, MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
