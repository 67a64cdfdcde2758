//! Read-only view of a game for renderers.

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;

use crate::cell::{CellKind, Grid, Position};
use crate::game::{RunState, SnakeGame};
use crate::storage::Storage;

/// Axis-aligned rectangle in logical surface units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Borrowed projection of the game at one instant. Holds no engine internals
/// beyond what a renderer needs to draw a frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub cell_size: u32,
    pub logical_size: u32,
    pub snake: &'a VecDeque<Position>,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub run_state: RunState,
}

impl<'a> Snapshot<'a> {
    pub fn new<S: Storage, R: Rng>(game: &'a SnakeGame<S, R>) -> Self {
        Self {
            grid: game.grid(),
            cell_size: game.config().cell_size,
            logical_size: game.config().logical_size,
            snake: game.snake(),
            food: game.food(),
            score: game.score(),
            high_score: game.high_score(),
            run_state: game.run_state(),
        }
    }

    #[must_use]
    pub fn cell_kind(&self, pos: Position) -> CellKind {
        if self.snake.front() == Some(&pos) {
            CellKind::Head
        } else if self.snake.contains(&pos) {
            CellKind::Body
        } else if self.food == pos {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// Occupied cells in paint order: food first, then the snake from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellKind)> + 'a {
        let snake: &'a VecDeque<Position> = self.snake;
        let food = std::iter::once((self.food, CellKind::Food));
        let body = snake.iter().enumerate().map(|(i, &pos)| {
            let kind = if i == 0 { CellKind::Head } else { CellKind::Body };
            (pos, kind)
        });
        food.chain(body)
    }

    /// Where `kind` at `pos` is painted. Snake segments are inset by one unit
    /// so adjacent segments stay visually separate.
    #[must_use]
    pub fn cell_rect(&self, pos: Position, kind: CellKind) -> Rect {
        let size = f64::from(self.cell_size);
        let inset = match kind {
            CellKind::Head | CellKind::Body if self.cell_size > 2 => 1.0,
            _ => 0.0,
        };
        Rect {
            x: f64::from(pos.x) * size + inset,
            y: f64::from(pos.y) * size + inset,
            width: size - 2.0 * inset,
            height: size - 2.0 * inset,
        }
    }

    /// The start/paused overlay shows whenever the game is not running.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.run_state != RunState::Running
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        self.score.to_string()
    }

    #[must_use]
    pub fn high_score_label(&self) -> String {
        format!("HS: {}", self.high_score)
    }
}

/// Text dump, one row per line, using [`CellKind::glyph`].
impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.rows {
            for x in 0..self.grid.cols {
                write!(f, "{}", self.cell_kind(Position::new(x, y)).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Direction;
    use crate::config::GameConfig;
    use crate::storage::MemoryStorage;

    fn game() -> SnakeGame<MemoryStorage> {
        let storage = MemoryStorage::new().with_entry("snakeHighScore", "8");
        let mut game = SnakeGame::with_seed(GameConfig::default(), storage, 21).unwrap();
        game.arrange(
            &[Position::new(5, 10), Position::new(4, 10), Position::new(3, 10)],
            Direction::Right,
            Position::new(0, 0),
        );
        game
    }

    #[test]
    fn classifies_cells() {
        let game = game();
        let snap = game.snapshot();
        assert_eq!(snap.cell_kind(Position::new(5, 10)), CellKind::Head);
        assert_eq!(snap.cell_kind(Position::new(3, 10)), CellKind::Body);
        assert_eq!(snap.cell_kind(Position::new(0, 0)), CellKind::Food);
        assert_eq!(snap.cell_kind(Position::new(1, 1)), CellKind::Empty);
    }

    #[test]
    fn paint_order_is_food_then_head_first() {
        let game = game();
        let cells: Vec<(Position, CellKind)> = game.snapshot().cells().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), CellKind::Food),
                (Position::new(5, 10), CellKind::Head),
                (Position::new(4, 10), CellKind::Body),
                (Position::new(3, 10), CellKind::Body),
            ]
        );
    }

    #[test]
    fn rects_in_logical_units() {
        let game = game();
        let snap = game.snapshot();
        let food = snap.cell_rect(Position::new(2, 3), CellKind::Food);
        assert_eq!(food, Rect { x: 20.0, y: 30.0, width: 10.0, height: 10.0 });
        let head = snap.cell_rect(Position::new(5, 10), CellKind::Head);
        assert_eq!(head, Rect { x: 51.0, y: 101.0, width: 8.0, height: 8.0 });
        let last = snap.cell_rect(Position::new(21, 21), CellKind::Food);
        assert!((last.x + last.width - f64::from(snap.logical_size)).abs() < f64::EPSILON);
    }

    #[test]
    fn labels_and_overlay() {
        let mut game = game();
        let snap = game.snapshot();
        assert_eq!(snap.score_label(), "0");
        assert_eq!(snap.high_score_label(), "HS: 8");
        assert!(snap.overlay_visible());
        game.toggle_pause();
        assert!(!game.snapshot().overlay_visible());
    }

    #[test]
    fn text_dump_has_one_line_per_row() {
        let game = game();
        let text = game.snapshot().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 22);
        assert!(lines.iter().all(|l| l.chars().count() == 22));
        assert!(lines[0].starts_with('*'));
        assert_eq!(&lines[10][3..6], "oo@");
    }
}
