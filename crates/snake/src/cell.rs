//! Grid coordinates, directions and the toroidal grid shape.

use std::fmt;

/// A cell on the grid. `y` grows downward, matching canvas coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector for one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// What a renderer should draw in a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

impl CellKind {
    /// Single-character glyph used by the text dump.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Head => '@',
            Self::Body => 'o',
            Self::Food => '*',
        }
    }
}

/// Toroidal grid shape. Stepping off one edge re-enters from the opposite edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    #[must_use]
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.cols.unsigned_abs() as usize).saturating_mul(self.rows.unsigned_abs() as usize)
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.cols).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    /// Wrap a possibly out-of-range position back onto the grid.
    #[must_use]
    pub const fn wrap(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.cols),
            y: pos.y.rem_euclid(self.rows),
        }
    }

    /// The neighbouring cell one step in `dir`, wrapped.
    #[must_use]
    pub const fn step(&self, from: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        self.wrap(Position::new(from.x + dx, from.y + dy))
    }

    /// Row-major iterator over every cell.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |y| (0..cols).map(move |x| Position::new(x, y)))
    }

    /// Row-major index of an in-bounds position.
    #[must_use]
    pub const fn index(&self, pos: Position) -> usize {
        (pos.y * self.cols + pos.x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    #[test]
    fn deltas_are_unit_vectors() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{dir} is not a unit step");
        }
    }

    #[test]
    fn opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn wrap_each_edge() {
        let grid = Grid::new(22, 22);
        assert_eq!(grid.step(Position::new(21, 4), Direction::Right), Position::new(0, 4));
        assert_eq!(grid.step(Position::new(0, 4), Direction::Left), Position::new(21, 4));
        assert_eq!(grid.step(Position::new(7, 0), Direction::Up), Position::new(7, 21));
        assert_eq!(grid.step(Position::new(7, 21), Direction::Down), Position::new(7, 0));
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::new(3, 2);
        let all: Vec<Position> = grid.positions().collect();
        assert_eq!(all.len(), grid.cell_count());
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[2], Position::new(2, 0));
        assert_eq!(all[3], Position::new(0, 1));
        for (i, pos) in all.iter().enumerate() {
            assert_eq!(grid.index(*pos), i);
        }
    }

    #[test]
    fn cell_count_does_not_overflow() {
        assert_eq!(Grid::new(22, 22).cell_count(), 484);
        // Past i32::MAX, which the old `i32` product overflowed on.
        assert_eq!(Grid::new(50_000, 50_000).cell_count(), 2_500_000_000);
        assert_eq!(Grid::new(0, 5).cell_count(), 0);
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Position::new(5, 10)), "(5, 10)");
        assert_eq!(format!("{}", Direction::Left), "Left");
        assert_eq!(CellKind::Head.glyph(), '@');
    }

    proptest! {
        #[test]
        fn prop_step_stays_on_grid(
            cols in 1i32..64,
            rows in 1i32..64,
            x in 0i32..64,
            y in 0i32..64,
            dir in arb_direction(),
        ) {
            let grid = Grid::new(cols, rows);
            let from = grid.wrap(Position::new(x, y));
            let to = grid.step(from, dir);
            prop_assert!(grid.in_bounds(to));
        }

        #[test]
        fn prop_step_then_opposite_returns(
            x in 0i32..22,
            y in 0i32..22,
            dir in arb_direction(),
        ) {
            let grid = Grid::new(22, 22);
            let from = Position::new(x, y);
            prop_assert_eq!(grid.step(grid.step(from, dir), dir.opposite()), from);
        }
    }
}
