//! Regression test: a full scripted session through the public API.

#[cfg(test)]
mod tests {
    use crate::cell::{Direction, Position};
    use crate::config::GameConfig;
    use crate::game::{RunState, SnakeGame, StepOutcome};
    use crate::storage::MemoryStorage;

    /// Helper: print the board for debugging.
    fn dump(game: &SnakeGame<MemoryStorage>) {
        eprintln!("{}", game.snapshot());
    }

    /// Drive the snake along a scripted route, feeding it on every other
    /// cell, until it runs into itself. Score, high score, speed and the
    /// stored value must agree at every point.
    #[test]
    fn scripted_session_until_crash() {
        let storage = MemoryStorage::new().with_entry("snakeHighScore", "2");
        let mut game = SnakeGame::with_seed(GameConfig::default(), storage, 2024).unwrap();
        assert_eq!(game.high_score(), 2);

        // Tight clockwise box: right 4, down 2, left 2, then up into the first leg.
        let route: Vec<Direction> = std::iter::repeat(Direction::Right)
            .take(4)
            .chain(std::iter::repeat(Direction::Down).take(2))
            .chain(std::iter::repeat(Direction::Left).take(2))
            .chain(std::iter::repeat(Direction::Up).take(2))
            .collect();

        let mut eaten = 0;
        let mut crashed_at = None;
        for (tick, dir) in route.iter().enumerate() {
            game.set_direction(*dir);
            let head = game.head().unwrap();
            let next = game.grid().step(head, *dir);
            if tick % 2 == 0 {
                game.place_food(next);
            } else if game.food() == next {
                game.place_food(Position::new(20, 20));
            }

            let len_before = game.snake().len();
            match game.step() {
                StepOutcome::Ate { .. } => {
                    eaten += 1;
                    assert_eq!(game.snake().len(), len_before + 1);
                }
                StepOutcome::Moved => assert_eq!(game.snake().len(), len_before),
                StepOutcome::Crashed => {
                    crashed_at = Some(tick);
                    break;
                }
                StepOutcome::Idle => panic!("running game returned Idle at tick {tick}"),
            }
            assert_eq!(game.score(), eaten);
            assert!(game.high_score() >= game.score());
        }
        dump(&game);

        // The second upward move lands on (7, 10), still held by the grown tail.
        assert_eq!(crashed_at, Some(9));
        assert_eq!(game.run_state(), RunState::Crashed);
        assert_eq!(game.head(), Some(Position::new(7, 11)));
        assert_eq!(game.score(), 5);
        assert_eq!(game.high_score(), 5);
        assert_eq!(game.storage().raw("snakeHighScore"), Some("5"));
        assert_eq!(game.interval_ms(), 120 - 5 * 4);

        // Reset is the only way out of a crash; the next session plays normally.
        game.reset();
        assert_eq!(game.high_score(), 5);
        assert_eq!(game.score(), 0);
        assert_eq!(game.run_state(), RunState::Paused);
        assert_eq!(game.interval_ms(), 120);
        let body: Vec<Position> = game.snake().iter().copied().collect();
        assert_eq!(body, vec![Position::new(5, 10), Position::new(4, 10), Position::new(3, 10)]);

        game.place_food(Position::new(20, 20));
        game.set_direction(Direction::Right);
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.step(), StepOutcome::Moved);
        assert_eq!(game.head(), Some(Position::new(6, 10)));
    }
}
