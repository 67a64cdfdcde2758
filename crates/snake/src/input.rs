//! Discrete host input events.

use crate::cell::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    TogglePause,
    Restart,
    Close,
}

impl Input {
    /// Map a browser `KeyboardEvent.key` value. Unknown keys map to `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            " " => Some(Self::TogglePause),
            "Escape" => Some(Self::Close),
            _ => None,
        }
    }

    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::TogglePause | Self::Restart | Self::Close => None,
        }
    }

    /// Keys that would scroll the page and must be swallowed while the panel is open.
    #[must_use]
    pub const fn captures_scroll(self) -> bool {
        matches!(
            self,
            Self::Up | Self::Down | Self::Left | Self::Right | Self::TogglePause
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Input::from_key("ArrowUp").and_then(Input::direction), Some(Direction::Up));
        assert_eq!(Input::from_key("ArrowDown").and_then(Input::direction), Some(Direction::Down));
        assert_eq!(Input::from_key("ArrowLeft").and_then(Input::direction), Some(Direction::Left));
        assert_eq!(Input::from_key("ArrowRight").and_then(Input::direction), Some(Direction::Right));
    }

    #[test]
    fn space_and_escape() {
        assert_eq!(Input::from_key(" "), Some(Input::TogglePause));
        assert_eq!(Input::from_key("Escape"), Some(Input::Close));
        assert!(Input::TogglePause.captures_scroll());
        assert!(!Input::Close.captures_scroll());
        assert!(!Input::Restart.captures_scroll());
    }

    proptest! {
        #[test]
        fn prop_unknown_keys_are_ignored(key in "[a-zA-Z0-9]{2,12}") {
            prop_assume!(!key.starts_with("Arrow") && key != "Escape");
            prop_assert_eq!(Input::from_key(&key), None);
        }
    }
}
