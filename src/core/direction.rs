use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::GameError;

/// A direction to slide the tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether this direction slides along rows (as opposed to columns).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// Case-insensitive. Anything other than the four names is rejected.
impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::invalid_direction(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!(" right ".parse::<Direction>().unwrap(), Direction::Right);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "diagonal".parse::<Direction>().unwrap_err();
        assert!(matches!(err, GameError::InvalidDirection { ref input } if input == "diagonal"));
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for direction in Direction::ALL {
            assert_eq!(direction.to_string().parse::<Direction>().unwrap(), direction);
        }
    }
}
