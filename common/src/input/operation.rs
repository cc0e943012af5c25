use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Up,
    Down,
    Left,
    Right,
    Restart,
}

impl Operation {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Operation::Up => Some(Direction::Up),
            Operation::Down => Some(Direction::Down),
            Operation::Left => Some(Direction::Left),
            Operation::Right => Some(Direction::Right),
            Operation::Restart => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(direction) => direction.fmt(f),
            None => f.write_str("restart"),
        }
    }
}
