use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::Direction;

/// Coordinates are `i32`; larger boards are rejected.
pub const MAX_BOARD_SIDE: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub width: usize,
    pub height: usize,
    pub initial_snake: usize,
    pub score_step: u32,
    pub direction: Direction,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            initial_snake: 5,
            score_step: 5,
            direction: Direction::Right,
        }
    }
}

impl GameSettings {
    pub fn new(width: usize, height: usize, initial_snake: usize) -> Self {
        Self {
            width,
            height,
            initial_snake,
            ..Default::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.width < self.initial_snake {
            return Err(format!(
                "width ({}) should not be smaller than initial snake ({})",
                self.width, self.initial_snake
            ));
        }
        if self.height < 1 {
            return Err("height should not be smaller than 1".to_string());
        }
        if self.initial_snake < 1 {
            return Err("initial snake should not be smaller than 1".to_string());
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(format!("width and height must not exceed {}", MAX_BOARD_SIDE));
        }
        // The snake is laid out with its head on the right.
        if self.direction == Direction::Left && self.initial_snake > 1 {
            return Err("direction should not point into the initial snake".to_string());
        }
        Ok(())
    }
}
