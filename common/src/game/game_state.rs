use std::collections::{BTreeSet, VecDeque};

use crate::config::Validate;
use crate::{log, log_debug};
use super::error::GameError;
use super::settings::GameSettings;
use super::types::{Direction, GameStatus, Grid, MoveResult, Seed};

#[derive(Clone, Debug)]
pub struct GameState {
    settings: GameSettings,
    direction: Direction,
    /// Tail at the front, head at the back.
    snake: VecDeque<Grid>,
    spaces: BTreeSet<Grid>,
    food: Option<Grid>,
    score: u32,
    status: GameStatus,
}

impl GameState {
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidConfig)?;

        Ok(Self {
            direction: settings.direction,
            settings,
            snake: VecDeque::new(),
            spaces: BTreeSet::new(),
            food: None,
            score: 0,
            status: GameStatus::New,
        })
    }

    pub fn init(&mut self, seed: Option<Seed>) -> Result<(), GameError> {
        let seed = seed.ok_or(GameError::MissingSeed)?;

        let snake_row = (self.settings.height / 2) as i32;
        self.snake = (0..self.settings.initial_snake as i32)
            .map(|x| Grid::new(x, snake_row))
            .collect();

        let width = self.settings.width as i32;
        let height = self.settings.height as i32;
        self.spaces = (0..height)
            .flat_map(|y| (0..width).map(move |x| Grid::new(x, y)))
            .filter(|grid| !self.snake.contains(grid))
            .collect();

        self.put_food(seed);
        self.status = GameStatus::Inited;

        log_debug!(
            "Game inited on {}x{} board, food at {:?}",
            self.settings.width,
            self.settings.height,
            self.food
        );
        Ok(())
    }

    /// Back to `New`; call `init` to play again.
    pub fn reset(&mut self) {
        self.direction = self.settings.direction;
        self.snake.clear();
        self.spaces.clear();
        self.food = None;
        self.score = 0;
        self.status = GameStatus::New;
    }

    pub fn pick_space(&self, seed: Seed) -> Option<Grid> {
        if self.spaces.is_empty() {
            return None;
        }
        let index = (seed % self.spaces.len() as u64) as usize;
        self.spaces.iter().nth(index).copied()
    }

    pub fn put_food(&mut self, seed: Seed) {
        self.food = self.pick_space(seed);
        if let Some(food) = self.food {
            self.spaces.remove(&food);
        }
    }

    /// Returns `Ok(None)` once the game is over.
    pub fn apply_move(
        &mut self,
        direction: Direction,
        seed: Option<Seed>,
    ) -> Result<Option<MoveResult>, GameError> {
        if self.status.is_terminal() {
            return Ok(None);
        }
        let seed = seed.ok_or(GameError::MissingSeed)?;

        self.status = GameStatus::Playing;
        self.set_direction(direction);

        let Some(target) = self.next_grid() else {
            self.status = GameStatus::Ended;
            return Ok(Some(MoveResult::Dead));
        };

        let result = self.check_result(target);
        match result {
            MoveResult::Dead => {
                self.status = GameStatus::Ended;
                log!("Snake died at ({}, {}), score {}", target.x, target.y, self.score);
            }
            MoveResult::Food => {
                self.score += self.settings.score_step;
                self.snake.push_back(target);
                self.spaces.remove(&target);
                self.put_food(seed);
                if self.food.is_none() {
                    self.status = GameStatus::Win;
                    log!("No space left, won with score {}", self.score);
                } else {
                    log_debug!("Ate food at ({}, {}), score {}", target.x, target.y, self.score);
                }
            }
            MoveResult::Empty => {
                self.spaces.remove(&target);
                self.snake.push_back(target);
                if let Some(tail) = self.snake.pop_front() {
                    self.spaces.insert(tail);
                }
            }
        }

        Ok(Some(result))
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction.accepts(direction) {
            self.direction = direction;
        }
    }

    pub fn next_grid(&self) -> Option<Grid> {
        self.head().map(|head| head.offset(self.direction))
    }

    pub fn check_result(&self, target: Grid) -> MoveResult {
        if self.food == Some(target) {
            MoveResult::Food
        } else if self.spaces.contains(&target) && self.is_inside(target) {
            MoveResult::Empty
        } else {
            MoveResult::Dead
        }
    }

    pub fn is_inside(&self, target: Grid) -> bool {
        target.x >= 0
            && target.y >= 0
            && (target.x as usize) < self.settings.width
            && (target.y as usize) < self.settings.height
    }

    pub fn head(&self) -> Option<Grid> {
        self.snake.back().copied()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn width(&self) -> usize {
        self.settings.width
    }

    pub fn height(&self) -> usize {
        self.settings.height
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn snake(&self) -> &VecDeque<Grid> {
        &self.snake
    }

    pub fn spaces(&self) -> &BTreeSet<Grid> {
        &self.spaces
    }

    pub fn food(&self) -> Option<Grid> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[cfg(test)]
    fn force_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    #[cfg(test)]
    fn set_spaces(&mut self, spaces: impl IntoIterator<Item = Grid>) {
        self.spaces = spaces.into_iter().collect();
    }

    #[cfg(test)]
    fn set_snake(&mut self, snake: impl IntoIterator<Item = Grid>) {
        self.snake = snake.into_iter().collect();
    }

    /// Moves the food to `food`, handing the old food cell back to the free spaces.
    #[cfg(test)]
    fn relocate_food(&mut self, food: Grid) {
        if let Some(old) = self.food.take() {
            self.spaces.insert(old);
        }
        self.spaces.remove(&food);
        self.food = Some(food);
    }
}
