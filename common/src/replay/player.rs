use crate::game::{GameSettings, GameState, Seed};
use super::file_io::ReplayError;
use super::messages::{direction_from_proto, ReplayMetadata, ReplayV1, TickRecord};

/// Re-runs a recorded game. Food placement only depends on the recorded
/// seeds, so stepping a fresh state through the ticks reproduces the game.
pub struct ReplayPlayer {
    metadata: ReplayMetadata,
    settings: GameSettings,
    ticks: Vec<TickRecord>,
    current_tick_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: ReplayV1) -> Result<Self, ReplayError> {
        let metadata = replay.metadata.ok_or(ReplayError::MissingMetadata)?;
        let direction = direction_from_proto(metadata.initial_direction)
            .ok_or(ReplayError::InvalidDirection(metadata.initial_direction))?;

        let settings = GameSettings {
            width: metadata.width as usize,
            height: metadata.height as usize,
            initial_snake: metadata.initial_snake as usize,
            score_step: metadata.score_step,
            direction,
        };

        Ok(Self {
            metadata,
            settings,
            ticks: replay.ticks,
            current_tick_index: 0,
        })
    }

    pub fn engine_version(&self) -> &str {
        &self.metadata.engine_version
    }

    pub fn seed(&self) -> Seed {
        self.metadata.init_seed
    }

    pub fn game_started_timestamp_ms(&self) -> i64 {
        self.metadata.game_started_timestamp_ms
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn total_ticks(&self) -> usize {
        self.ticks.len()
    }

    pub fn current_tick_index(&self) -> usize {
        self.current_tick_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick_index >= self.ticks.len()
    }

    pub fn reset(&mut self) {
        self.current_tick_index = 0;
    }

    /// A fresh game initialised with the recorded seed.
    pub fn new_game(&self) -> Result<GameState, ReplayError> {
        let mut game = GameState::new(self.settings.clone())?;
        game.init(Some(self.seed()))?;
        Ok(game)
    }

    /// Applies the next recorded tick; `Ok(false)` once every tick was applied.
    pub fn step(&mut self, game: &mut GameState) -> Result<bool, ReplayError> {
        let Some(record) = self.ticks.get(self.current_tick_index) else {
            return Ok(false);
        };
        let direction = direction_from_proto(record.direction)
            .ok_or(ReplayError::InvalidDirection(record.direction))?;

        game.apply_move(direction, record.seed)?;
        self.current_tick_index += 1;
        Ok(true)
    }

    pub fn play_to_end(&mut self) -> Result<GameState, ReplayError> {
        self.reset();
        let mut game = self.new_game()?;
        while self.step(&mut game)? {}
        Ok(game)
    }
}
