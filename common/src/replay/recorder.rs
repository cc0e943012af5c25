use crate::driver::Tick;
use crate::game::{GameSettings, Seed};
use super::messages::{direction_to_proto, ReplayMetadata, ReplayV1, TickRecord};

pub struct ReplayRecorder {
    engine_version: String,
    game_started_timestamp_ms: i64,
    settings: GameSettings,
    init_seed: Seed,
    ticks: Vec<TickRecord>,
}

impl ReplayRecorder {
    pub fn new(engine_version: String, settings: GameSettings, init_seed: Seed) -> Self {
        Self {
            engine_version,
            game_started_timestamp_ms: chrono::Utc::now().timestamp_millis(),
            settings,
            init_seed,
            ticks: Vec::new(),
        }
    }

    pub fn record_tick(&mut self, tick: &Tick) {
        self.ticks.push(TickRecord {
            index: self.ticks.len() as u64,
            seed: Some(tick.seed),
            direction: direction_to_proto(tick.direction),
        });
    }

    pub fn finalize(&mut self) -> ReplayV1 {
        ReplayV1 {
            metadata: Some(ReplayMetadata {
                engine_version: std::mem::take(&mut self.engine_version),
                game_started_timestamp_ms: self.game_started_timestamp_ms,
                init_seed: self.init_seed,
                width: self.settings.width as u32,
                height: self.settings.height as u32,
                initial_snake: self.settings.initial_snake as u32,
                score_step: self.settings.score_step,
                initial_direction: direction_to_proto(self.settings.direction),
            }),
            ticks: std::mem::take(&mut self.ticks),
        }
    }

    pub fn init_seed(&self) -> Seed {
        self.init_seed
    }

    pub fn ticks_count(&self) -> usize {
        self.ticks.len()
    }
}
