use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::driver::{Driver, Tick};
use crate::game::{GameError, GameState, GameStatus, Grid, MoveResult, Seed};
use crate::input::Operation;
use crate::replay::{ReplayRecorder, ReplayV1};
use crate::version::VERSION;
use crate::{log, log_debug, log_error};

/// Read-only consumer of the game state.
pub trait View: Send {
    fn render(&mut self, game: &GameState);
}

#[derive(Clone, PartialEq)]
struct RenderSnapshot {
    snake: VecDeque<Grid>,
    food: Option<Grid>,
    status: GameStatus,
}

impl RenderSnapshot {
    fn of(game: &GameState) -> Self {
        Self {
            snake: game.snake().clone(),
            food: game.food(),
            status: game.status(),
        }
    }
}

/// Feeds operations and driver ticks into one game and redraws its views.
pub struct Controller {
    game: GameState,
    driver: Driver,
    views: Vec<Box<dyn View>>,
    init_seed: Seed,
    record_replays: bool,
    recorder: Option<ReplayRecorder>,
    replays: Vec<ReplayV1>,
    last_rendered: Option<RenderSnapshot>,
}

impl Controller {
    pub async fn new(
        game: GameState,
        driver: Driver,
        views: Vec<Box<dyn View>>,
        record_replays: bool,
    ) -> Result<Self, GameError> {
        let mut controller = Self {
            game,
            driver,
            views,
            init_seed: 0,
            record_replays,
            recorder: None,
            replays: Vec::new(),
            last_rendered: None,
        };
        controller.start_round().await?;
        Ok(controller)
    }

    pub async fn run(
        &mut self,
        mut operations: mpsc::UnboundedReceiver<Operation>,
        mut ticks: mpsc::UnboundedReceiver<Tick>,
    ) -> Vec<ReplayV1> {
        loop {
            tokio::select! {
                operation = operations.recv() => {
                    let Some(operation) = operation else {
                        log!("input closed, stopping");
                        break;
                    };
                    if let Err(e) = self.handle_operation(operation).await {
                        log_error!("failed to handle {}: {}", operation, e);
                    }
                }
                Some(tick) = ticks.recv() => {
                    if let Err(e) = self.handle_tick(tick).await {
                        log_error!("failed to handle tick: {}", e);
                    }
                }
            }
        }

        self.driver.pause();
        self.finish_replay();
        self.take_replays()
    }

    pub async fn handle_operation(&mut self, operation: Operation) -> Result<(), GameError> {
        if !self.driver.is_running() {
            log!("start driver");
            self.driver.start();
        }

        match operation.direction() {
            Some(direction) => {
                log_debug!("change direction {}", direction);
                self.driver.change_direction(direction).await;
            }
            None if self.game.status().is_terminal() => {
                log!("restart");
                self.finish_replay();
                self.game.reset();
                self.start_round().await?;
            }
            None => {}
        }
        Ok(())
    }

    pub async fn handle_tick(&mut self, tick: Tick) -> Result<Option<MoveResult>, GameError> {
        log_debug!("one tick {:?}", tick);
        if !self.game.status().is_terminal()
            && let Some(recorder) = self.recorder.as_mut()
        {
            recorder.record_tick(&tick);
        }

        let result = self.game.apply_move(tick.direction, Some(tick.seed))?;
        self.driver.set_speed_factor(self.game.score()).await;

        log_debug!("game status: {}", self.game.status());
        if self.game.status().is_terminal() {
            self.driver.pause();
        }

        self.render();
        Ok(result)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn init_seed(&self) -> Seed {
        self.init_seed
    }

    /// Replays of games finished by a restart and not yet collected.
    pub fn take_replays(&mut self) -> Vec<ReplayV1> {
        std::mem::take(&mut self.replays)
    }

    /// The driver always restarts from the game's own starting direction.
    async fn start_round(&mut self) -> Result<(), GameError> {
        self.driver.reset(self.game.settings().direction).await;
        let seed = self.driver.seed().await;
        self.game.init(Some(seed))?;
        self.init_seed = seed;
        if self.record_replays {
            self.recorder = Some(ReplayRecorder::new(
                VERSION.to_string(),
                self.game.settings().clone(),
                seed,
            ));
        }
        self.render();
        Ok(())
    }

    fn finish_replay(&mut self) {
        if let Some(mut recorder) = self.recorder.take()
            && recorder.ticks_count() > 0
        {
            self.replays.push(recorder.finalize());
        }
    }

    fn render(&mut self) {
        let snapshot = RenderSnapshot::of(&self.game);
        if self.last_rendered.as_ref() == Some(&snapshot) {
            return;
        }
        self.last_rendered = Some(snapshot);
        for view in &mut self.views {
            view.render(&self.game);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use crate::driver::test_clock::SteppingClock;
    use crate::driver::DriverSettings;
    use crate::game::{Direction, GameSettings};
    use crate::replay::ReplayPlayer;

    #[derive(Clone, Default)]
    struct RecordingView {
        statuses: Arc<Mutex<Vec<GameStatus>>>,
    }

    impl View for RecordingView {
        fn render(&mut self, game: &GameState) {
            self.statuses.lock().unwrap().push(game.status());
        }
    }

    async fn create_controller(
        settings: GameSettings,
    ) -> (Controller, mpsc::UnboundedReceiver<Tick>, RecordingView) {
        let (driver, tick_rx) = Driver::new(
            DriverSettings::with_interval_ms(1000),
            Direction::Right,
            Arc::new(SteppingClock::starting_at(1000)),
        );
        let view = RecordingView::default();
        let game = GameState::new(settings).unwrap();
        let controller = Controller::new(game, driver, vec![Box::new(view.clone())], true)
            .await
            .unwrap();
        (controller, tick_rx, view)
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_inits_and_renders() {
        let (controller, _ticks, view) = create_controller(GameSettings::default()).await;

        assert_eq!(controller.game().status(), GameStatus::Inited);
        assert_eq!(controller.init_seed(), 1001);
        assert_eq!(controller.init_seed(), controller.driver().seed().await);
        assert_eq!(*view.statuses.lock().unwrap(), vec![GameStatus::Inited]);
        assert!(!controller.driver().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_starts_driver_and_turns() {
        let (mut controller, _ticks, _view) = create_controller(GameSettings::default()).await;

        controller.handle_operation(Operation::Up).await.unwrap();

        assert!(controller.driver().is_running());
        assert_eq!(controller.driver().direction().await, Direction::Up);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_follows_game_start_direction() {
        let settings = GameSettings::default().with_direction(Direction::Down);
        let (mut controller, mut ticks, _view) = create_controller(settings).await;
        assert_eq!(controller.driver().direction().await, Direction::Down);

        controller.handle_operation(Operation::Restart).await.unwrap();
        let tick = ticks.recv().await.unwrap();
        assert_eq!(tick.direction, Direction::Down);

        controller.handle_tick(tick).await.unwrap();
        assert_eq!(controller.game().head(), Some(Grid::new(4, 8)));
        assert_eq!(controller.game().direction(), Direction::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_brings_driver_back_to_start_direction() {
        let settings = GameSettings::new(5, 3, 4).with_direction(Direction::Up);
        let (mut controller, _ticks, _view) = create_controller(settings).await;

        controller.handle_operation(Operation::Right).await.unwrap();
        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Right })
            .await
            .unwrap();
        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Right })
            .await
            .unwrap();
        assert_eq!(controller.game().status(), GameStatus::Ended);

        controller.handle_operation(Operation::Restart).await.unwrap();
        assert_eq!(controller.driver().direction().await, Direction::Up);
        assert_eq!(controller.game().direction(), Direction::Up);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_moves_snake() {
        let (mut controller, _ticks, view) = create_controller(GameSettings::default()).await;

        let result = controller
            .handle_tick(Tick { seed: 1, direction: Direction::Down })
            .await
            .unwrap();

        assert_eq!(result, Some(MoveResult::Empty));
        assert_eq!(controller.game().status(), GameStatus::Playing);
        assert_eq!(controller.game().head(), Some(Grid::new(4, 8)));
        assert_eq!(view.statuses.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_pauses_driver() {
        let (mut controller, _ticks, _view) = create_controller(GameSettings::new(5, 1, 5)).await;
        controller.handle_operation(Operation::Up).await.unwrap();
        assert!(controller.driver().is_running());

        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Up })
            .await
            .unwrap();

        assert_eq!(controller.game().status(), GameStatus::Ended);
        assert!(!controller.driver().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_only_after_game_over() {
        let (mut controller, _ticks, view) = create_controller(GameSettings::new(5, 3, 4)).await;

        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Right })
            .await
            .unwrap();
        let status = controller.game().status();
        assert!(!status.is_terminal());

        controller.handle_operation(Operation::Restart).await.unwrap();
        assert_eq!(controller.game().status(), status, "restart ignored while playing");

        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Right })
            .await
            .unwrap();
        assert_eq!(controller.game().status(), GameStatus::Ended);

        controller.handle_operation(Operation::Restart).await.unwrap();
        assert_eq!(controller.game().status(), GameStatus::Inited);
        assert_eq!(controller.game().score(), 0);
        assert_eq!(view.statuses.lock().unwrap().last(), Some(&GameStatus::Inited));
        assert_eq!(controller.take_replays().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_factor_follows_score() {
        let (mut controller, _ticks, _view) = create_controller(GameSettings::new(5, 1, 4)).await;

        controller
            .handle_tick(Tick { seed: 1, direction: Direction::Right })
            .await
            .unwrap();

        assert_eq!(controller.game().status(), GameStatus::Win);
        assert_eq!(controller.game().score(), 5);
        assert_eq!(controller.driver().current_interval().await, Duration::from_millis(975));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_records_replay() {
        let (mut controller, tick_rx, _view) = create_controller(GameSettings::default()).await;
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        op_tx.send(Operation::Down).unwrap();

        let handle = tokio::spawn(async move {
            let replays = controller.run(op_rx, tick_rx).await;
            (controller, replays)
        });
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(op_tx);
        let (controller, replays) = handle.await.unwrap();

        assert_eq!(controller.game().head().map(|head| head.y), Some(8));
        assert!(!controller.driver().is_running());
        assert_eq!(replays.len(), 1);
        assert_eq!(replays[0].ticks.len(), 1);

        let mut player = ReplayPlayer::new(replays[0].clone()).unwrap();
        let replayed = player.play_to_end().unwrap();
        assert_eq!(replayed.snake(), controller.game().snake());
        assert_eq!(replayed.food(), controller.game().food());
    }
}
