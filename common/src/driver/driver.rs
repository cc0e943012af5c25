use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::game::{Direction, Seed};
use crate::log_debug;
use super::clock::Clock;
use super::settings::DriverSettings;

/// Polling resolution; finer than any tick interval.
pub const CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Interval reduction per point of speed factor.
pub const SPEED_STEP: Duration = Duration::from_millis(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub seed: Seed,
    pub direction: Direction,
}

pub fn effective_interval(interval: Duration, speed_factor: u32) -> Duration {
    interval.saturating_sub(SPEED_STEP * speed_factor)
}

struct DriverShared {
    last_time: Instant,
    direction: Direction,
    seed: Seed,
    speed_factor: u32,
    interval: Duration,
}

impl DriverShared {
    fn poll(&mut self, now: Instant) -> Option<Tick> {
        let interval = effective_interval(self.interval, self.speed_factor);
        if now.duration_since(self.last_time) <= interval {
            return None;
        }
        self.last_time = now;
        Some(Tick {
            seed: self.seed,
            direction: self.direction,
        })
    }
}

/// Emits ticks carrying the latest seed and direction. Rather than arming a
/// timer per interval, a task wakes every `CHECK_INTERVAL` and compares the
/// elapsed time with the current interval, so speed changes apply on the
/// next poll.
pub struct Driver {
    settings: DriverSettings,
    clock: Arc<dyn Clock>,
    shared: Arc<Mutex<DriverShared>>,
    tick_tx: mpsc::UnboundedSender<Tick>,
    timer: Option<JoinHandle<()>>,
}

impl Driver {
    /// `direction` is the one the snake starts with; `reset` takes the
    /// same value again for every new game.
    pub fn new(
        settings: DriverSettings,
        direction: Direction,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let shared = DriverShared {
            last_time: Instant::now(),
            direction,
            seed: clock.seed(),
            speed_factor: 0,
            interval: settings.interval(),
        };

        let driver = Self {
            settings,
            clock,
            shared: Arc::new(Mutex::new(shared)),
            tick_tx,
            timer: None,
        };
        (driver, tick_rx)
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let tick_tx = self.tick_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            loop {
                sleep(CHECK_INTERVAL).await;

                let tick = shared.lock().await.poll(Instant::now());
                if let Some(tick) = tick {
                    log_debug!("tick seed={} direction={}", tick.seed, tick.direction);
                    if tick_tx.send(tick).is_err() {
                        break;
                    }
                }
            }
        }));
    }

    pub fn pause(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub async fn change_direction(&self, direction: Direction) {
        let seed = self.clock.seed();
        let mut shared = self.shared.lock().await;
        shared.seed = seed;
        shared.direction = direction;
    }

    pub async fn set_speed_factor(&self, speed_factor: u32) {
        self.shared.lock().await.speed_factor = speed_factor;
    }

    /// Back to `direction` and base speed, with a fresh seed.
    pub async fn reset(&self, direction: Direction) {
        let seed = self.clock.seed();
        let mut shared = self.shared.lock().await;
        shared.last_time = Instant::now();
        shared.direction = direction;
        shared.speed_factor = 0;
        shared.seed = seed;
    }

    pub async fn seed(&self) -> Seed {
        self.shared.lock().await.seed
    }

    pub async fn direction(&self) -> Direction {
        self.shared.lock().await.direction
    }

    pub async fn current_interval(&self) -> Duration {
        let shared = self.shared.lock().await;
        effective_interval(shared.interval, shared.speed_factor)
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.pause();
    }
}
