use crate::game::Seed;

/// Wall-clock source for tick seeds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;

    fn seed(&self) -> Seed {
        self.now_ms()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}
