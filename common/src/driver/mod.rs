mod clock;
mod driver;
mod settings;

pub use clock::{Clock, SystemClock};
pub use driver::{effective_interval, Driver, Tick, CHECK_INTERVAL, SPEED_STEP};
pub use settings::DriverSettings;

#[cfg(test)]
pub(crate) use clock::test_clock;
