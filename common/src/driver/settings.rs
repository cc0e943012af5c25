use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSettings {
    pub interval_ms: u64,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

impl DriverSettings {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Validate for DriverSettings {
    fn validate(&self) -> Result<(), String> {
        if self.interval_ms < 50 || self.interval_ms > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}
