// config.rs - User-adjustable simulation settings

use std::time::Duration;

use crate::error::LifeError;

pub const DEFAULT_STEP_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    step_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { step_interval: Duration::from_millis(DEFAULT_STEP_INTERVAL_MS) }
    }
}

impl SimulationConfig {
    pub fn new(step_interval_ms: u64) -> Result<Self, LifeError> {
        let mut config = Self::default();
        config.set_step_interval(Duration::from_millis(step_interval_ms))?;
        Ok(config)
    }

    /// Always strictly positive.
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval.as_millis() as u64
    }

    /// Rejects a zero interval and keeps the previous one.
    pub fn set_step_interval(&mut self, interval: Duration) -> Result<(), LifeError> {
        if interval.is_zero() {
            return Err(LifeError::InvalidIntervalConfig(format!("{}", interval.as_millis())));
        }
        self.step_interval = interval;
        Ok(())
    }

    /// Parse user text as whole milliseconds. Non-numeric, zero and negative
    /// input is rejected and the previous interval is retained.
    pub fn set_step_interval_ms(&mut self, raw: &str) -> Result<(), LifeError> {
        let ms: u64 = raw
            .trim()
            .parse()
            .map_err(|_| LifeError::InvalidIntervalConfig(raw.to_string()))?;
        if ms == 0 {
            return Err(LifeError::InvalidIntervalConfig(raw.to_string()));
        }
        self.step_interval = Duration::from_millis(ms);
        Ok(())
    }
}
