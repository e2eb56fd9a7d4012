//! Drying program parameters and their validation.

use crate::error::ControlError;
use crate::mapper::GaugeRange;
use crate::util::minutes_to_secs;

/// Allowed humidity targets, independent of the configured humidity gauge.
pub const HUMIDITY_TARGET_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryingProgram {
    pub target_temperature: f32,
    pub target_humidity: f32,
    pub duration_s: u32,
}

impl Default for DryingProgram {
    fn default() -> Self {
        Self {
            target_temperature: 30.0,
            target_humidity: 40.0,
            duration_s: minutes_to_secs(120),
        }
    }
}

impl DryingProgram {
    pub fn new(target_temperature: f32, target_humidity: f32, duration_s: u32) -> Self {
        Self {
            target_temperature,
            target_humidity,
            duration_s,
        }
    }

    /// Same program with a different duration.
    pub fn with_duration(self, duration_s: u32) -> Self {
        Self { duration_s, ..self }
    }

    /// Check the program against the room's temperature domain.
    pub fn validate(&self, temperature: &GaugeRange) -> Result<(), ControlError> {
        if self.duration_s == 0 {
            return Err(ControlError::InvalidParameter(
                "duration must be > 0 seconds".to_string(),
            ));
        }
        if !temperature.contains(self.target_temperature) {
            return Err(ControlError::InvalidParameter(format!(
                "target temperature {} outside [{}, {}]",
                self.target_temperature,
                temperature.min(),
                temperature.max()
            )));
        }
        if !HUMIDITY_TARGET_RANGE.contains(&self.target_humidity) {
            return Err(ControlError::InvalidParameter(format!(
                "target humidity {} outside [0, 100]",
                self.target_humidity
            )));
        }
        Ok(())
    }
}
