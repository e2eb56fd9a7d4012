//! Runtime room descriptions used to build controllers.
//!
//! These are separate from the TOML-deserialized config in `dryroom_config`;
//! see `conversions` for the mapping.

use crate::error::RoomId;
use crate::mapper::GaugeRange;
use crate::program::DryingProgram;

/// Everything needed to create one `RoomController`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub id: RoomId,
    pub name: String,
    pub connected: bool,
    pub temperature: f32,
    pub humidity: f32,
    pub temperature_range: GaugeRange,
    pub humidity_range: GaugeRange,
    /// Initial program settings; the countdown starts loaded with its duration.
    pub program: DryingProgram,
}

impl RoomSpec {
    /// A connected room with default ranges and program.
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        RoomDefaults::default().spec(id, name)
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn readings(mut self, temperature: f32, humidity: f32) -> Self {
        self.temperature = temperature;
        self.humidity = humidity;
        self
    }

    pub fn program(mut self, program: DryingProgram) -> Self {
        self.program = program;
        self
    }

    pub fn temperature_range(mut self, range: GaugeRange) -> Self {
        self.temperature_range = range;
        self
    }
}

/// Ranges and program given to rooms created on first contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomDefaults {
    pub temperature_range: GaugeRange,
    pub humidity_range: GaugeRange,
    pub program: DryingProgram,
}

impl Default for RoomDefaults {
    fn default() -> Self {
        Self {
            temperature_range: GaugeRange::TEMPERATURE_DEFAULT,
            humidity_range: GaugeRange::HUMIDITY_DEFAULT,
            program: DryingProgram::default(),
        }
    }
}

impl RoomDefaults {
    /// A connected room with these defaults and zeroed readings.
    pub fn spec(&self, id: RoomId, name: impl Into<String>) -> RoomSpec {
        RoomSpec {
            id,
            name: name.into(),
            connected: true,
            temperature: 0.0,
            humidity: 0.0,
            temperature_range: self.temperature_range,
            humidity_range: self.humidity_range,
            program: self.program,
        }
    }
}
