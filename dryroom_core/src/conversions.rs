//! Bridges from `dryroom_config` types to `dryroom_core` types.

use crate::config::{RoomDefaults, RoomSpec};
use crate::error::BuildError;
use crate::mapper::GaugeRange;
use crate::program::DryingProgram;
use crate::util::minutes_to_secs;

// ── Gauges + program ─────────────────────────────────────────────────────────

impl TryFrom<&dryroom_config::Config> for RoomDefaults {
    type Error = eyre::Report;

    fn try_from(c: &dryroom_config::Config) -> Result<Self, Self::Error> {
        let g = &c.gauges;
        let temperature_range = GaugeRange::new(g.temperature_min, g.temperature_max)
            .map_err(|e| eyre::Report::new(BuildError::InvalidConfig(format!("temperature gauge: {e}"))))?;
        let humidity_range = GaugeRange::new(g.humidity_min, g.humidity_max)
            .map_err(|e| eyre::Report::new(BuildError::InvalidConfig(format!("humidity gauge: {e}"))))?;
        let program = DryingProgram::from(&c.program);
        program
            .validate(&temperature_range)
            .map_err(|e| eyre::Report::new(BuildError::InvalidConfig(format!("program: {e}"))))?;
        Ok(Self {
            temperature_range,
            humidity_range,
            program,
        })
    }
}

impl From<&dryroom_config::ProgramCfg> for DryingProgram {
    fn from(c: &dryroom_config::ProgramCfg) -> Self {
        Self {
            target_temperature: c.target_temperature,
            target_humidity: c.target_humidity,
            duration_s: minutes_to_secs(c.duration_minutes),
        }
    }
}

// ── Rooms ────────────────────────────────────────────────────────────────────

impl RoomDefaults {
    /// Room spec for a configured room using these defaults.
    pub fn spec_from(&self, room: &dryroom_config::RoomCfg) -> RoomSpec {
        RoomSpec {
            connected: room.connected,
            temperature: room.temperature,
            humidity: room.humidity,
            ..self.spec(room.id, room.name.clone())
        }
    }
}
