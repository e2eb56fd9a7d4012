//! Read-only copies of room state for the presentation layer.

use crate::device::Actuators;
use crate::error::RoomId;
use crate::mapper::GaugeRange;
use crate::program::DryingProgram;
use crate::status::{ControlMode, Phase};

#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    pub connected: bool,
    pub temperature: f32,
    pub humidity: f32,
    pub temperature_range: GaugeRange,
    pub humidity_range: GaugeRange,
    pub actuators: Actuators,
    pub phase: Phase,
    pub mode: ControlMode,
    pub program: DryingProgram,
    pub remaining_s: u32,
    pub total_s: u32,
    /// Whether the countdown is currently advancing.
    pub counting: bool,
}

impl RoomSnapshot {
    /// Elapsed share of the program, in `[0, 1]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_fraction(&self) -> f32 {
        if self.total_s == 0 {
            return 0.0;
        }
        let elapsed = self.total_s.saturating_sub(self.remaining_s);
        (f64::from(elapsed) / f64::from(self.total_s)) as f32
    }
}
