//! Operator commands accepted by a room.

use crate::program::DryingProgram;
use crate::status::{Actuator, ControlMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    StartDrying(DryingProgram),
    Pause,
    Resume,
    Stop,
    EmergencyStop,
    Toggle(Actuator),
    UpdateSettings(DryingProgram),
    SetMode(ControlMode),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartDrying(_) => "start_drying",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
            Command::EmergencyStop => "emergency_stop",
            Command::Toggle(_) => "toggle",
            Command::UpdateSettings(_) => "update_settings",
            Command::SetMode(_) => "set_mode",
        }
    }
}
