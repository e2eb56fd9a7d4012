//! Program phases, command events and actuator identifiers.

use std::fmt;

/// Drying-program lifecycle state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No program started (or reset by a disconnect); countdown holds the full duration.
    #[default]
    Idle,
    /// Countdown is advancing once per tick.
    Running,
    /// Countdown is held; `resume` continues from the same remaining time.
    Paused,
    /// Countdown reached zero; all actuators were switched off.
    Completed,
    /// Stopped by the operator or by emergency stop.
    Stopped,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Completed => "Completed",
            Phase::Stopped => "Stopped",
        }
    }

    /// Phases from which a new program may be started.
    #[inline]
    pub fn can_start(self) -> bool {
        matches!(self, Phase::Idle | Phase::Completed | Phase::Stopped)
    }

    /// Phases with a program in flight.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command names, used to report which event a phase rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    StartDrying,
    Pause,
    Resume,
    Stop,
    UpdateSettings,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::StartDrying => "start drying",
            Event::Pause => "pause",
            Event::Resume => "resume",
            Event::Stop => "stop",
            Event::UpdateSettings => "update settings",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controllable device in a drying room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actuator {
    Heater,
    Dryer,
    Fan,
}

impl Actuator {
    pub const ALL: [Actuator; 3] = [Actuator::Heater, Actuator::Dryer, Actuator::Fan];

    pub fn as_str(self) -> &'static str {
        match self {
            Actuator::Heater => "heater",
            Actuator::Dryer => "dryer",
            Actuator::Fan => "fan",
        }
    }
}

impl fmt::Display for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manual or automatic operation. Informational only: switching modes
/// never changes actuators or phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    #[default]
    Manual,
    Automatic,
}

impl ControlMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlMode::Manual => "manual",
            ControlMode::Automatic => "automatic",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
