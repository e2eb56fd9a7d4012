//! Per-room actuator flags, connectivity and program phase.
//!
//! `DeviceState` owns the phase transition table; `RoomController` consults it
//! before touching the countdown so a rejected command never partially applies.

use crate::error::{ControlError, RoomId};
use crate::status::{Actuator, Event, Phase};

/// Independent on/off flags for the room's devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Actuators {
    pub heater: bool,
    pub dryer: bool,
    pub fan: bool,
}

impl Actuators {
    pub const OFF: Actuators = Actuators {
        heater: false,
        dryer: false,
        fan: false,
    };

    #[inline]
    pub fn get(&self, a: Actuator) -> bool {
        match a {
            Actuator::Heater => self.heater,
            Actuator::Dryer => self.dryer,
            Actuator::Fan => self.fan,
        }
    }

    fn flag_mut(&mut self, a: Actuator) -> &mut bool {
        match a {
            Actuator::Heater => &mut self.heater,
            Actuator::Dryer => &mut self.dryer,
            Actuator::Fan => &mut self.fan,
        }
    }

    #[inline]
    pub fn any_on(&self) -> bool {
        self.heater || self.dryer || self.fan
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    room: RoomId,
    connected: bool,
    actuators: Actuators,
    phase: Phase,
}

impl DeviceState {
    pub fn new(room: RoomId, connected: bool) -> Self {
        Self {
            room,
            connected,
            actuators: Actuators::OFF,
            phase: Phase::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn actuators(&self) -> Actuators {
        self.actuators
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Target phase for `event`, or `IllegalTransition` if the current phase
    /// does not accept it. Never mutates.
    pub fn next_phase(&self, event: Event) -> Result<Phase, ControlError> {
        let to = match (self.phase, event) {
            (p, Event::StartDrying) if p.can_start() => Phase::Running,
            (Phase::Running, Event::Pause) => Phase::Paused,
            (Phase::Paused, Event::Resume) => Phase::Running,
            (p, Event::Stop) if p.is_active() => Phase::Stopped,
            (p, Event::UpdateSettings) if p.can_start() => p,
            (p, e) => return Err(ControlError::illegal(p, e)),
        };
        Ok(to)
    }

    /// Apply a phase already approved by `next_phase`.
    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Flip one actuator and return its new state. Legal in every phase
    /// while connected.
    pub fn toggle(&mut self, a: Actuator) -> Result<bool, ControlError> {
        if !self.connected {
            return Err(ControlError::Disconnected(self.room));
        }
        let flag = self.actuators.flag_mut(a);
        *flag = !*flag;
        Ok(*flag)
    }

    /// Countdown ran out: everything off, phase Completed.
    pub(crate) fn complete(&mut self) {
        self.actuators = Actuators::OFF;
        self.phase = Phase::Completed;
    }

    /// Force every actuator off and move to Stopped. Never fails and is
    /// idempotent. A disconnected room stays Idle.
    pub fn emergency_stop(&mut self) {
        self.actuators = Actuators::OFF;
        if self.connected {
            self.phase = Phase::Stopped;
        }
    }

    /// Record connectivity. Losing the connection forces everything off and
    /// the phase back to Idle. Returns whether the flag changed.
    pub(crate) fn set_connected(&mut self, connected: bool) -> bool {
        let changed = self.connected != connected;
        self.connected = connected;
        if !connected {
            self.actuators = Actuators::OFF;
            self.phase = Phase::Idle;
        }
        changed
    }
}
