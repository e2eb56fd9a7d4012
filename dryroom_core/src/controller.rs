//! Per-room state machine composing `DeviceState` and `CountdownEngine`.
//!
//! Every command first asks `DeviceState::next_phase` whether the current
//! phase accepts it, then validates parameters, and only then mutates. A
//! rejected command therefore leaves the room untouched.

use dryroom_traits::SensorReading;

use crate::command::Command;
use crate::config::RoomSpec;
use crate::countdown::{CountdownEngine, TickOutcome};
use crate::device::{Actuators, DeviceState};
use crate::error::{ControlError, RoomId};
use crate::mapper::GaugeRange;
use crate::program::DryingProgram;
use crate::snapshot::RoomSnapshot;
use crate::status::{Actuator, ControlMode, Event, Phase};

#[derive(Debug, Clone)]
pub struct RoomController {
    id: RoomId,
    name: String,
    temperature: f32,
    humidity: f32,
    temperature_range: GaugeRange,
    humidity_range: GaugeRange,
    device: DeviceState,
    countdown: CountdownEngine,
    program: DryingProgram,
    mode: ControlMode,
    // Bumped on every entry into Running
    run: u64,
}

impl RoomController {
    /// Create an Idle room with its countdown loaded from `RoomSpec::program`.
    pub fn new(spec: RoomSpec) -> Result<Self, ControlError> {
        spec.program.validate(&spec.temperature_range)?;
        let countdown = CountdownEngine::new(spec.program.duration_s)?;
        Ok(Self {
            id: spec.id,
            name: spec.name,
            temperature: spec.temperature,
            humidity: spec.humidity,
            temperature_range: spec.temperature_range,
            humidity_range: spec.humidity_range,
            device: DeviceState::new(spec.id, spec.connected),
            countdown,
            program: spec.program,
            mode: ControlMode::default(),
            run: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.device.phase()
    }

    #[inline]
    pub fn actuators(&self) -> Actuators {
        self.device.actuators()
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.device.is_connected()
    }

    #[inline]
    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining_seconds()
    }

    #[inline]
    pub fn total_seconds(&self) -> u32 {
        self.countdown.total_seconds()
    }

    #[inline]
    pub fn program(&self) -> DryingProgram {
        self.program
    }

    /// Identifies the current stretch of Running. Changes whenever the room
    /// starts or resumes, so a tick timer can tell a stale anchor apart.
    #[inline]
    pub fn run_id(&self) -> u64 {
        self.run
    }

    pub fn progress_fraction(&self) -> f32 {
        self.countdown.progress_fraction()
    }

    fn transition(&mut self, to: Phase) {
        let from = self.device.phase();
        self.device.enter(to);
        if to == Phase::Running && from != Phase::Running {
            self.run = self.run.wrapping_add(1);
        }
        tracing::info!(room = self.id, %from, %to, "phase transition");
    }

    /// Idle/Completed/Stopped -> Running with fresh parameters.
    ///
    /// Actuators are left as they are; whether automatic drying should switch
    /// devices on is up to the caller.
    pub fn start_drying(&mut self, program: DryingProgram) -> Result<(), ControlError> {
        let to = self.device.next_phase(Event::StartDrying)?;
        if !self.device.is_connected() {
            return Err(ControlError::InvalidParameter(format!(
                "room {} is disconnected",
                self.id
            )));
        }
        program.validate(&self.temperature_range)?;
        self.countdown.start(program.duration_s)?;
        self.program = program;
        tracing::info!(
            room = self.id,
            duration_s = program.duration_s,
            target_temperature = program.target_temperature,
            target_humidity = program.target_humidity,
            "drying started"
        );
        self.transition(to);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), ControlError> {
        let to = self.device.next_phase(Event::Pause)?;
        self.countdown.pause();
        self.transition(to);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ControlError> {
        let to = self.device.next_phase(Event::Resume)?;
        self.countdown.resume();
        self.transition(to);
        Ok(())
    }

    /// Running/Paused -> Stopped. The countdown is held at its current value
    /// and actuators are left as they are.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        let to = self.device.next_phase(Event::Stop)?;
        self.countdown.pause();
        self.transition(to);
        Ok(())
    }

    /// Advance one second. Only a Running room counts down; reaching zero
    /// completes the program and switches every actuator off.
    pub fn tick(&mut self) -> TickOutcome {
        if self.device.phase() != Phase::Running {
            return TickOutcome::Idle;
        }
        let outcome = self.countdown.tick();
        match outcome {
            TickOutcome::Completed => {
                self.device.complete();
                tracing::info!(room = self.id, from = %Phase::Running, to = %Phase::Completed, "phase transition");
            }
            TickOutcome::Advanced(remaining_s) => {
                tracing::debug!(room = self.id, remaining_s, "tick");
            }
            TickOutcome::Idle => {}
        }
        outcome
    }

    /// Everything off, countdown held, phase Stopped. Never fails.
    pub fn emergency_stop(&mut self) {
        let from = self.device.phase();
        self.countdown.pause();
        self.device.emergency_stop();
        tracing::warn!(room = self.id, %from, to = %self.device.phase(), "emergency stop");
    }

    /// Flip one actuator; returns its new state.
    pub fn toggle_actuator(&mut self, actuator: Actuator) -> Result<bool, ControlError> {
        let on = self.device.toggle(actuator)?;
        tracing::info!(room = self.id, %actuator, on, "actuator toggled");
        Ok(on)
    }

    /// Replace the drying settings without starting a program. In Idle and
    /// Stopped the countdown is reloaded with the new duration; a Completed
    /// room keeps its countdown at zero until the next start.
    pub fn update_settings(&mut self, program: DryingProgram) -> Result<(), ControlError> {
        let phase = self.device.next_phase(Event::UpdateSettings)?;
        program.validate(&self.temperature_range)?;
        if matches!(phase, Phase::Idle | Phase::Stopped) {
            self.countdown.reset(program.duration_s)?;
        }
        self.program = program;
        tracing::info!(room = self.id, duration_s = program.duration_s, "settings updated");
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ControlMode) -> Result<(), ControlError> {
        if !self.device.is_connected() {
            return Err(ControlError::Disconnected(self.id));
        }
        self.mode = mode;
        tracing::info!(room = self.id, %mode, "control mode changed");
        Ok(())
    }

    /// Connectivity report from the acquisition layer. Losing the connection
    /// forces actuators off, reloads the countdown with the program duration
    /// and returns to Idle.
    pub fn set_connected(&mut self, connected: bool) {
        let from = self.device.phase();
        let changed = self.device.set_connected(connected);
        if !connected {
            // Stored programs are validated, so only a zero duration could fail here.
            if self.countdown.reset(self.program.duration_s).is_err() {
                self.countdown.rewind();
            }
            if changed {
                tracing::warn!(room = self.id, %from, "room disconnected");
            }
        } else if changed {
            tracing::info!(room = self.id, "room connected");
        }
    }

    /// Full replace of the sensor fields from one feed delivery.
    pub fn apply_reading(&mut self, reading: SensorReading) {
        self.temperature = reading.temperature;
        self.humidity = reading.humidity;
        self.set_connected(reading.connected);
    }

    /// Dispatch a command. Emergency stop always succeeds.
    pub fn apply(&mut self, command: Command) -> Result<(), ControlError> {
        match command {
            Command::StartDrying(program) => self.start_drying(program),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::EmergencyStop => {
                self.emergency_stop();
                Ok(())
            }
            Command::Toggle(a) => self.toggle_actuator(a).map(|_| ()),
            Command::UpdateSettings(program) => self.update_settings(program),
            Command::SetMode(mode) => self.set_mode(mode),
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id,
            name: self.name.clone(),
            connected: self.device.is_connected(),
            temperature: self.temperature,
            humidity: self.humidity,
            temperature_range: self.temperature_range,
            humidity_range: self.humidity_range,
            actuators: self.device.actuators(),
            phase: self.device.phase(),
            mode: self.mode,
            program: self.program,
            remaining_s: self.countdown.remaining_seconds(),
            total_s: self.countdown.total_seconds(),
            counting: self.countdown.is_running(),
        }
    }
}
