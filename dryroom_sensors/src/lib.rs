//! Sensor feeds for the drying-room core.
//!
//! `SimulatedFeed` stands in for field telemetry with a slow deterministic
//! drift; `ReplayFeed` plays back scripted readings (e.g. from a CSV log).

pub mod error;

use std::collections::{BTreeMap, VecDeque};

use dryroom_traits::{SensorFeed, SensorReading};

pub use error::{FeedError, Result};

/// Overrides the simulated drift per read when set.
pub const DRIFT_ENV: &str = "DRYROOM_SIM_DRIFT";
pub const DEFAULT_DRIFT: f32 = 0.05;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn check(room: u32, reading: SensorReading) -> Result<SensorReading> {
    if !reading.temperature.is_finite() || !reading.humidity.is_finite() {
        return Err(FeedError::InvalidReading {
            room,
            reason: "non-finite value".to_string(),
        });
    }
    if !(0.0..=100.0).contains(&reading.humidity) {
        return Err(FeedError::InvalidReading {
            room,
            reason: format!("humidity {} outside 0..=100", reading.humidity),
        });
    }
    Ok(reading)
}

#[derive(Debug, Clone)]
struct SimRoom {
    temperature: f32,
    humidity: f32,
    connected: bool,
    step: u8,
}

/// Mocked telemetry: temperature creeps up and humidity creeps down by
/// `drift` per read, with a small bounded wobble. Fully deterministic.
#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    rooms: BTreeMap<u32, SimRoom>,
    drift: f32,
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
            drift: DEFAULT_DRIFT,
        }
    }

    /// The drift from `DRYROOM_SIM_DRIFT`, falling back to the default when
    /// unset. A set but unusable value is an error.
    pub fn from_env() -> Result<Self> {
        let mut feed = Self::new();
        if let Ok(raw) = std::env::var(DRIFT_ENV) {
            let drift = raw
                .trim()
                .parse::<f32>()
                .map_err(|_| FeedError::InvalidDrift(raw.clone()))?;
            feed = feed.with_drift(drift)?;
            tracing::debug!(drift, "simulated drift from environment");
        }
        Ok(feed)
    }

    pub fn with_drift(mut self, drift: f32) -> Result<Self> {
        if !drift.is_finite() || drift < 0.0 {
            return Err(FeedError::InvalidDrift(drift.to_string()));
        }
        self.drift = drift;
        Ok(self)
    }

    #[inline]
    pub fn drift(&self) -> f32 {
        self.drift
    }

    /// Register (or replace) a simulated room.
    pub fn add_room(&mut self, room: u32, temperature: f32, humidity: f32, connected: bool) {
        self.rooms.insert(
            room,
            SimRoom {
                temperature,
                humidity,
                connected,
                step: 0,
            },
        );
    }

    /// Simulate a cable pull or reconnect. Returns false for unknown rooms.
    pub fn set_connected(&mut self, room: u32, connected: bool) -> bool {
        match self.rooms.get_mut(&room) {
            Some(r) => {
                r.connected = connected;
                tracing::info!(room, connected, "simulated connectivity change");
                true
            }
            None => false,
        }
    }

    fn next(&mut self, room: u32) -> Result<Option<SensorReading>> {
        let drift = self.drift;
        let Some(r) = self.rooms.get_mut(&room) else {
            return Ok(None);
        };
        if !r.connected {
            return Ok(Some(SensorReading::disconnected()));
        }
        r.step = r.step.wrapping_add(1);
        // period-8 triangle wave in [-1, 1]
        let phase = f32::from(r.step % 8);
        let wobble = (if phase < 4.0 { phase } else { 8.0 - phase }) / 2.0 - 1.0;
        r.temperature = (r.temperature + drift).min(80.0);
        r.humidity = (r.humidity - drift).clamp(0.0, 100.0);
        let reading = SensorReading::connected(
            r.temperature + wobble * drift,
            (r.humidity + wobble * drift).clamp(0.0, 100.0),
        );
        tracing::trace!(room, t = reading.temperature, h = reading.humidity, "simulated reading");
        check(room, reading).map(Some)
    }
}

impl SensorFeed for SimulatedFeed {
    fn read(&mut self, room: u32) -> std::result::Result<Option<SensorReading>, BoxError> {
        self.next(room).map_err(Into::into)
    }
}

/// Plays back scripted readings room by room, in the order given.
#[derive(Debug, Clone, Default)]
pub struct ReplayFeed {
    queues: BTreeMap<u32, VecDeque<SensorReading>>,
    delivered: usize,
}

impl ReplayFeed {
    pub fn new(readings: impl IntoIterator<Item = (u32, SensorReading)>) -> Self {
        let mut queues: BTreeMap<u32, VecDeque<SensorReading>> = BTreeMap::new();
        for (room, reading) in readings {
            queues.entry(room).or_default().push_back(reading);
        }
        Self {
            queues,
            delivered: 0,
        }
    }

    /// Rooms that appear in the script, ascending.
    pub fn rooms(&self) -> impl Iterator<Item = u32> + '_ {
        self.queues.keys().copied()
    }

    /// Readings not yet delivered across all rooms.
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    fn next(&mut self, room: u32) -> Result<Option<SensorReading>> {
        let Some(reading) = self.queues.get_mut(&room).and_then(VecDeque::pop_front) else {
            return Ok(None);
        };
        self.delivered += 1;
        check(room, reading).map(Some)
    }
}

impl SensorFeed for ReplayFeed {
    fn read(&mut self, room: u32) -> std::result::Result<Option<SensorReading>, BoxError> {
        self.next(room).map_err(Into::into)
    }
}
