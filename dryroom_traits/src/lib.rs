pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// One delivery from the sensor acquisition layer for a single room.
///
/// Each delivery fully replaces the room's temperature, humidity and
/// connectivity fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature: f32,
    pub humidity: f32,
    pub connected: bool,
}

impl SensorReading {
    pub fn connected(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
            connected: true,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            connected: false,
        }
    }
}

pub trait SensorFeed {
    /// Next reading for `room`, or `None` when the feed has nothing new.
    fn read(
        &mut self,
        room: u32,
    ) -> Result<Option<SensorReading>, Box<dyn std::error::Error + Send + Sync>>;
}
