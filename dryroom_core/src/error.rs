use thiserror::Error;

use crate::status::{Event, Phase};

pub type RoomId = u32;

/// Rejection of a single command. Every variant leaves the targeted room
/// exactly as it was before the command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    #[error("invalid range: min {min} must be below max {max}")]
    InvalidRange { min: f32, max: f32 },
    #[error("invalid duration: {0}s (must be > 0)")]
    InvalidDuration(u32),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("illegal transition: cannot {event} while {phase}")]
    IllegalTransition { phase: Phase, event: Event },
    #[error("room {0} is disconnected")]
    Disconnected(RoomId),
    #[error("unknown room {0}")]
    UnknownRoom(RoomId),
}

impl ControlError {
    #[inline]
    pub(crate) fn illegal(phase: Phase, event: Event) -> Self {
        Self::IllegalTransition { phase, event }
    }

    /// Whether the operator can fix this by changing the command or waiting
    /// for a different phase. `InvalidRange` points at bad configuration.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidRange { .. })
    }
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("no rooms configured")]
    NoRooms,
    #[error("duplicate room id {0}")]
    DuplicateRoom(RoomId),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub use eyre::Report;
pub type Result<T, E = Report> = std::result::Result<T, E>;
