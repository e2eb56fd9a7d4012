use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeedError {
    #[error("invalid reading for room {room}: {reason}")]
    InvalidReading { room: u32, reason: String },
    #[error("invalid drift {0} (must be finite and >= 0)")]
    InvalidDrift(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
