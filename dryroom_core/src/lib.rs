#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Room control core for drying-room dashboards (I/O-agnostic).
//!
//! Sensor acquisition and wall-clock time reach the core only through
//! `dryroom_traits::SensorFeed` and `dryroom_traits::Clock`.
//!
//! ## Architecture
//!
//! - **Value mapping**: reading → percentage → gauge angle, reading → colour bucket (`mapper`)
//! - **Countdown**: remaining-time bookkeeping, one tick per second (`countdown`)
//! - **Device state**: actuator flags, connectivity, phase transition table (`device`)
//! - **Room controller**: the per-room state machine (`controller`)
//! - **Registry**: rooms by id, snapshot fan-out (`registry`)
//! - **Scheduler**: one timer per running room over an injected clock (`scheduler`)
//!
//! ## Rejections
//!
//! Commands return `ControlError` and leave the room unchanged when rejected.
//! `emergency_stop` and connectivity loss never fail.

pub mod command;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod countdown;
pub mod device;
pub mod error;
pub mod mapper;
pub mod program;
pub mod registry;
pub mod scheduler;
pub mod snapshot;
pub mod status;
pub mod util;

pub use command::Command;
pub use config::{RoomDefaults, RoomSpec};
pub use controller::RoomController;
pub use countdown::{CountdownEngine, TickOutcome};
pub use device::{Actuators, DeviceState};
pub use error::{BuildError, ControlError, RoomId};
pub use mapper::{ColorBucket, GaugeRange, SensorKind, angle, color_bucket, percentage};
pub use program::DryingProgram;
pub use registry::RoomRegistry;
pub use scheduler::TickScheduler;
pub use snapshot::RoomSnapshot;
pub use status::{Actuator, ControlMode, Event, Phase};
