#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Presentation helpers derived from `RoomSnapshot`s.
//!
//! Nothing here is stored; every view is recomputed from a snapshot.

pub mod card;
pub mod gauge;
pub mod timer;

pub use card::render_card;
pub use gauge::GaugeView;
pub use timer::{TimerBucket, TimerView, format_hms};
