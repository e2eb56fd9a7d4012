use dryroom_core::RoomSnapshot;
use dryroom_core::util::split_hms;

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_hms(seconds: u32) -> String {
    let (h, m, s) = split_hms(seconds);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Colour band of the timer progress ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBucket {
    Early,
    Midway,
    Late,
}

impl TimerBucket {
    pub fn from_progress(fraction: f32) -> Self {
        if fraction < 0.33 {
            TimerBucket::Early
        } else if fraction < 0.66 {
            TimerBucket::Midway
        } else {
            TimerBucket::Late
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerBucket::Early => "early",
            TimerBucket::Midway => "midway",
            TimerBucket::Late => "late",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    pub remaining: String,
    pub progress: f32,
    pub bucket: TimerBucket,
    pub label: &'static str,
}

impl TimerView {
    pub fn from_snapshot(snap: &RoomSnapshot) -> Self {
        let progress = snap.progress_fraction();
        Self {
            remaining: format_hms(snap.remaining_s),
            progress,
            bucket: TimerBucket::from_progress(progress),
            label: if snap.counting { "Remaining" } else { "Paused" },
        }
    }
}
