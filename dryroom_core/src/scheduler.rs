//! One countdown timer per running room, driven by an injected `Clock`.
//!
//! The scheduler only answers "how many whole ticks are due for which room";
//! it never touches controllers. Polling faster than the tick period yields
//! nothing, so a busy caller cannot double-decrement a countdown.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dryroom_traits::clock::Clock;

use crate::error::{BuildError, Result, RoomId};
use crate::status::Phase;

pub struct TickScheduler {
    clock: Arc<dyn Clock + Send + Sync>,
    period: Duration,
    anchors: BTreeMap<RoomId, Anchor>,
}

// Instant the next tick is measured from, and the stretch of Running it
// belongs to.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    at: Instant,
    run: u64,
}

impl core::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("period", &self.period)
            .field("armed", &self.anchors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TickScheduler {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "tick period must be > 0".to_string(),
            )));
        }
        Ok(Self {
            clock,
            period,
            anchors: BTreeMap::new(),
        })
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn clock(&self) -> &Arc<dyn Clock + Send + Sync> {
        &self.clock
    }

    /// Start a timer for `room`'s run `run` at the current instant. Re-arming
    /// with the same run keeps the existing anchor; a different run replaces
    /// it, so time spent outside Running never turns into ticks.
    pub fn arm(&mut self, room: RoomId, run: u64) {
        let now = self.clock.now();
        let anchor = self.anchors.entry(room).or_insert(Anchor { at: now, run });
        if anchor.run != run {
            *anchor = Anchor { at: now, run };
        }
    }

    pub fn disarm(&mut self, room: RoomId) {
        self.anchors.remove(&room);
    }

    #[inline]
    pub fn is_armed(&self, room: RoomId) -> bool {
        self.anchors.contains_key(&room)
    }

    pub fn armed_count(&self) -> usize {
        self.anchors.len()
    }

    /// Keep the timer in step with the room: armed iff Running, re-anchored
    /// whenever the room has left and re-entered Running since the last sync.
    pub fn sync(&mut self, room: RoomId, phase: Phase, run: u64) {
        if phase == Phase::Running {
            self.arm(room, run);
        } else {
            self.disarm(room);
        }
    }

    /// Whole ticks elapsed per armed room since the last poll. Rooms with
    /// nothing due are omitted; fractional time carries over.
    pub fn poll(&mut self) -> Vec<(RoomId, u32)> {
        let now = self.clock.now();
        let period_ns = self.period.as_nanos();
        let mut due = Vec::new();
        for (room, anchor) in self.anchors.iter_mut() {
            let elapsed = now.saturating_duration_since(anchor.at).as_nanos();
            let n = elapsed / period_ns;
            if n == 0 {
                continue;
            }
            let n = u32::try_from(n).unwrap_or(u32::MAX);
            anchor.at += self.period * n;
            due.push((*room, n));
        }
        due
    }

    /// Earliest instant at which some armed room has a tick due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.anchors.values().map(|a| a.at).min().map(|at| at + self.period)
    }

    /// Sleep on the injected clock until the next deadline (or one period
    /// when nothing is armed).
    pub fn wait(&self) {
        let now = self.clock.now();
        let d = self
            .next_deadline()
            .map_or(self.period, |t| t.saturating_duration_since(now));
        self.clock.sleep(d);
    }
}
