//! Process-wide set of room controllers keyed by room id.
//!
//! The registry only dispatches: it finds the controller, forwards the
//! command, publishes the resulting snapshot to subscribers, and logs
//! rejections. All state-machine rules live in `RoomController`.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender, unbounded};
use dryroom_traits::{SensorFeed, SensorReading};

use crate::command::Command;
use crate::config::{RoomDefaults, RoomSpec};
use crate::controller::RoomController;
use crate::countdown::TickOutcome;
use crate::error::{BuildError, ControlError, Result, RoomId};
use crate::scheduler::TickScheduler;
use crate::snapshot::RoomSnapshot;

#[derive(Debug, Default)]
pub struct RoomRegistry {
    // Insertion order is the listing order.
    rooms: Vec<RoomController>,
    index: HashMap<RoomId, usize>,
    defaults: RoomDefaults,
    subscribers: Vec<Sender<RoomSnapshot>>,
}

impl RoomRegistry {
    /// Build a registry from a fixed set of rooms. Duplicate ids and invalid
    /// room programs are rejected.
    pub fn new(defaults: RoomDefaults, specs: impl IntoIterator<Item = RoomSpec>) -> Result<Self> {
        let mut reg = Self {
            defaults,
            ..Self::default()
        };
        for spec in specs {
            let id = spec.id;
            if reg.index.contains_key(&id) {
                return Err(eyre::Report::new(BuildError::DuplicateRoom(id)));
            }
            let ctl = RoomController::new(spec).map_err(|e| {
                eyre::Report::new(BuildError::InvalidConfig(format!("room {id}: {e}")))
            })?;
            reg.insert(ctl);
        }
        tracing::debug!(rooms = reg.rooms.len(), "registry initialized");
        Ok(reg)
    }

    /// Build from a validated TOML config. An empty room list is an error.
    pub fn from_config(cfg: &dryroom_config::Config) -> Result<Self> {
        if cfg.rooms.is_empty() {
            return Err(eyre::Report::new(BuildError::NoRooms));
        }
        let defaults = RoomDefaults::try_from(cfg)?;
        let specs = cfg
            .rooms
            .iter()
            .map(|room| defaults.spec_from(room))
            .collect::<Vec<_>>();
        Self::new(defaults, specs)
    }

    fn insert(&mut self, ctl: RoomController) -> usize {
        let idx = self.rooms.len();
        self.index.insert(ctl.id(), idx);
        self.rooms.push(ctl);
        idx
    }

    fn index_of(&self, id: RoomId) -> Result<usize, ControlError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(ControlError::UnknownRoom(id))
    }

    /// Index of `id`, creating a room from the defaults on first contact.
    fn upsert(&mut self, id: RoomId) -> Result<usize, ControlError> {
        if let Some(&idx) = self.index.get(&id) {
            return Ok(idx);
        }
        let ctl = RoomController::new(self.defaults.spec(id, format!("Room {id}")))?;
        tracing::info!(room = id, "room registered on first contact");
        Ok(self.insert(ctl))
    }

    fn publish(&mut self, snap: &RoomSnapshot) {
        self.subscribers.retain(|tx| tx.send(snap.clone()).is_ok());
    }

    /// Receive a snapshot after every successful mutation of any room.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<RoomSnapshot> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn get(&self, id: RoomId) -> Option<&RoomController> {
        self.index.get(&id).map(|&i| &self.rooms[i])
    }

    pub fn snapshot(&self, id: RoomId) -> Result<RoomSnapshot, ControlError> {
        Ok(self.rooms[self.index_of(id)?].snapshot())
    }

    /// Snapshots of every room in insertion order.
    pub fn list(&self) -> Vec<RoomSnapshot> {
        self.rooms.iter().map(RoomController::snapshot).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(RoomController::id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Run one operator command against a room.
    pub fn execute(&mut self, id: RoomId, command: Command) -> Result<RoomSnapshot, ControlError> {
        let idx = self.index_of(id)?;
        match self.rooms[idx].apply(command) {
            Ok(()) => {
                let snap = self.rooms[idx].snapshot();
                self.publish(&snap);
                Ok(snap)
            }
            Err(e) => {
                tracing::warn!(room = id, command = command.name(), error = %e, "command rejected");
                Err(e)
            }
        }
    }

    /// Advance one room by a single tick.
    pub fn tick(&mut self, id: RoomId) -> Result<TickOutcome, ControlError> {
        let idx = self.index_of(id)?;
        let outcome = self.rooms[idx].tick();
        if outcome != TickOutcome::Idle {
            let snap = self.rooms[idx].snapshot();
            self.publish(&snap);
        }
        Ok(outcome)
    }

    /// Forward a connectivity report, registering unknown rooms.
    pub fn upsert_connectivity(
        &mut self,
        id: RoomId,
        connected: bool,
    ) -> Result<RoomSnapshot, ControlError> {
        let idx = self.upsert(id)?;
        self.rooms[idx].set_connected(connected);
        let snap = self.rooms[idx].snapshot();
        self.publish(&snap);
        Ok(snap)
    }

    /// Forward a full sensor delivery, registering unknown rooms.
    pub fn apply_reading(
        &mut self,
        id: RoomId,
        reading: SensorReading,
    ) -> Result<RoomSnapshot, ControlError> {
        let idx = self.upsert(id)?;
        self.rooms[idx].apply_reading(reading);
        let snap = self.rooms[idx].snapshot();
        self.publish(&snap);
        Ok(snap)
    }

    /// Ask the feed for every known room once. Feed errors are logged and
    /// skipped; returns how many readings were applied.
    pub fn poll_feed(&mut self, feed: &mut dyn SensorFeed) -> usize {
        let ids: Vec<RoomId> = self.ids().collect();
        let mut applied = 0;
        for id in ids {
            match feed.read(id) {
                Ok(Some(reading)) => {
                    if self.apply_reading(id, reading).is_ok() {
                        applied += 1;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::error!(room = id, error = %e, "sensor feed read failed"),
            }
        }
        applied
    }

    /// Emergency stop every room. Never fails.
    pub fn emergency_stop_all(&mut self) {
        for idx in 0..self.rooms.len() {
            self.rooms[idx].emergency_stop();
            let snap = self.rooms[idx].snapshot();
            self.publish(&snap);
        }
    }

    /// Bring the scheduler's timers in line with room phases, then apply
    /// every tick that is due. Returns the non-idle outcomes in order.
    ///
    /// A room that paused or stopped and then re-entered Running since the
    /// previous call gets a fresh timer, so the time it spent outside Running
    /// is never counted. Hosts that accept commands between calls should call
    /// this right after any command that starts or resumes a room.
    pub fn advance(&mut self, scheduler: &mut TickScheduler) -> Vec<(RoomId, TickOutcome)> {
        for ctl in &self.rooms {
            scheduler.sync(ctl.id(), ctl.phase(), ctl.run_id());
        }
        let mut outcomes = Vec::new();
        for (id, due) in scheduler.poll() {
            let Some(&idx) = self.index.get(&id) else {
                scheduler.disarm(id);
                continue;
            };
            let mut ticked = false;
            for _ in 0..due {
                let outcome = self.rooms[idx].tick();
                if outcome == TickOutcome::Idle {
                    break;
                }
                ticked = true;
                outcomes.push((id, outcome));
                if outcome == TickOutcome::Completed {
                    break;
                }
            }
            if ticked {
                let snap = self.rooms[idx].snapshot();
                self.publish(&snap);
            }
            scheduler.sync(id, self.rooms[idx].phase(), self.rooms[idx].run_id());
        }
        outcomes
    }

    /// Whether any room still has a program in flight.
    pub fn any_active(&self) -> bool {
        self.rooms.iter().any(|c| c.phase().is_active())
    }
}
