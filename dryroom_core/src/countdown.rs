//! Countdown bookkeeping for a timed drying program.
//!
//! The engine knows nothing about phases or actuators. One `tick()` is one
//! elapsed second; cadence is the caller's job (see `scheduler`).

use crate::error::ControlError;

/// Result of a single `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running or already at zero; nothing changed.
    Idle,
    /// One second elapsed; carries the new remaining time.
    Advanced(u32),
    /// This tick brought remaining time to zero; the engine stopped itself.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownEngine {
    remaining_s: u32,
    total_s: u32,
    running: bool,
}

impl CountdownEngine {
    /// A stopped engine holding `total_s` seconds.
    pub fn new(total_s: u32) -> Result<Self, ControlError> {
        if total_s == 0 {
            return Err(ControlError::InvalidDuration(total_s));
        }
        Ok(Self {
            remaining_s: total_s,
            total_s,
            running: false,
        })
    }

    /// Load `total_s` and start counting down.
    pub fn start(&mut self, total_s: u32) -> Result<(), ControlError> {
        self.reset(total_s)?;
        self.running = true;
        Ok(())
    }

    /// Load `total_s` without starting. The running flag is cleared.
    pub fn reset(&mut self, total_s: u32) -> Result<(), ControlError> {
        if total_s == 0 {
            return Err(ControlError::InvalidDuration(total_s));
        }
        self.total_s = total_s;
        self.remaining_s = total_s;
        self.running = false;
        Ok(())
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining_s == 0 {
            return TickOutcome::Idle;
        }
        self.remaining_s -= 1;
        if self.remaining_s == 0 {
            self.running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced(self.remaining_s)
        }
    }

    /// Back to the full duration, not running.
    pub fn rewind(&mut self) {
        self.remaining_s = self.total_s;
        self.running = false;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue counting down. Returns whether the engine is now running;
    /// an exhausted countdown stays stopped.
    pub fn resume(&mut self) -> bool {
        if self.remaining_s > 0 {
            self.running = true;
        }
        self.running
    }

    /// Elapsed share of the total, in `[0, 1]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_fraction(&self) -> f32 {
        let elapsed = self.total_s - self.remaining_s;
        (f64::from(elapsed) / f64::from(self.total_s)) as f32
    }

    #[inline]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_s
    }

    #[inline]
    pub fn total_seconds(&self) -> u32 {
        self.total_s
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
