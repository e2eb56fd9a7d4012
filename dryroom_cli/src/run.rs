//! Timed drying run: start a program and drive it with the tick scheduler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dryroom_core::util::minutes_to_secs;
use dryroom_core::{
    Actuator, Command, DryingProgram, Phase, RoomId, RoomRegistry, RoomSnapshot, TickScheduler,
};
use dryroom_sensors::SimulatedFeed;
use dryroom_traits::{Clock, ManualClock, MonotonicClock};
use dryroom_ui::{format_hms, render_card};
use eyre::Result;
use serde_json::json;

use crate::commands::snapshot_json;
use crate::error_fmt::CliError;

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub room: RoomId,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    pub target_temp: Option<f32>,
    pub target_humidity: Option<f32>,
    pub heater: bool,
    pub dryer: bool,
    pub fan: bool,
    pub pause_at: Option<u32>,
    pub resume_after: Option<u32>,
    pub fast: bool,
}

impl RunArgs {
    /// The configured program with any command-line overrides applied.
    fn program(&self, base: DryingProgram) -> DryingProgram {
        let duration_s = match (self.seconds, self.minutes) {
            (Some(s), _) => s,
            (None, Some(m)) => minutes_to_secs(m),
            (None, None) => base.duration_s,
        };
        DryingProgram::new(
            self.target_temp.unwrap_or(base.target_temperature),
            self.target_humidity.unwrap_or(base.target_humidity),
            duration_s,
        )
    }
}

fn emit(json: bool, event: &str, snap: &RoomSnapshot) {
    if json {
        println!("{}", json!({ "event": event, "snapshot": snapshot_json(snap) }));
    } else {
        println!(
            "[{event}] {} {} {} remaining",
            snap.name,
            snap.phase,
            format_hms(snap.remaining_s)
        );
    }
}

pub fn run_program(
    cfg: &dryroom_config::Config,
    registry: &mut RoomRegistry,
    args: &RunArgs,
    json: bool,
    shutdown: &Arc<AtomicBool>,
) -> Result<()> {
    let room = args.room;
    let program = args.program(registry.snapshot(room)?.program);
    if let Some(at) = args.pause_at
        && at >= program.duration_s
    {
        eyre::bail!(
            "--pause-at {at} must be below the program duration ({}s)",
            program.duration_s
        );
    }

    for (on, actuator) in [
        (args.heater, Actuator::Heater),
        (args.dryer, Actuator::Dryer),
        (args.fan, Actuator::Fan),
    ] {
        if on {
            registry.execute(room, Command::Toggle(actuator))?;
        }
    }
    let snap = registry.execute(room, Command::StartDrying(program))?;
    emit(json, "started", &snap);

    let manual = ManualClock::new();
    let clock: Arc<dyn Clock + Send + Sync> = if args.fast {
        Arc::new(manual.clone())
    } else {
        Arc::new(MonotonicClock::new())
    };
    let period = Duration::from_millis(cfg.scheduler.tick_ms);
    let mut scheduler = TickScheduler::new(clock, period)?;

    let mut feed = SimulatedFeed::from_env()?;
    for s in registry.list() {
        feed.add_room(s.id, s.temperature, s.humidity, s.connected);
    }

    tracing::info!(
        room,
        duration_s = program.duration_s,
        tick_ms = cfg.scheduler.tick_ms,
        fast = args.fast,
        "run loop started"
    );

    registry.advance(&mut scheduler);
    let mut paused_ticks: Option<u32> = None;
    let mut pause_done = false;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::warn!("Ctrl-C received; emergency-stopping all rooms");
            registry.emergency_stop_all();
            emit(json, "emergency_stop", &registry.snapshot(room)?);
            return Err(CliError::Interrupted.into());
        }

        if args.fast {
            manual.advance(period);
        } else {
            scheduler.wait();
        }
        registry.poll_feed(&mut feed);
        registry.advance(&mut scheduler);

        let snap = registry.snapshot(room)?;
        match snap.phase {
            Phase::Completed => {
                emit(json, "completed", &snap);
                if !json {
                    print!("{}", render_card(&snap));
                }
                return Ok(());
            }
            Phase::Running => {
                if let Some(at) = args.pause_at
                    && !pause_done
                    && snap.total_s - snap.remaining_s >= at
                {
                    let snap = registry.execute(room, Command::Pause)?;
                    emit(json, "paused", &snap);
                    paused_ticks = Some(0);
                    pause_done = true;
                }
            }
            Phase::Paused => {
                if let Some(n) = paused_ticks.as_mut() {
                    *n += 1;
                    if *n >= args.resume_after.unwrap_or(0) {
                        let snap = registry.execute(room, Command::Resume)?;
                        emit(json, "resumed", &snap);
                        paused_ticks = None;
                        // Arm the resumed room now so the next wait covers its first tick.
                        registry.advance(&mut scheduler);
                    }
                }
            }
            Phase::Idle | Phase::Stopped => {
                eyre::bail!("room {room} left the program early (now {})", snap.phase);
            }
        }
    }
}
