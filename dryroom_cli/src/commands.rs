//! One-shot subcommands: list, show, estop, replay.

use std::path::Path;

use dryroom_core::util::split_hms;
use dryroom_core::{Command, RoomId, RoomRegistry, RoomSnapshot};
use dryroom_sensors::ReplayFeed;
use dryroom_traits::{SensorFeed, SensorReading};
use dryroom_ui::{GaugeView, TimerView, format_hms, render_card};
use eyre::Result;
use serde_json::json;

fn gauge_json(g: &GaugeView) -> serde_json::Value {
    json!({
        "value": g.value,
        "unit": g.unit(),
        "percentage": g.percentage,
        "angle": g.angle,
        "bucket": g.bucket.as_str(),
    })
}

/// Full JSON view of a room, including derived gauge and timer fields.
pub fn snapshot_json(snap: &RoomSnapshot) -> serde_json::Value {
    let timer = TimerView::from_snapshot(snap);
    json!({
        "room": snap.id,
        "name": snap.name,
        "connected": snap.connected,
        "phase": snap.phase.as_str(),
        "mode": snap.mode.as_str(),
        "temperature": gauge_json(&GaugeView::temperature(snap)),
        "humidity": gauge_json(&GaugeView::humidity(snap)),
        "actuators": {
            "heater": snap.actuators.heater,
            "dryer": snap.actuators.dryer,
            "fan": snap.actuators.fan,
        },
        "program": {
            "target_temperature": snap.program.target_temperature,
            "target_humidity": snap.program.target_humidity,
            "duration_s": snap.program.duration_s,
        },
        "remaining_s": snap.remaining_s,
        "total_s": snap.total_s,
        "remaining": timer.remaining,
        "progress": timer.progress,
        "timer_bucket": timer.bucket.as_str(),
        "counting": snap.counting,
    })
}

/// Single summary line used by `list` and `replay`.
pub fn summary_line(snap: &RoomSnapshot) -> String {
    let badge = if snap.connected { "online" } else { "offline" };
    let (h, m, s) = split_hms(snap.remaining_s);
    format!(
        "{:>3}  {:<12} {:<8} {:<10} {:>6.1}°C {:>5.1}%  {h:02}:{m:02}:{s:02}",
        snap.id,
        snap.name,
        badge,
        snap.phase.as_str(),
        snap.temperature,
        snap.humidity,
    )
}

pub fn list(registry: &RoomRegistry, json: bool) -> Result<()> {
    for snap in registry.list() {
        if json {
            println!("{}", snapshot_json(&snap));
        } else {
            println!("{}", summary_line(&snap));
        }
    }
    Ok(())
}

pub fn show(registry: &RoomRegistry, room: RoomId, json: bool) -> Result<()> {
    let snap = registry.snapshot(room)?;
    if json {
        println!("{}", snapshot_json(&snap));
    } else {
        print!("{}", render_card(&snap));
    }
    Ok(())
}

pub fn estop(registry: &mut RoomRegistry, room: RoomId, json: bool) -> Result<()> {
    let snap = registry.execute(room, Command::EmergencyStop)?;
    if json {
        println!("{}", json!({ "event": "emergency_stop", "snapshot": snapshot_json(&snap) }));
    } else {
        println!("Emergency stop: {} is {}", snap.name, snap.phase);
        print!("{}", render_card(&snap));
    }
    Ok(())
}

pub fn replay(registry: &mut RoomRegistry, room: RoomId, csv: &Path, json: bool) -> Result<()> {
    // fail on unknown ids before touching the file
    registry.snapshot(room)?;
    let rows = dryroom_config::load_replay_csv(csv)?;
    let total = rows.len();
    let mut feed = ReplayFeed::new(rows.iter().filter(|r| r.room == room).map(|r| {
        (
            r.room,
            SensorReading {
                temperature: r.temperature,
                humidity: r.humidity,
                connected: r.connected,
            },
        )
    }));
    if feed.is_exhausted() {
        eyre::bail!("replay CSV {:?} has no readings for room {room}", csv);
    }
    tracing::info!(
        room,
        readings = feed.remaining(),
        skipped = total - feed.remaining(),
        "replaying sensor readings"
    );

    while let Some(reading) = feed
        .read(room)
        .map_err(|e| eyre::eyre!("replay reading {}: {e}", feed.delivered()))?
    {
        let snap = registry.apply_reading(room, reading)?;
        if json {
            println!("{}", snapshot_json(&snap));
        } else {
            println!("{}", summary_line(&snap));
        }
    }
    if !json {
        println!(
            "Replayed {} readings; remaining {}",
            feed.delivered(),
            format_hms(registry.snapshot(room)?.remaining_s)
        );
    }
    Ok(())
}
