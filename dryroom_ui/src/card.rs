use std::fmt::Write as _;

use dryroom_core::{Actuator, RoomSnapshot};

use crate::gauge::GaugeView;
use crate::timer::TimerView;

const BAR_WIDTH: usize = 20;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "off" }
}

/// Multi-line terminal card for one room.
pub fn render_card(snap: &RoomSnapshot) -> String {
    let mut out = String::new();
    let badge = if snap.connected { "online" } else { "offline" };
    let _ = writeln!(out, "{} (#{}) [{}]", snap.name, snap.id, badge);
    if !snap.connected {
        out.push_str("  Device disconnected\n");
        return out;
    }

    let t = GaugeView::temperature(snap);
    let h = GaugeView::humidity(snap);
    let _ = writeln!(out, "  temperature {}", t.bar(BAR_WIDTH));
    let _ = writeln!(out, "  humidity    {}", h.bar(BAR_WIDTH));

    let devices = Actuator::ALL
        .iter()
        .map(|&a| format!("{a}: {}", on_off(snap.actuators.get(a))))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "  {devices}");

    let timer = TimerView::from_snapshot(snap);
    let _ = writeln!(
        out,
        "  {} ({} mode)  {} {}  {:.0}% [{}]",
        snap.phase,
        snap.mode,
        timer.label,
        timer.remaining,
        timer.progress * 100.0,
        timer.bucket.as_str()
    );
    out
}
