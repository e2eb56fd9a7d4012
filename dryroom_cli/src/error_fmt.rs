//! Human-readable error descriptions and structured JSON error formatting.

use dryroom_core::error::{BuildError, ControlError};
use serde_json::json;

/// Failures that originate in the CLI itself rather than the core.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("interrupted: every room was emergency-stopped")]
    Interrupted,
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(ce) = err.downcast_ref::<ControlError>() {
        return match ce {
            ControlError::IllegalTransition { phase, event } => format!(
                "What happened: The room cannot {event} while {phase}.\nLikely causes: The command does not fit the current program phase (e.g. resume without a pause).\nHow to fix: Check the phase with `dryroom show --room ID`, then send a command that is legal from there."
            ),
            ControlError::Disconnected(room) => format!(
                "What happened: Room {room} is disconnected.\nLikely causes: Sensor/actuator link down or room configured with connected = false.\nHow to fix: Restore the connection, then retry the command."
            ),
            ControlError::InvalidParameter(msg) => format!(
                "What happened: Invalid parameter ({msg}).\nLikely causes: Target outside the gauge range, zero duration, or a disconnected room.\nHow to fix: Adjust --target-temp/--target-humidity/--minutes or the [program] section and retry."
            ),
            ControlError::InvalidDuration(s) => format!(
                "What happened: Invalid duration ({s}s).\nLikely causes: A zero-length drying program.\nHow to fix: Pass --minutes or --seconds greater than zero."
            ),
            ControlError::UnknownRoom(room) => format!(
                "What happened: No room with id {room}.\nLikely causes: Typo in --room or the room is missing from [[rooms]].\nHow to fix: Run `dryroom list` to see configured ids."
            ),
            ControlError::InvalidRange { min, max } => format!(
                "What happened: Invalid gauge range [{min}, {max}].\nLikely causes: min is not below max in [gauges].\nHow to fix: Edit the config so that min < max for each gauge."
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::NoRooms => {
                "What happened: No rooms are configured.\nLikely causes: `rooms = []` in the config.\nHow to fix: Add at least one [[rooms]] entry, or drop the key to use the demo rooms.".to_string()
            }
            BuildError::DuplicateRoom(id) => format!(
                "What happened: Room id {id} is configured twice.\nLikely causes: Copy-pasted [[rooms]] entry.\nHow to fix: Give every room a unique id."
            ),
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    if let Some(CliError::Interrupted) = err.downcast_ref::<CliError>() {
        return "What happened: Run interrupted by Ctrl-C.\nLikely causes: Operator abort.\nHow to fix: All rooms were emergency-stopped; start a new run when ready.".to_string();
    }

    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("replay csv must have headers") {
        return "Invalid headers in replay CSV. Expected 'room,temperature,humidity,connected'."
            .to_string();
    }

    if lower.contains("parse config") || lower.contains("must be") {
        return format!(
            "What happened: Configuration is invalid.\nLikely causes: {msg}.\nHow to fix: Edit the TOML config and try again."
        );
    }

    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable reason name for JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(ce) = err.downcast_ref::<ControlError>() {
        return match ce {
            ControlError::InvalidRange { .. } => "InvalidRange",
            ControlError::InvalidDuration(_) => "InvalidDuration",
            ControlError::InvalidParameter(_) => "InvalidParameter",
            ControlError::IllegalTransition { .. } => "IllegalTransition",
            ControlError::Disconnected(_) => "Disconnected",
            ControlError::UnknownRoom(_) => "UnknownRoom",
        };
    }
    if err.downcast_ref::<CliError>().is_some() {
        return "Interrupted";
    }
    "Error"
}

/// Stable exit codes per rejection kind; anything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ce) = err.downcast_ref::<ControlError>() {
        return match ce {
            ControlError::IllegalTransition { .. } => 3,
            ControlError::Disconnected(_) => 4,
            ControlError::InvalidParameter(_) | ControlError::InvalidDuration(_) => 5,
            ControlError::UnknownRoom(_) => 6,
            ControlError::InvalidRange { .. } => 7,
        };
    }
    if let Some(CliError::Interrupted) = err.downcast_ref::<CliError>() {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let msg = humanize(err);
    let reason = reason_name(err);
    let details = match err.downcast_ref::<ControlError>() {
        Some(ControlError::IllegalTransition { phase, event }) => {
            Some(json!({ "phase": phase.as_str(), "event": event.as_str() }))
        }
        Some(ControlError::Disconnected(room) | ControlError::UnknownRoom(room)) => {
            Some(json!({ "room": room }))
        }
        _ => None,
    };
    match details {
        Some(d) => json!({ "reason": reason, "details": d, "message": msg }),
        None => json!({ "reason": reason, "message": msg }),
    }
    .to_string()
}
