//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "dryroom", version, about = "Drying-room control CLI")]
pub struct Cli {
    /// Path to config TOML; built-in defaults are used when the file is absent
    #[arg(long, value_name = "FILE", default_value = "etc/dryroom.toml")]
    pub config: PathBuf,

    /// Emit JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins when set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One line per room, in configured order
    List,
    /// Detail card for one room: gauges, devices and timer
    Show {
        #[arg(long)]
        room: u32,
    },
    /// Start a drying program and drive it to completion
    Run {
        #[arg(long)]
        room: u32,
        /// Program duration in minutes (defaults to the configured program)
        #[arg(long, conflicts_with = "seconds")]
        minutes: Option<u32>,
        /// Program duration in seconds
        #[arg(long)]
        seconds: Option<u32>,
        /// Target temperature in °C
        #[arg(long = "target-temp", value_name = "C")]
        target_temp: Option<f32>,
        /// Target relative humidity in %
        #[arg(long = "target-humidity", value_name = "PCT")]
        target_humidity: Option<f32>,
        /// Switch the heater on before starting
        #[arg(long, action = ArgAction::SetTrue)]
        heater: bool,
        /// Switch the dryer on before starting
        #[arg(long, action = ArgAction::SetTrue)]
        dryer: bool,
        /// Switch the fan on before starting
        #[arg(long, action = ArgAction::SetTrue)]
        fan: bool,
        /// Pause after this many elapsed program seconds
        #[arg(long = "pause-at", value_name = "S", requires = "resume_after")]
        pause_at: Option<u32>,
        /// Resume after staying paused for this many ticks
        #[arg(long = "resume-after", value_name = "S", requires = "pause_at")]
        resume_after: Option<u32>,
        /// Drive the countdown from a manual clock so the run finishes instantly
        #[arg(long, action = ArgAction::SetTrue)]
        fast: bool,
    },
    /// Emergency stop one room
    Estop {
        #[arg(long)]
        room: u32,
    },
    /// Apply sensor readings from a CSV (room,temperature,humidity,connected)
    Replay {
        #[arg(long)]
        room: u32,
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
}
