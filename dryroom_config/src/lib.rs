#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and sensor replay parsing for the drying-room dashboard.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Every section is optional; an empty document yields the built-in
//!   defaults, including the three demo rooms.
//! - The replay CSV loader enforces headers before reading any row.
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Gauge domains. Readings are mapped onto these ranges for display and
/// program targets are validated against them.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Gauges {
    pub temperature_min: f32,
    pub temperature_max: f32,
    pub humidity_min: f32,
    pub humidity_max: f32,
}

impl Default for Gauges {
    fn default() -> Self {
        Self {
            temperature_min: 0.0,
            temperature_max: 50.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
        }
    }
}

/// Default drying program applied to every room until changed.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ProgramCfg {
    pub target_temperature: f32,
    pub target_humidity: f32,
    pub duration_minutes: u32,
}

impl Default for ProgramCfg {
    fn default() -> Self {
        Self {
            target_temperature: 30.0,
            target_humidity: 40.0,
            duration_minutes: 120,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SchedulerCfg {
    /// Wall-clock length of one countdown tick (ms)
    pub tick_ms: u64,
}

impl Default for SchedulerCfg {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoomCfg {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_true")]
    pub connected: bool,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub humidity: f32,
}

fn default_true() -> bool {
    true
}

fn default_rooms() -> Vec<RoomCfg> {
    vec![
        RoomCfg {
            id: 1,
            name: "Room 1".to_string(),
            connected: true,
            temperature: 25.5,
            humidity: 65.0,
        },
        RoomCfg {
            id: 2,
            name: "Room 2".to_string(),
            connected: true,
            temperature: 22.0,
            humidity: 45.0,
        },
        RoomCfg {
            id: 3,
            name: "Room 3".to_string(),
            connected: false,
            temperature: 0.0,
            humidity: 0.0,
        },
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub gauges: Gauges,
    #[serde(default)]
    pub program: ProgramCfg,
    #[serde(default)]
    pub scheduler: SchedulerCfg,
    #[serde(default)]
    pub logging: Logging,
    /// Rooms in display order. Omitting the key yields the demo rooms.
    #[serde(default = "default_rooms")]
    pub rooms: Vec<RoomCfg>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gauges: Gauges::default(),
            program: ProgramCfg::default(),
            scheduler: SchedulerCfg::default(),
            logging: Logging::default(),
            rooms: default_rooms(),
        }
    }
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Gauges
        let g = &self.gauges;
        if !(g.temperature_max - g.temperature_min).is_finite() {
            eyre::bail!("gauges.temperature_min/max must be finite");
        }
        if g.temperature_min >= g.temperature_max {
            eyre::bail!("gauges.temperature_min must be < gauges.temperature_max");
        }
        if !(g.humidity_max - g.humidity_min).is_finite() {
            eyre::bail!("gauges.humidity_min/max must be finite");
        }
        if g.humidity_min >= g.humidity_max {
            eyre::bail!("gauges.humidity_min must be < gauges.humidity_max");
        }

        // Program
        let p = &self.program;
        if !(g.temperature_min..=g.temperature_max).contains(&p.target_temperature) {
            eyre::bail!(
                "program.target_temperature must be in [{}, {}]",
                g.temperature_min,
                g.temperature_max
            );
        }
        if !(0.0..=100.0).contains(&p.target_humidity) {
            eyre::bail!("program.target_humidity must be in [0, 100]");
        }
        if p.duration_minutes == 0 {
            eyre::bail!("program.duration_minutes must be >= 1");
        }
        if p.duration_minutes > 7 * 24 * 60 {
            eyre::bail!("program.duration_minutes is unreasonably large (>7d)");
        }

        // Scheduler
        if self.scheduler.tick_ms == 0 {
            eyre::bail!("scheduler.tick_ms must be >= 1");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }
        if let Some(level) = self.logging.level.as_deref()
            && !matches!(level, "error" | "warn" | "info" | "debug" | "trace")
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace, got {level:?}");
        }

        // Rooms
        let mut seen = HashSet::new();
        for room in &self.rooms {
            if room.name.trim().is_empty() {
                eyre::bail!("rooms[id={}].name must not be empty", room.id);
            }
            if !seen.insert(room.id) {
                eyre::bail!("rooms: duplicate room id {}", room.id);
            }
        }

        Ok(())
    }
}

/// Sensor replay CSV schema.
///
/// Expected headers:
/// room,temperature,humidity,connected
///
/// Example:
/// room,temperature,humidity,connected
/// 1,25.5,65.0,true
/// 1,0,0,false
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ReplayRow {
    pub room: u32,
    pub temperature: f32,
    pub humidity: f32,
    pub connected: bool,
}

pub fn load_replay_csv(path: &Path) -> eyre::Result<Vec<ReplayRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open replay CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["room", "temperature", "humidity", "connected"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "replay CSV must have headers 'room,temperature,humidity,connected', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ReplayRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("replay CSV {:?} contains no readings", path);
    }
    Ok(rows)
}
