#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cli;
mod commands;
mod error_fmt;
mod run;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::run::RunArgs;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    if let Err(e) = real_main(cli) {
        let code = error_fmt::exit_code_for_error(&e);
        tracing::error!(error = %e, code, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(code);
    }
}

fn load_config(cli: &Cli) -> Result<(dryroom_config::Config, bool)> {
    if cli.config.exists() {
        Ok((dryroom_config::load_file(&cli.config)?, true))
    } else {
        Ok((dryroom_config::Config::default(), false))
    }
}

fn init_tracing(cli: &Cli, logging: &dryroom_config::Logging) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let console = if cli.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = logging.file.as_deref().map(|path| {
        let path = std::path::Path::new(path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "dryroom.log".into(), |n| n.to_string_lossy().into_owned());
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(EnvFilter::new(logging.level.as_deref().unwrap_or("info")))
    });

    let _ = tracing_subscriber::registry()
        .with(console.with_filter(console_filter))
        .with(file_layer)
        .try_init();
}

fn real_main(cli: Cli) -> Result<()> {
    let (cfg, from_file) = load_config(&cli)?;
    init_tracing(&cli, &cfg.logging);
    if from_file {
        tracing::debug!(path = %cli.config.display(), "config loaded");
    } else {
        tracing::info!(path = %cli.config.display(), "config file not found; using built-in defaults");
    }

    let mut registry = dryroom_core::RoomRegistry::from_config(&cfg)?;
    let json = cli.json;

    match cli.cmd {
        Commands::List => commands::list(&registry, json),
        Commands::Show { room } => commands::show(&registry, room, json),
        Commands::Estop { room } => commands::estop(&mut registry, room, json),
        Commands::Replay { room, csv } => commands::replay(&mut registry, room, &csv, json),
        Commands::Run {
            room,
            minutes,
            seconds,
            target_temp,
            target_humidity,
            heater,
            dryer,
            fan,
            pause_at,
            resume_after,
            fast,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let flag = shutdown.clone();
                if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
                    tracing::warn!(error = %e, "failed to install Ctrl-C handler");
                }
            }
            let args = RunArgs {
                room,
                minutes,
                seconds,
                target_temp,
                target_humidity,
                heater,
                dryer,
                fan,
                pause_at,
                resume_after,
                fast,
            };
            run::run_program(&cfg, &mut registry, &args, json, &shutdown)
        }
    }
}
