//! Stardrift binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p stardrift-app` to open the backdrop window, or
//! `cargo run -p stardrift-app -- --snapshot frame.png --frames 300` to render headlessly.

use std::process::ExitCode;

use clap::Parser;
use stardrift_app::platform::PlatformDirs;
use stardrift_app::{snapshot, window};
use stardrift_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    stardrift_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Stardrift {} | {}x{} | config: {}",
        env!("CARGO_PKG_VERSION"),
        config.window.width,
        config.window.height,
        dirs.config_dir.display()
    );

    if let Some(path) = &args.snapshot {
        return match snapshot::write_snapshot(&config, args.frames, path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Snapshot failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match window::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
