//! Command-line argument parsing for Stardrift.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Stardrift command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "stardrift", about = "Animated pointer-reactive starfield backdrop")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Fixed random seed for a reproducible backdrop.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render headlessly and write the final frame to this PNG file.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Number of frames to simulate before writing the snapshot.
    #[arg(long, default_value_t = 120)]
    pub frames: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(seed) = args.seed {
            self.backdrop.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            seed: Some(42),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.backdrop.seed, Some(42));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert!(!config.window.fullscreen);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_snapshot_flags() {
        let args = CliArgs::parse_from([
            "stardrift",
            "--snapshot",
            "out.png",
            "--frames",
            "30",
            "--seed",
            "5",
        ]);
        assert_eq!(args.snapshot, Some(PathBuf::from("out.png")));
        assert_eq!(args.frames, 30);
        assert_eq!(args.seed, Some(5));
    }

    #[test]
    fn test_frames_default() {
        let args = CliArgs::parse_from(["stardrift"]);
        assert_eq!(args.frames, 120);
        assert!(args.snapshot.is_none());
    }
}
