//! Configuration system for Stardrift.
//!
//! Settings persist to disk as RON and are read once at startup. CLI flags
//! override loaded values; every struct tolerates missing and unknown fields.

mod backdrop;
mod cli;
mod config;
mod error;

pub use backdrop::{
    BackdropConfig, ConstellationConfig, LAYER_COUNT, LayerConfig, NebulaConfig, ShootingStarConfig,
    StarLayersConfig,
};
pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, WindowConfig};
pub use error::ConfigError;
