//! Application glue module
//!
//! Command-line arguments, configuration and the colour palette shared by the renderer and the
//! built-in commands.

mod config;

pub use config::{default_config_path, CliArgs, Config, ConfigError, Palette, ScreenConfig};
