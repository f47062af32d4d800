//! Configuration for the shell

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::editor::{LineFlags, DEFAULT_HISTORY_SIZE};
use crate::input::Platform;
use crate::parser::ARGV_CAPACITY;

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "push")]
#[command(version)]
#[command(about = "A small command shell for character-cell machines", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hardware profile for keys and display
    #[arg(short, long, value_enum)]
    pub platform: Option<Platform>,

    /// Prompt text
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Screen columns, overriding what the terminal reports
    #[arg(long, value_name = "COLS")]
    pub cols: Option<usize>,

    /// Screen rows, overriding what the terminal reports
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<usize>,

    /// Disable inline argument hints
    #[arg(long)]
    pub no_hints: bool,
}

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hardware profile used for key decoding and display capabilities
    pub platform: Platform,
    /// Prompt shown before the edited line
    pub prompt: String,
    /// Maximum number of arguments per command line
    pub argv_capacity: usize,
    /// Number of remembered lines
    pub history_size: usize,
    /// Show inline argument hints
    pub hints: bool,
    /// Enable TAB completion
    pub completion: bool,
    /// Screen size settings
    pub screen: ScreenConfig,
    /// Colors
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            prompt: "$ ".to_string(),
            argv_capacity: ARGV_CAPACITY,
            history_size: DEFAULT_HISTORY_SIZE,
            hints: true,
            completion: true,
            screen: ScreenConfig::default(),
            palette: Palette::default(),
        }
    }
}

/// Screen size configuration
///
/// Unset dimensions are taken from the console; `fallback` is used when the
/// console cannot report its size either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub cols: Option<usize>,
    pub rows: Option<usize>,
    pub fallback: (usize, usize),
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            cols: None,
            rows: None,
            // Commodore 64 text screen
            fallback: (40, 25),
        }
    }
}

impl ScreenConfig {
    /// Effective size given what the console reports, if anything
    pub fn resolve(&self, reported: Option<(usize, usize)>) -> (usize, usize) {
        let (cols, rows) = reported.unwrap_or(self.fallback);
        (self.cols.unwrap_or(cols), self.rows.unwrap_or(rows))
    }
}

/// Colors used by the renderer and the commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Prompt accent color
    pub prompt: Color,
    /// Buffer text color
    pub text: Color,
    /// Muted color for hints and directory names
    pub hint: Color,
    /// Status overlay highlight
    pub overlay: Color,
    /// Status overlay text where a background color exists
    pub overlay_text: Color,
    /// Software cursor cell
    pub cursor: Color,
    /// Screen background
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            prompt: Color::RED,
            text: Color::WHITE,
            hint: Color::BLUE,
            overlay: Color::YELLOW,
            overlay_text: Color::BLACK,
            cursor: Color::PURPLE,
            background: Color::BLACK,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/push/config.json
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration with precedence: CLI > file > defaults
    ///
    /// An explicitly named config file must load; the default location is
    /// optional.
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(),
        };

        if let Some(platform) = args.platform {
            config.platform = platform;
        }
        if let Some(prompt) = &args.prompt {
            config.prompt = prompt.clone();
        }
        if args.cols.is_some() {
            config.screen.cols = args.cols;
        }
        if args.rows.is_some() {
            config.screen.rows = args.rows;
        }
        if args.no_hints {
            config.hints = false;
        }

        Ok(config)
    }

    /// Line editor features enabled by this configuration
    pub fn line_flags(&self) -> LineFlags {
        let mut flags = LineFlags::empty();
        flags.set(LineFlags::HINTS, self.hints);
        flags.set(LineFlags::COMPLETION, self.completion);
        flags
    }
}

/// Get the default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("push")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.platform, Platform::Posix);
        assert_eq!(config.argv_capacity, 8);
        assert_eq!(config.line_flags(), LineFlags::HINTS | LineFlags::COMPLETION);
        assert_eq!(config.palette.prompt, Color::RED);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            platform: Platform::Zx,
            hints: false,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
        assert_eq!(restored.line_flags(), LineFlags::COMPLETION);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"platform": "c64"}"#).unwrap();
        assert_eq!(config.platform, Platform::C64);
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.history_size, DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            prompt: "push> ".to_string(),
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"platform": "c64", "prompt": "> "}"#).unwrap();

        let args = CliArgs::parse_from([
            "push",
            "--config",
            path.to_str().unwrap(),
            "--platform",
            "zx",
            "--cols",
            "32",
            "--no-hints",
        ]);
        let config = Config::load_with_args(&args).unwrap();
        assert_eq!(config.platform, Platform::Zx);
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.screen.cols, Some(32));
        assert_eq!(config.screen.rows, None);
        assert!(!config.hints);
    }

    #[test]
    fn test_args_missing_config_file() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/push/config.json")),
            ..CliArgs::default()
        };
        assert!(Config::load_with_args(&args).is_err());
    }

    #[test]
    fn test_screen_resolve() {
        let screen = ScreenConfig::default();
        assert_eq!(screen.resolve(None), (40, 25));
        assert_eq!(screen.resolve(Some((80, 24))), (80, 24));

        let forced = ScreenConfig {
            cols: Some(32),
            ..ScreenConfig::default()
        };
        assert_eq!(forced.resolve(Some((80, 24))), (32, 24));
    }
}
