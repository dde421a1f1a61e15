//! Application configuration: TOML file plus command line overrides.
//!
//! ```toml
//! frame_ms = 16
//! log_file = "tetris3d.log"
//! log_level = "debug"
//!
//! [game]
//! seed = 7
//! board_width = 5
//!
//! [keys]
//! tilt_away = "i"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use serde::Deserialize;

use crate::core::GameConfig;
use crate::input::{KeyBindings, KeyMap};
use crate::types::FRAME_MS;

/// Command line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tetris3d", version, about = "Falling blocks in a 3D grid, in the terminal")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Random seed (overrides the file)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Board width along x
    #[arg(long)]
    pub width: Option<u32>,

    /// Board depth along z
    #[arg(long)]
    pub depth: Option<u32>,

    /// Board height in layers
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub keys: KeyBindings,
    /// Target frame duration in milliseconds
    pub frame_ms: u64,
    pub log_file: PathBuf,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            keys: KeyBindings::default(),
            frame_ms: FRAME_MS,
            log_file: PathBuf::from("tetris3d.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the file named on the command line (if any), apply the flag
    /// overrides and validate the result
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.game.seed = seed;
        }
        if let Some(width) = cli.width {
            self.game.board_width = width;
        }
        if let Some(depth) = cli.depth {
            self.game.board_depth = depth;
        }
        if let Some(height) = cli.height {
            self.game.board_height = height;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("invalid [game] config")?;
        self.key_map()?;
        self.level_filter()?;
        anyhow::ensure!(self.frame_ms > 0, "frame_ms must be positive");
        Ok(())
    }

    pub fn key_map(&self) -> Result<KeyMap> {
        self.keys.resolve().context("invalid [keys] config")
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| anyhow::anyhow!("unknown log_level {:?}", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.frame_ms, 16);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::from_toml("[game]\nseed = 3\nboard_width = 9\n").unwrap();
        let cli = Cli {
            seed: Some(11),
            height: Some(12),
            ..Cli::default()
        };
        config.apply_overrides(&cli);
        assert_eq!(config.game.seed, 11);
        assert_eq!(config.game.board_width, 9);
        assert_eq!(config.game.board_height, 12);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config = AppConfig::from_toml("log_level = \"loud\"").unwrap();
        assert!(config.validate().is_err());
    }
}
