//! Game configuration - board size, timing and seed
//!
//! Deserialized from the `[game]` table of the application config file. Every
//! field has a default, so an empty table (or no file) yields the standard
//! 7x7x18 game.

use serde::Deserialize;
use thiserror::Error;

use crate::board::Board;
use crate::types::{
    DEFAULT_BOARD_DEPTH, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_INIT_FALL_STEP_SECONDS,
    DEFAULT_MAX_FALL_STEP_SECONDS, DEFAULT_SEED, DEFAULT_SPEED_INC_MULTIPLIER,
    DEFAULT_SPEED_INC_PERIOD_SECONDS,
};

/// Largest accepted board dimension along any axis
pub const MAX_BOARD_DIMENSION: u32 = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board {axis} must be between 1 and {max}, got {value}")]
    BoardDimension {
        axis: &'static str,
        value: u32,
        max: u32,
    },
    #[error("{field} must be a positive number of seconds, got {value}")]
    Timing { field: &'static str, value: f32 },
    #[error("block_speed_inc_multiplier must be finite and non-negative, got {0}")]
    Multiplier(f32),
    #[error("max fall step ({max}s) must not be slower than the initial fall step ({init}s)")]
    MaxSlowerThanInit { max: f32, init: f32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u32,
    pub board_width: u32,
    pub board_depth: u32,
    pub board_height: u32,
    pub block_init_fall_step_seconds: f32,
    pub block_max_fall_step_seconds: f32,
    pub block_speed_inc_multiplier: f32,
    pub block_speed_inc_period_seconds: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            board_width: DEFAULT_BOARD_WIDTH,
            board_depth: DEFAULT_BOARD_DEPTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            block_init_fall_step_seconds: DEFAULT_INIT_FALL_STEP_SECONDS,
            block_max_fall_step_seconds: DEFAULT_MAX_FALL_STEP_SECONDS,
            block_speed_inc_multiplier: DEFAULT_SPEED_INC_MULTIPLIER,
            block_speed_inc_period_seconds: DEFAULT_SPEED_INC_PERIOD_SECONDS,
        }
    }
}

fn check_dimension(axis: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_BOARD_DIMENSION {
        return Err(ConfigError::BoardDimension {
            axis,
            value,
            max: MAX_BOARD_DIMENSION,
        });
    }
    Ok(())
}

fn check_seconds(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Timing { field, value });
    }
    Ok(())
}

impl GameConfig {
    /// Check every field; the first problem found is returned
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.board_width)?;
        check_dimension("depth", self.board_depth)?;
        check_dimension("height", self.board_height)?;

        check_seconds("block_init_fall_step_seconds", self.block_init_fall_step_seconds)?;
        check_seconds("block_max_fall_step_seconds", self.block_max_fall_step_seconds)?;
        check_seconds(
            "block_speed_inc_period_seconds",
            self.block_speed_inc_period_seconds,
        )?;

        if !self.block_speed_inc_multiplier.is_finite() || self.block_speed_inc_multiplier < 0.0 {
            return Err(ConfigError::Multiplier(self.block_speed_inc_multiplier));
        }
        if self.block_max_fall_step_seconds > self.block_init_fall_step_seconds {
            return Err(ConfigError::MaxSlowerThanInit {
                max: self.block_max_fall_step_seconds,
                init: self.block_init_fall_step_seconds,
            });
        }
        Ok(())
    }

    /// Build an empty board of the configured size
    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_depth, self.board_height)
    }
}
