//! Game state module - everything one session mutates
//!
//! `GameState` is plain data: the board, the live falling block, the phase,
//! the pause flag and the fall/ramp timers. The rules that drive it live in
//! [`crate::logic`].

use crate::block::Block;
use crate::board::Board;
use crate::config::GameConfig;
use crate::types::Phase;

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    /// The live block; `None` only before the first step. Its cells are never
    /// stored in `board` until it is merged.
    pub falling_block: Option<Block>,
    pub phase: Phase,
    pub paused: bool,

    /// Fall step in effect right now (normal or accelerated)
    pub block_current_speed: f32,
    /// Fall step when not accelerating; ramped every period
    pub block_current_normal_speed: f32,
    pub block_max_fall_step_seconds: f32,
    pub block_speed_inc_multiplier: f32,
    pub block_speed_inc_period_seconds: f32,

    pub seconds_to_next_block_fall: f32,
    pub seconds_from_last_speed_inc: f32,
    /// Unpaused seconds played
    pub total_time: f32,
}

impl GameState {
    /// Create a fresh, uninitialized session
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: config.board(),
            falling_block: None,
            phase: Phase::Uninitialized,
            paused: false,
            block_current_speed: config.block_init_fall_step_seconds,
            block_current_normal_speed: config.block_init_fall_step_seconds,
            block_max_fall_step_seconds: config.block_max_fall_step_seconds,
            block_speed_inc_multiplier: config.block_speed_inc_multiplier,
            block_speed_inc_period_seconds: config.block_speed_inc_period_seconds,
            seconds_to_next_block_fall: config.block_init_fall_step_seconds,
            seconds_from_last_speed_inc: config.block_speed_inc_period_seconds,
            total_time: 0.0,
        }
    }

    pub fn is_lost(&self) -> bool {
        self.phase == Phase::Lost
    }

    /// Where the falling block would land, if there is one
    pub fn ghost_block(&self) -> Option<Block> {
        self.falling_block
            .as_ref()
            .map(|block| block.drop_projection(&self.board))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();
        assert_eq!(state.phase, Phase::Uninitialized);
        assert!(state.falling_block.is_none());
        assert!(!state.paused);
        assert_eq!(state.block_current_speed, 0.5);
        assert_eq!(state.block_current_normal_speed, 0.5);
        assert_eq!(state.seconds_to_next_block_fall, 0.5);
        assert_eq!(state.seconds_from_last_speed_inc, 10.0);
        assert_eq!(state.total_time, 0.0);
        assert!(state.board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_board_sized_from_config() {
        let config = GameConfig {
            board_width: 3,
            board_depth: 5,
            board_height: 4,
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        assert_eq!(state.board.width(), 3);
        assert_eq!(state.board.depth(), 5);
        assert_eq!(state.board.height(), 4);
        assert_eq!(state.board.cells().len(), 60);
    }

    #[test]
    fn test_ghost_requires_block() {
        let state = GameState::default();
        assert!(state.ghost_block().is_none());
    }
}
