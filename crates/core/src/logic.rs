//! Rule engine - per-frame update and the discrete step machine
//!
//! [`GameLogic::update`] is called once per frame with the elapsed time, the
//! frame's input and the camera's forward vector. It maps view-relative
//! actions ("tilt away", "move towards") onto board axes, runs the fall and
//! ramp timers, and calls [`GameLogic::single_step`] whenever the fall timer
//! expires.
//!
//! # Step machine
//!
//! ```text
//! Uninitialized -> NewBlockCreation -> BlockFalling -> ... -> BlockMerge
//!                        ^                                      |
//!                        +---------- [LayersErase] <------------+
//! ```
//!
//! A block that cannot fall is merged, unless it is already invalid (it was
//! pushed above the settled cells at spawn), in which case the game is `Lost`.
//! `Lost` is absorbing.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::{IVec3, Vec3};
use log::{debug, info, trace};

use crate::block::{Axis, Block, Spin, Transform};
use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::rng::GameRng;
use crate::types::{Action, InputSnapshot, Phase};

/// Owns a session's state and its random source
#[derive(Debug, Clone)]
pub struct GameLogic {
    state: GameState,
    rng: GameRng,
}

impl GameLogic {
    /// Start a session; `config` is expected to have passed
    /// [`GameConfig::validate`]
    pub fn new(config: &GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated game config");
        Self {
            state: GameState::new(config),
            rng: GameRng::new(config.seed),
        }
    }

    /// Wrap an existing state, e.g. a hand-built board
    pub fn with_state(state: GameState, seed: u32) -> Self {
        Self {
            state,
            rng: GameRng::new(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The game is over; only the host's quit remains meaningful
    pub fn is_finished(&self) -> bool {
        self.state.is_lost()
    }

    /// Advance one frame
    ///
    /// Does nothing but toggle pause while paused or after a loss; time only
    /// accumulates while the game runs.
    pub fn update(&mut self, elapsed_seconds: f32, input: &InputSnapshot, view_dir: Vec3) {
        debug_assert!(elapsed_seconds >= 0.0);

        if input.is_pressed(Action::Pause) {
            self.state.paused = !self.state.paused;
            debug!("paused: {}", self.state.paused);
        }
        if self.state.is_lost() || self.state.paused {
            return;
        }

        if input.is_pressed(Action::RotateClockwise) {
            self.rotate_falling_block(Axis::Y, horizontal_spin(view_dir, Spin::Clockwise));
        }
        if input.is_pressed(Action::RotateCounterClockwise) {
            self.rotate_falling_block(Axis::Y, horizontal_spin(view_dir, Spin::CounterClockwise));
        }
        if input.is_pressed(Action::TiltAway) {
            let (axis, spin) = tilt_rotation(view_dir, Facing::Away);
            self.rotate_falling_block(axis, spin);
        }
        if input.is_pressed(Action::TiltTowards) {
            let (axis, spin) = tilt_rotation(view_dir, Facing::Towards);
            self.rotate_falling_block(axis, spin);
        }
        if input.is_pressed(Action::MoveAway) {
            self.move_falling_block(move_direction(view_dir, Facing::Away));
        }
        if input.is_pressed(Action::MoveTowards) {
            self.move_falling_block(move_direction(view_dir, Facing::Towards));
        }

        let state = &mut self.state;
        if input.is_down(Action::Accelerate) {
            state.block_current_speed = state.block_max_fall_step_seconds;
            state.seconds_to_next_block_fall = state
                .seconds_to_next_block_fall
                .min(state.block_current_speed);
        } else {
            state.block_current_speed = state.block_current_normal_speed;
        }

        state.seconds_to_next_block_fall -= elapsed_seconds;
        state.seconds_from_last_speed_inc -= elapsed_seconds;

        if self.state.seconds_to_next_block_fall < 0.0 {
            self.single_step();
            // Merge, erase and spawn leave the timer expired so the chain
            // continues on the next frame.
            if self.state.phase == Phase::BlockFalling {
                self.state.seconds_to_next_block_fall = self.state.block_current_speed;
            }
        }

        let state = &mut self.state;
        if state.seconds_from_last_speed_inc < 0.0 {
            state.block_current_normal_speed +=
                state.block_speed_inc_multiplier * state.block_current_normal_speed;
            state.seconds_from_last_speed_inc = state.block_speed_inc_period_seconds;
            debug!("fall step ramped to {:.4}s", state.block_current_normal_speed);
        }

        state.total_time += elapsed_seconds;
    }

    /// Run one transition of the step machine
    pub fn single_step(&mut self) {
        match self.state.phase {
            Phase::Lost => return,
            Phase::Uninitialized | Phase::LayersErase => {
                self.spawn_block();
                return;
            }
            Phase::BlockMerge => {
                let erased = self.state.board.erase_filled_layers();
                if erased > 0 {
                    info!("erased {erased} layer(s)");
                    self.state.phase = Phase::LayersErase;
                } else {
                    self.spawn_block();
                }
                return;
            }
            Phase::NewBlockCreation | Phase::BlockFalling => {}
        }

        let Some(block) = self.state.falling_block.as_ref() else {
            self.spawn_block();
            return;
        };

        if self.can_falling_block_fall() {
            if let Some(block) = self.state.falling_block.as_mut() {
                block.translate(IVec3::NEG_Y);
            }
            self.state.phase = Phase::BlockFalling;
        } else if !block.is_valid(&self.state.board) {
            info!(
                "lost after {:.1}s: {:?} stuck at {}",
                self.state.total_time,
                block.kind(),
                block.position()
            );
            self.state.phase = Phase::Lost;
        } else {
            self.merge_falling_block();
            self.state.phase = Phase::BlockMerge;
        }
    }

    /// Every cube can move one cell down
    ///
    /// A target below the floor or on a settled cell blocks the fall. Targets
    /// above the board top are exempt so a block pushed up at spawn keeps
    /// falling until it re-enters the grid.
    pub fn can_falling_block_fall(&self) -> bool {
        let board = &self.state.board;
        let Some(block) = self.state.falling_block.as_ref() else {
            return false;
        };
        block.cells().all(|cell| {
            let below = cell + IVec3::NEG_Y;
            if below.y < 0 {
                return false;
            }
            if below.y >= board.height() {
                return true;
            }
            board.contains(below) && board.is_empty(below)
        })
    }

    /// Write the falling block's color into the board at every cube
    pub fn merge_falling_block(&mut self) {
        let state = &mut self.state;
        let Some(block) = state.falling_block.as_ref() else {
            return;
        };
        let value = block.color().pack();
        for cell in block.cells() {
            state.board.fill(cell, value);
        }
        trace!("merged {:?} at {}", block.kind(), block.position());
    }

    fn spawn_block(&mut self) {
        let block = Block::create_random(&self.state.board, &mut self.rng);
        debug!("spawned {:?} at {}", block.kind(), block.position());
        self.state.falling_block = Some(block);
        self.state.phase = Phase::NewBlockCreation;
    }

    fn rotate_falling_block(&mut self, axis: Axis, spin: Spin) {
        let state = &mut self.state;
        if let Some(block) = state.falling_block.as_mut() {
            let outcome = block.try_transform_with_fix(&state.board, Transform::Rotate(axis, spin));
            trace!("rotate {axis:?} {spin:?}: {outcome:?}");
        }
    }

    fn move_falling_block(&mut self, by: IVec3) {
        let state = &mut self.state;
        if let Some(block) = state.falling_block.as_mut() {
            let outcome = block.try_transform(&state.board, Transform::Translate(by));
            trace!("move {by}: {outcome:?}");
        }
    }
}

/// View-relative direction of a tilt or move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Away,
    Towards,
}

/// Spin about Y that looks like `visual` on screen
///
/// Seen from below the board, clockwise and counter-clockwise swap.
pub fn horizontal_spin(view_dir: Vec3, visual: Spin) -> Spin {
    if view_dir.y < 0.0 {
        visual
    } else {
        visual.reversed()
    }
}

/// The camera looks more along z than along x
///
/// Uses a 45 degree boundary on the horizontal part of the view. A view with
/// no horizontal part counts as looking along x.
fn looks_along_z(view_dir: Vec3) -> bool {
    match Vec3::new(view_dir.x, 0.0, view_dir.z).try_normalize() {
        Some(flat) => flat.x.abs() < FRAC_1_SQRT_2,
        None => false,
    }
}

/// Board rotation that tips the block's top away from or towards the camera
pub fn tilt_rotation(view_dir: Vec3, facing: Facing) -> (Axis, Spin) {
    if looks_along_z(view_dir) {
        let clockwise = match facing {
            Facing::Away => view_dir.z < 0.0,
            Facing::Towards => view_dir.z > 0.0,
        };
        (Axis::X, if clockwise { Spin::Clockwise } else { Spin::CounterClockwise })
    } else {
        let counter = match facing {
            Facing::Away => view_dir.x < 0.0,
            Facing::Towards => view_dir.x > 0.0,
        };
        (Axis::Z, if counter { Spin::CounterClockwise } else { Spin::Clockwise })
    }
}

/// Unit board step away from or towards the camera
pub fn move_direction(view_dir: Vec3, facing: Facing) -> IVec3 {
    if looks_along_z(view_dir) {
        let negative = match facing {
            Facing::Away => view_dir.z < 0.0,
            Facing::Towards => view_dir.z > 0.0,
        };
        if negative {
            IVec3::NEG_Z
        } else {
            IVec3::Z
        }
    } else {
        let negative = match facing {
            Facing::Away => view_dir.x < 0.0,
            Facing::Towards => view_dir.x > 0.0,
        };
        if negative {
            IVec3::NEG_X
        } else {
            IVec3::X
        }
    }
}
