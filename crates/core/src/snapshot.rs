//! Render snapshot - a read-only copy of what a frame needs to draw
//!
//! Buffers are reused across frames: `snapshot_into` clears and refills them,
//! so after the first frame no allocation happens.

use glam::IVec3;

use crate::block::MAX_CUBES;
use crate::color::{Rgb8, EMPTY_CELL};
use crate::game_state::GameState;
use crate::types::{BlockKind, Phase};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSnapshot {
    pub width: i32,
    pub depth: i32,
    pub height: i32,
    /// Board cells, same layout as [`crate::board::Board::cells`]
    pub cells: Vec<u32>,
    pub block_kind: Option<BlockKind>,
    pub block_color: Rgb8,
    /// World cells of the falling block
    pub block_cells: Vec<IVec3>,
    /// Landing cells of the falling block; empty unless it is falling
    pub ghost_cells: Vec<IVec3>,
    pub phase: Phase,
    pub paused: bool,
    pub total_time: f32,
    pub fall_step_seconds: f32,
    pub normal_fall_step_seconds: f32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.depth = 0;
        self.height = 0;
        self.cells.clear();
        self.block_kind = None;
        self.block_color = Rgb8::default();
        self.block_cells.clear();
        self.ghost_cells.clear();
        self.phase = Phase::Uninitialized;
        self.paused = false;
        self.total_time = 0.0;
        self.fall_step_seconds = 0.0;
        self.normal_fall_step_seconds = 0.0;
    }

    /// Packed settled value at a position, `None` outside the board
    pub fn cell(&self, pos: IVec3) -> Option<u32> {
        if pos.x < 0
            || pos.y < 0
            || pos.z < 0
            || pos.x >= self.width
            || pos.y >= self.height
            || pos.z >= self.depth
        {
            return None;
        }
        let idx = (pos.x * self.depth + pos.z + pos.y * self.width * self.depth) as usize;
        self.cells.get(idx).copied()
    }

    pub fn is_settled(&self, pos: IVec3) -> bool {
        self.cell(pos).is_some_and(|c| c != EMPTY_CELL)
    }

    pub fn is_block_cell(&self, pos: IVec3) -> bool {
        self.block_cells.contains(&pos)
    }

    pub fn is_ghost_cell(&self, pos: IVec3) -> bool {
        self.ghost_cells.contains(&pos)
    }

    pub fn playable(&self) -> bool {
        self.phase != Phase::Lost && !self.paused
    }
}

impl GameState {
    /// Fill `out` from this state, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.depth = self.board.depth();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());

        out.block_cells.clear();
        out.ghost_cells.clear();
        out.block_cells.reserve(MAX_CUBES);
        out.ghost_cells.reserve(MAX_CUBES);
        match &self.falling_block {
            Some(block) => {
                out.block_kind = Some(block.kind());
                out.block_color = block.color();
                out.block_cells.extend(block.cells());
                if self.phase == Phase::BlockFalling {
                    out.ghost_cells
                        .extend(block.drop_projection(&self.board).cells());
                }
            }
            None => {
                out.block_kind = None;
                out.block_color = Rgb8::default();
            }
        }

        out.phase = self.phase;
        out.paused = self.paused;
        out.total_time = self.total_time;
        out.fall_step_seconds = self.block_current_speed;
        out.normal_fall_step_seconds = self.block_current_normal_speed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
