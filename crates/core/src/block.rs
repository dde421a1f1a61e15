//! Block module - the falling polycube, its shape table, rotations and kicks
//!
//! A block is an anchor `position` plus a list of cube offsets in object
//! space. The world cell of offset `o` is `position + o`.
//!
//! Every fallible transform follows the same pattern: build the transformed
//! block as a new value, validate it against the board, and only then commit
//! it (see [`Block::try_transform`]). On failure the live block is untouched.

use arrayvec::ArrayVec;
use glam::IVec3;
use log::trace;

use crate::board::Board;
use crate::color::Rgb8;
use crate::rng::GameRng;
use crate::types::BlockKind;

/// Largest cube count of any shape (the 2x2x2 `O`)
pub const MAX_CUBES: usize = 8;

/// Cube offsets of one block, object space
pub type CubeOffsets = ArrayVec<IVec3, MAX_CUBES>;

/// Rounds of cumulative nudging [`Block::try_fix`] attempts per candidate
pub const FIX_ROUNDS: usize = 3;

/// Lowest value of a randomly drawn color channel
pub const MIN_COLOR_CHANNEL: u8 = 10;

const I_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(-2, 0, 0),
    IVec3::new(1, 0, 0),
];

const L_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(1, 1, 0),
];

const J_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 1, 0),
];

const O_SHAPE: [IVec3; 8] = [
    IVec3::new(0, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 1, 1),
    IVec3::new(-1, 0, 1),
    IVec3::new(-1, 1, 1),
];

const S_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(1, 1, 0),
];

const T_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 1, 0),
];

const Z_SHAPE: [IVec3; 4] = [
    IVec3::new(0, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 0, 0),
];

/// Get the unrotated cube offsets of a shape
pub fn shape_offsets(kind: BlockKind) -> &'static [IVec3] {
    match kind {
        BlockKind::I => &I_SHAPE,
        BlockKind::L => &L_SHAPE,
        BlockKind::J => &J_SHAPE,
        BlockKind::O => &O_SHAPE,
        BlockKind::S => &S_SHAPE,
        BlockKind::T => &T_SHAPE,
        BlockKind::Z => &Z_SHAPE,
    }
}

/// How far below the board top a shape's anchor spawns
fn spawn_drop(kind: BlockKind) -> i32 {
    match kind {
        BlockKind::I => 1,
        _ => 2,
    }
}

/// Board axis a rotation turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    pub fn reversed(self) -> Self {
        match self {
            Spin::Clockwise => Spin::CounterClockwise,
            Spin::CounterClockwise => Spin::Clockwise,
        }
    }
}

/// Rotate one offset a quarter turn about a board axis
///
/// Each turn negates one of the two in-plane components and swaps them.
pub fn rotate_offset(o: IVec3, axis: Axis, spin: Spin) -> IVec3 {
    match (axis, spin) {
        (Axis::X, Spin::Clockwise) => IVec3::new(o.x, o.z, -o.y),
        (Axis::X, Spin::CounterClockwise) => IVec3::new(o.x, -o.z, o.y),
        (Axis::Y, Spin::Clockwise) => IVec3::new(-o.z, o.y, o.x),
        (Axis::Y, Spin::CounterClockwise) => IVec3::new(o.z, o.y, -o.x),
        (Axis::Z, Spin::Clockwise) => IVec3::new(o.y, -o.x, o.z),
        (Axis::Z, Spin::CounterClockwise) => IVec3::new(-o.y, o.x, o.z),
    }
}

/// A proposed change to the falling block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Translate(IVec3),
    Rotate(Axis, Spin),
}

/// Result of a try-transform
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The transformed block was valid as is
    Applied,
    /// The rotation was only valid after a horizontal nudge of `by`
    Kicked { by: IVec3 },
    /// Nothing valid was found; the block is unchanged
    Blocked,
}

impl MoveOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, MoveOutcome::Blocked)
    }
}

/// The falling block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    kind: BlockKind,
    position: IVec3,
    offsets: CubeOffsets,
    color: Rgb8,
}

impl Block {
    /// Create a block with its unrotated shape at an explicit anchor
    pub fn new(kind: BlockKind, color: Rgb8, position: IVec3) -> Self {
        Self {
            kind,
            position,
            offsets: shape_offsets(kind).iter().copied().collect(),
            color,
        }
    }

    /// Create a block at the spawn point of `board`
    ///
    /// The anchor starts at the horizontal center of the top of the board,
    /// lowered by the shape's own height. While the block overlaps settled
    /// cells it is pushed up one cell at a time, possibly above the board. A
    /// block pushed out of the grid is still returned; the step machine
    /// detects the loss.
    pub fn create(kind: BlockKind, color: Rgb8, board: &Board) -> Self {
        let anchor = IVec3::new(board.width() / 2, board.height(), board.depth() / 2)
            - IVec3::new(0, spawn_drop(kind), 0);
        let mut block = Self::new(kind, color, anchor);

        while block.is_colliding_with_other_blocks(board) {
            block.translate(IVec3::Y);
        }
        block
    }

    /// Create a block of uniformly random shape and color
    ///
    /// Channels are drawn from `[10, 255]`; pure black would pack to the
    /// empty-cell value and is redrawn.
    pub fn create_random(board: &Board, rng: &mut GameRng) -> Self {
        let kind = rng.pick(&BlockKind::ALL);
        let color = loop {
            let c = Rgb8::new(
                rng.next_in(MIN_COLOR_CHANNEL, u8::MAX),
                rng.next_in(MIN_COLOR_CHANNEL, u8::MAX),
                rng.next_in(MIN_COLOR_CHANNEL, u8::MAX),
            );
            if !c.is_black() {
                break c;
            }
        };
        Self::create(kind, color, board)
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn position(&self) -> IVec3 {
        self.position
    }

    pub fn color(&self) -> Rgb8 {
        self.color
    }

    pub fn cube_offsets(&self) -> &[IVec3] {
        &self.offsets
    }

    /// World positions of all cubes
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.offsets.iter().map(move |&o| self.position + o)
    }

    /// Element-wise `(min, max)` over all world cells
    pub fn world_bounds(&self) -> (IVec3, IVec3) {
        self.cells().fold(
            (IVec3::splat(i32::MAX), IVec3::splat(i32::MIN)),
            |(min, max), cell| (min.min(cell), max.max(cell)),
        )
    }

    pub fn translate(&mut self, by: IVec3) {
        self.position += by;
    }

    /// Quarter-turn every offset; the `O` cube never rotates
    pub fn rotate(&mut self, axis: Axis, spin: Spin) {
        if self.kind == BlockKind::O {
            return;
        }
        for offset in self.offsets.iter_mut() {
            *offset = rotate_offset(*offset, axis, spin);
        }
    }

    pub fn apply(&mut self, transform: Transform) {
        match transform {
            Transform::Translate(by) => self.translate(by),
            Transform::Rotate(axis, spin) => self.rotate(axis, spin),
        }
    }

    pub fn translated(&self, by: IVec3) -> Self {
        let mut next = self.clone();
        next.translate(by);
        next
    }

    pub fn rotated(&self, axis: Axis, spin: Spin) -> Self {
        let mut next = self.clone();
        next.rotate(axis, spin);
        next
    }

    pub fn transformed(&self, transform: Transform) -> Self {
        let mut next = self.clone();
        next.apply(transform);
        next
    }

    /// Every cube is inside the board and on an empty cell
    pub fn is_valid(&self, board: &Board) -> bool {
        self.cells()
            .all(|cell| board.contains(cell) && board.is_empty(cell))
    }

    /// Some cube overlaps a settled cell; cubes outside the board are ignored
    pub fn is_colliding_with_other_blocks(&self, board: &Board) -> bool {
        self.cells()
            .any(|cell| board.contains(cell) && !board.is_empty(cell))
    }

    /// Apply a transform if the result is valid
    pub fn try_transform(&mut self, board: &Board, transform: Transform) -> MoveOutcome {
        let proposal = self.propose(board, transform, false);
        self.commit(proposal)
    }

    /// Apply a transform, falling back to [`Block::try_fix`] if the result is
    /// invalid
    pub fn try_transform_with_fix(&mut self, board: &Board, transform: Transform) -> MoveOutcome {
        let proposal = self.propose(board, transform, true);
        self.commit(proposal)
    }

    pub fn try_translate(&mut self, board: &Board, by: IVec3) -> bool {
        self.try_transform(board, Transform::Translate(by)).succeeded()
    }

    pub fn try_rotate(&mut self, board: &Board, axis: Axis, spin: Spin) -> bool {
        self.try_transform(board, Transform::Rotate(axis, spin))
            .succeeded()
    }

    pub fn try_rotate_with_fix(&mut self, board: &Board, axis: Axis, spin: Spin) -> bool {
        self.try_transform_with_fix(board, Transform::Rotate(axis, spin))
            .succeeded()
    }

    fn propose(
        &self,
        board: &Board,
        transform: Transform,
        with_fix: bool,
    ) -> Option<(Self, MoveOutcome)> {
        let next = self.transformed(transform);
        if next.is_valid(board) {
            return Some((next, MoveOutcome::Applied));
        }
        if !with_fix {
            return None;
        }
        let fixed = next.try_fix(board, self)?;
        let by = fixed.position - next.position;
        trace!("{:?} kicked by {by} after {transform:?}", self.kind);
        Some((fixed, MoveOutcome::Kicked { by }))
    }

    fn commit(&mut self, proposal: Option<(Self, MoveOutcome)>) -> MoveOutcome {
        match proposal {
            Some((next, outcome)) => {
                *self = next;
                outcome
            }
            None => MoveOutcome::Blocked,
        }
    }

    /// Try to recover an invalid (just rotated) block by nudging it back
    /// toward `prev`, its last valid state
    ///
    /// Only horizontal unit nudges are considered, one candidate per direction
    /// in which the bounding box moved relative to `prev`, in the order
    /// `+x, -x, +z, -z`. Each round pushes every candidate one more cell; the
    /// first valid candidate wins. Gives up after [`FIX_ROUNDS`] rounds.
    pub fn try_fix(&self, board: &Board, prev: &Block) -> Option<Self> {
        debug_assert!(!self.is_valid(board));

        let (min, max) = self.world_bounds();
        let (prev_min, prev_max) = prev.world_bounds();

        let mut nudges: ArrayVec<IVec3, 4> = ArrayVec::new();
        if min.x < prev_min.x || max.x < prev_max.x {
            nudges.push(IVec3::X);
        }
        if min.x > prev_min.x || max.x > prev_max.x {
            nudges.push(IVec3::NEG_X);
        }
        if min.z < prev_min.z || max.z < prev_max.z {
            nudges.push(IVec3::Z);
        }
        if min.z > prev_min.z || max.z > prev_max.z {
            nudges.push(IVec3::NEG_Z);
        }

        let mut candidates: ArrayVec<Self, 4> = nudges.iter().map(|_| self.clone()).collect();
        for _ in 0..FIX_ROUNDS {
            for (candidate, &nudge) in candidates.iter_mut().zip(nudges.iter()) {
                candidate.translate(nudge);
                if candidate.is_valid(board) {
                    return Some(candidate.clone());
                }
            }
        }
        None
    }

    /// Where the block would come to rest if dropped straight down
    ///
    /// Returns the block itself if it cannot move down at all.
    pub fn drop_projection(&self, board: &Board) -> Self {
        let mut ghost = self.clone();
        loop {
            let next = ghost.translated(IVec3::NEG_Y);
            if !next.is_valid(board) {
                return ghost;
            }
            ghost = next;
        }
    }
}
