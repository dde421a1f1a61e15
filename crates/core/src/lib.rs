//! Core game logic module - the 3D falling-block rule engine
//!
//! Pure, deterministic simulation with no terminal, input or file I/O:
//!
//! - **Deterministic**: the same seed and the same inputs replay a session exactly
//! - **Testable**: every rule is reachable through plain function calls
//! - **Allocation-free hot path**: blocks live in fixed-capacity arrays
//!
//! # Module Structure
//!
//! - [`color`]: packing 8-bit RGB into board cell values
//! - [`board`]: the `width x depth x height` grid with layer erase
//! - [`block`]: shape table, quarter-turn rotations, try-transform and kicks
//! - [`rng`]: owned, seedable random source for spawning
//! - [`config`]: board size, timing and seed with validation
//! - [`game_state`]: board, falling block, phase and timers
//! - [`logic`]: per-frame update and the step machine
//! - [`snapshot`]: read-only render surface
//!
//! # Coordinates
//!
//! `y` is up (layer 0 is the floor); `x` and `z` span a layer. New blocks
//! appear at the horizontal center near the top and fall along `-y`.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use tetris3d_core::{GameConfig, GameLogic, Phase};
//! use tetris3d_types::InputSnapshot;
//!
//! let mut logic = GameLogic::new(&GameConfig::default());
//! let view = Vec3::new(-1.0, -0.5, -1.0).normalize();
//!
//! // The first expired fall timer spawns a block
//! for _ in 0..40 {
//!     logic.update(1.0 / 60.0, &InputSnapshot::new(), view);
//! }
//! assert_ne!(logic.phase(), Phase::Uninitialized);
//! assert!(logic.state().falling_block.is_some());
//! ```

pub mod block;
pub mod board;
pub mod color;
pub mod config;
pub mod game_state;
pub mod logic;
pub mod rng;
pub mod snapshot;

pub use tetris3d_types as types;

pub use block::{Axis, Block, MoveOutcome, Spin, Transform};
pub use board::Board;
pub use color::{pack, unpack, Rgb8, Rgba, EMPTY_CELL};
pub use config::{ConfigError, GameConfig};
pub use game_state::GameState;
pub use logic::{Facing, GameLogic};
pub use rng::GameRng;
pub use snapshot::GameSnapshot;
pub use types::{Action, BlockKind, InputSnapshot, Phase};
