//! 3D falling-block puzzle (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the
//! application configuration shared by the binary and the integration tests.

pub mod config;

pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_term as term;
pub use tetris3d_types as types;
