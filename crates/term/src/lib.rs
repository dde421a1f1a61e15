//! Terminal front end for the 3D board.
//!
//! Renders into a plain framebuffer that is diffed and flushed to the
//! terminal, with no widget toolkit in between. Also owns the orbit camera,
//! since the camera exists only to give the rule engine and the view a
//! direction to look from.
//!
//! Cells are drawn 2 columns wide to offset the terminal glyph aspect ratio.

pub mod camera;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris3d_core as core;
pub use tetris3d_types as types;

pub use camera::{OrbitCamera, ScreenAxes};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{backdrop, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
