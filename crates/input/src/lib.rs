//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto logical [`crate::types::Action`]s through
//! configurable bindings, and collects them into per-frame
//! [`crate::types::InputSnapshot`]s with held state and press edges.

pub mod handler;
pub mod map;

pub use tetris3d_types as types;

pub use handler::InputState;
pub use map::{is_interrupt, key_label, parse_key, KeyBindings, KeyMap, KeyParseError};
