//! Shared types module - data structures and constants used across the workspace
//!
//! Everything here is plain data with no external dependencies, so it can be used
//! by the simulation core, the terminal front end and tests alike.
//!
//! # Board Dimensions
//!
//! The playfield is a `width x depth x height` grid. `y` is the vertical axis
//! (layer index, 0 = floor); `x` and `z` span each horizontal layer.
//!
//! - **Width**: 7 cells along x
//! - **Depth**: 7 cells along z
//! - **Height**: 18 layers along y
//!
//! # Timing Defaults
//!
//! Timing values are in seconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_INIT_FALL_STEP_SECONDS` | 0.5 | Fall step of a fresh game |
//! | `DEFAULT_MAX_FALL_STEP_SECONDS` | 0.04 | Fall step while accelerating |
//! | `DEFAULT_SPEED_INC_MULTIPLIER` | 0.02 | Relative ramp applied each period |
//! | `DEFAULT_SPEED_INC_PERIOD_SECONDS` | 10 | Seconds between ramps |
//!
//! # Examples
//!
//! ```
//! use tetris3d_types::{Action, BlockKind, InputSnapshot};
//!
//! let kind = BlockKind::from_str("t").unwrap();
//! assert_eq!(kind, BlockKind::T);
//!
//! let input = InputSnapshot::new().with_pressed(Action::Pause);
//! assert!(input.is_pressed(Action::Pause));
//! assert!(input.is_down(Action::Pause));
//! assert!(!input.is_down(Action::Accelerate));
//! ```

/// Default board width (cells along x)
pub const DEFAULT_BOARD_WIDTH: u32 = 7;

/// Default board depth (cells along z)
pub const DEFAULT_BOARD_DEPTH: u32 = 7;

/// Default board height (layers along y)
pub const DEFAULT_BOARD_HEIGHT: u32 = 18;

/// Seconds between two falls at the start of a game
pub const DEFAULT_INIT_FALL_STEP_SECONDS: f32 = 0.5;

/// Seconds between two falls while the accelerate action is held
pub const DEFAULT_MAX_FALL_STEP_SECONDS: f32 = 1.0 / 25.0;

/// Relative change applied to the normal fall step every ramp period
pub const DEFAULT_SPEED_INC_MULTIPLIER: f32 = 0.02;

/// Seconds between two fall step ramps
pub const DEFAULT_SPEED_INC_PERIOD_SECONDS: f32 = 10.0;

/// Seed used when none is configured
pub const DEFAULT_SEED: u32 = 42;

/// Host frame duration in milliseconds (~60 FPS)
pub const FRAME_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        assert_eq!(DEFAULT_INIT_FALL_STEP_SECONDS, 0.5);
        assert_eq!(DEFAULT_MAX_FALL_STEP_SECONDS, 0.04);
        assert_eq!(DEFAULT_SPEED_INC_MULTIPLIER, 0.02);
        assert_eq!(DEFAULT_SPEED_INC_PERIOD_SECONDS, 10.0);
        assert!(DEFAULT_MAX_FALL_STEP_SECONDS < DEFAULT_INIT_FALL_STEP_SECONDS);
    }

    #[test]
    fn test_action_round_trips_through_names() {
        for action in Action::ALL {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_str("unknown"), None);
    }

    #[test]
    fn test_action_indices_are_dense() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        assert!(Action::COUNT <= 32);
    }

    #[test]
    fn test_input_snapshot_edges_imply_down() {
        let mut input = InputSnapshot::new();
        input.set_pressed(Action::TiltAway);
        assert!(input.is_pressed(Action::TiltAway));
        assert!(input.is_down(Action::TiltAway));

        input.set_down(Action::Accelerate);
        assert!(input.is_down(Action::Accelerate));
        assert!(!input.is_pressed(Action::Accelerate));

        input.clear();
        assert!(input.is_empty());
    }
}

/// The seven block shapes
///
/// Six are flat tetrominoes (4 cubes); `O` is a 2x2x2 cube (8 cubes) and the
/// only shape that does not rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    I,
    L,
    J,
    O,
    S,
    T,
    Z,
}

impl BlockKind {
    /// All shapes, in the order used for random selection
    pub const ALL: [BlockKind; 7] = [
        BlockKind::I,
        BlockKind::L,
        BlockKind::J,
        BlockKind::O,
        BlockKind::S,
        BlockKind::T,
        BlockKind::Z,
    ];

    /// Parse block kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris3d_types::BlockKind;
    ///
    /// assert_eq!(BlockKind::from_str("i"), Some(BlockKind::I));
    /// assert_eq!(BlockKind::from_str("O"), Some(BlockKind::O));
    /// assert_eq!(BlockKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(BlockKind::I),
            "l" => Some(BlockKind::L),
            "j" => Some(BlockKind::J),
            "o" => Some(BlockKind::O),
            "s" => Some(BlockKind::S),
            "t" => Some(BlockKind::T),
            "z" => Some(BlockKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::I => "i",
            BlockKind::L => "l",
            BlockKind::J => "j",
            BlockKind::O => "o",
            BlockKind::S => "s",
            BlockKind::T => "t",
            BlockKind::Z => "z",
        }
    }
}

/// Discrete state of the step rule machine
///
/// ```text
/// Uninitialized -> NewBlockCreation -> BlockFalling (repeats) -> BlockMerge
///     -> [LayersErase] -> NewBlockCreation -> ...
/// ```
///
/// `Lost` is reachable from the fall check and absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    NewBlockCreation,
    BlockFalling,
    BlockMerge,
    /// One-step feedback phase after at least one layer was cleared
    LayersErase,
    Lost,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::NewBlockCreation => "new block",
            Phase::BlockFalling => "falling",
            Phase::BlockMerge => "merge",
            Phase::LayersErase => "layers erased",
            Phase::Lost => "lost",
        }
    }
}

/// Logical input actions
///
/// Gameplay actions are interpreted by the rule engine; camera and quit
/// actions are handled by the host. Physical keys are bound to these by
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate the block about the vertical axis, visually clockwise
    RotateClockwise,
    /// Rotate the block about the vertical axis, visually counter-clockwise
    RotateCounterClockwise,
    /// Tip the block over, top away from the camera
    TiltAway,
    /// Tip the block over, top towards the camera
    TiltTowards,
    /// Move the block one cell away from the camera
    MoveAway,
    /// Move the block one cell towards the camera
    MoveTowards,
    /// Fall at maximum speed while held
    Accelerate,
    /// Toggle pause
    Pause,
    CameraLeft,
    CameraRight,
    CameraUp,
    CameraDown,
    CameraCenter,
    Quit,
}

impl Action {
    pub const COUNT: usize = 14;

    pub const ALL: [Action; Action::COUNT] = [
        Action::RotateClockwise,
        Action::RotateCounterClockwise,
        Action::TiltAway,
        Action::TiltTowards,
        Action::MoveAway,
        Action::MoveTowards,
        Action::Accelerate,
        Action::Pause,
        Action::CameraLeft,
        Action::CameraRight,
        Action::CameraUp,
        Action::CameraDown,
        Action::CameraCenter,
        Action::Quit,
    ];

    /// Dense index in `0..Action::COUNT`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse action from its configuration name
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris3d_types::Action;
    ///
    /// assert_eq!(Action::from_str("tiltAway"), Some(Action::TiltAway));
    /// assert_eq!(Action::from_str("accelerate"), Some(Action::Accelerate));
    /// assert_eq!(Action::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotateclockwise" => Some(Action::RotateClockwise),
            "rotatecounterclockwise" => Some(Action::RotateCounterClockwise),
            "tiltaway" => Some(Action::TiltAway),
            "tilttowards" => Some(Action::TiltTowards),
            "moveaway" => Some(Action::MoveAway),
            "movetowards" => Some(Action::MoveTowards),
            "accelerate" => Some(Action::Accelerate),
            "pause" => Some(Action::Pause),
            "cameraleft" => Some(Action::CameraLeft),
            "cameraright" => Some(Action::CameraRight),
            "cameraup" => Some(Action::CameraUp),
            "cameradown" => Some(Action::CameraDown),
            "cameracenter" => Some(Action::CameraCenter),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RotateClockwise => "rotateClockwise",
            Action::RotateCounterClockwise => "rotateCounterClockwise",
            Action::TiltAway => "tiltAway",
            Action::TiltTowards => "tiltTowards",
            Action::MoveAway => "moveAway",
            Action::MoveTowards => "moveTowards",
            Action::Accelerate => "accelerate",
            Action::Pause => "pause",
            Action::CameraLeft => "cameraLeft",
            Action::CameraRight => "cameraRight",
            Action::CameraUp => "cameraUp",
            Action::CameraDown => "cameraDown",
            Action::CameraCenter => "cameraCenter",
            Action::Quit => "quit",
        }
    }

    fn bit(&self) -> u32 {
        1 << self.index()
    }
}

/// Input state for one frame
///
/// - **down**: the action's key is currently held
/// - **pressed**: the key went from up to down during this frame (edge)
///
/// A pressed action is always also down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputSnapshot {
    down: u32,
    pressed: u32,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.down & action.bit() != 0
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    pub fn set_down(&mut self, action: Action) {
        self.down |= action.bit();
    }

    pub fn set_pressed(&mut self, action: Action) {
        self.down |= action.bit();
        self.pressed |= action.bit();
    }

    pub fn with_down(mut self, action: Action) -> Self {
        self.set_down(action);
        self
    }

    pub fn with_pressed(mut self, action: Action) -> Self {
        self.set_pressed(action);
        self
    }

    pub fn clear(&mut self) {
        self.down = 0;
        self.pressed = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.down == 0 && self.pressed == 0
    }
}
