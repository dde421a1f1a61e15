//! Orbit camera around the board.
//!
//! The camera only exists to give the rule engine a view direction and the
//! view a notion of "away". It orbits the board center; it never zooms.

use glam::{IVec3, Quat, Vec3};

use crate::types::{Action, InputSnapshot};

/// Radians turned per frame while a camera key is held
pub const ORBIT_STEP: f32 = 0.1;

/// Orbit moves that bring the view closer to vertical than this are rejected
pub const MAX_VERTICAL_DOT: f32 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    position: Vec3,
    target: Vec3,
    home_position: Vec3,
}

impl OrbitCamera {
    /// Camera at its home pose for a board of the given size
    ///
    /// Home is on the `+x, +z` diagonal at mid-height, looking at the center.
    pub fn for_board(width: i32, depth: i32, height: i32) -> Self {
        let (w, d, h) = (width as f32, depth as f32, height as f32);
        let target = Vec3::new(w / 2.0, h / 2.0, d / 2.0);
        let home_position = Vec3::new(2.5 * w, h / 2.0, 2.5 * d);
        Self {
            position: home_position,
            target,
            home_position,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Unit view direction; what the rule engine calls `view_dir`
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn center(&mut self) {
        self.position = self.home_position;
    }

    /// Turn about the vertical axis through the target
    pub fn orbit_horizontal(&mut self, angle: f32) {
        let offset = self.position - self.target;
        self.position = self.target + Quat::from_rotation_y(angle) * offset;
    }

    /// Raise (positive angle) or lower the camera; returns false if the move
    /// was rejected
    pub fn orbit_vertical(&mut self, angle: f32) -> bool {
        let offset = self.position - self.target;
        let Some(right) = self.forward().cross(Vec3::Y).try_normalize() else {
            return false;
        };
        let next = self.target + Quat::from_axis_angle(right, -angle) * offset;
        let next_forward = (self.target - next).normalize_or_zero();
        if next_forward.y.abs() > MAX_VERTICAL_DOT {
            return false;
        }
        self.position = next;
        true
    }

    /// Apply this frame's camera actions
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        if input.is_pressed(Action::CameraCenter) {
            self.center();
            return;
        }
        if input.is_down(Action::CameraLeft) {
            self.orbit_horizontal(-ORBIT_STEP);
        }
        if input.is_down(Action::CameraRight) {
            self.orbit_horizontal(ORBIT_STEP);
        }
        if input.is_down(Action::CameraUp) {
            self.orbit_vertical(ORBIT_STEP);
        }
        if input.is_down(Action::CameraDown) {
            self.orbit_vertical(-ORBIT_STEP);
        }
    }
}

/// Board axes a view direction resolves to on screen
///
/// `right` is the board axis that runs left to right across the screen and
/// `away` the one that points into it. Both are unit axes along x or z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAxes {
    pub right: IVec3,
    pub away: IVec3,
}

impl ScreenAxes {
    pub fn from_view(view_dir: Vec3) -> Self {
        let flat = Vec3::new(view_dir.x, 0.0, view_dir.z);
        let away = if flat.x.abs() > flat.z.abs() {
            IVec3::new(flat.x.signum() as i32, 0, 0)
        } else if flat.z != 0.0 {
            IVec3::new(0, 0, flat.z.signum() as i32)
        } else {
            IVec3::NEG_Z
        };
        // right = away x up
        let right = IVec3::new(-away.z, 0, away.x);
        Self { right, away }
    }
}
