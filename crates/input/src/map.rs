//! Key bindings - configurable mapping from terminal keys to logical actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use crate::types::Action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key name for {0}")]
    Empty(&'static str),
    #[error("unknown key name {name:?} for {action}")]
    Unknown { action: &'static str, name: String },
    #[error("key {name:?} is bound to both {first} and {second}")]
    Duplicate {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Key names per action, as written in the `[keys]` config table
///
/// Names are single characters (`"w"`, case-insensitive) or one of `space`,
/// `enter`, `tab`, `esc`, `backspace`, `left`, `right`, `up`, `down`, `f1`..`f12`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotate_clockwise: String,
    pub rotate_counter_clockwise: String,
    pub tilt_away: String,
    pub tilt_towards: String,
    pub move_away: String,
    pub move_towards: String,
    pub accelerate: String,
    pub pause: String,
    pub camera_left: String,
    pub camera_right: String,
    pub camera_up: String,
    pub camera_down: String,
    pub camera_center: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate_clockwise: "a".into(),
            rotate_counter_clockwise: "d".into(),
            tilt_away: "w".into(),
            tilt_towards: "s".into(),
            move_away: "q".into(),
            move_towards: "e".into(),
            accelerate: "space".into(),
            pause: "p".into(),
            camera_left: "left".into(),
            camera_right: "right".into(),
            camera_up: "up".into(),
            camera_down: "down".into(),
            camera_center: "c".into(),
            quit: "esc".into(),
        }
    }
}

impl KeyBindings {
    /// Configured key name for an action
    pub fn name_for(&self, action: Action) -> &str {
        match action {
            Action::RotateClockwise => &self.rotate_clockwise,
            Action::RotateCounterClockwise => &self.rotate_counter_clockwise,
            Action::TiltAway => &self.tilt_away,
            Action::TiltTowards => &self.tilt_towards,
            Action::MoveAway => &self.move_away,
            Action::MoveTowards => &self.move_towards,
            Action::Accelerate => &self.accelerate,
            Action::Pause => &self.pause,
            Action::CameraLeft => &self.camera_left,
            Action::CameraRight => &self.camera_right,
            Action::CameraUp => &self.camera_up,
            Action::CameraDown => &self.camera_down,
            Action::CameraCenter => &self.camera_center,
            Action::Quit => &self.quit,
        }
    }

    /// Parse every name; fails on unknown names or a key bound twice
    pub fn resolve(&self) -> Result<KeyMap, KeyParseError> {
        let mut keys = [KeyCode::Null; Action::COUNT];
        for action in Action::ALL {
            let code = parse_key(action.as_str(), self.name_for(action))?;
            if let Some(first) = Action::ALL[..action.index()]
                .iter()
                .find(|a| keys[a.index()] == code)
            {
                return Err(KeyParseError::Duplicate {
                    name: self.name_for(action).to_string(),
                    first: first.as_str(),
                    second: action.as_str(),
                });
            }
            keys[action.index()] = code;
        }
        Ok(KeyMap { keys })
    }
}

/// Parse a key name into a crossterm key code
pub fn parse_key(action: &'static str, name: &str) -> Result<KeyCode, KeyParseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(KeyParseError::Empty(action));
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => {
                return Err(KeyParseError::Unknown {
                    action,
                    name: name.to_string(),
                })
            }
        },
    };
    Ok(code)
}

/// Resolved bindings, one key per action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    keys: [KeyCode; Action::COUNT],
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut keys = [KeyCode::Null; Action::COUNT];
        for action in Action::ALL {
            keys[action.index()] = default_key(action);
        }
        Self { keys }
    }
}

fn default_key(action: Action) -> KeyCode {
    match action {
        Action::RotateClockwise => KeyCode::Char('a'),
        Action::RotateCounterClockwise => KeyCode::Char('d'),
        Action::TiltAway => KeyCode::Char('w'),
        Action::TiltTowards => KeyCode::Char('s'),
        Action::MoveAway => KeyCode::Char('q'),
        Action::MoveTowards => KeyCode::Char('e'),
        Action::Accelerate => KeyCode::Char(' '),
        Action::Pause => KeyCode::Char('p'),
        Action::CameraLeft => KeyCode::Left,
        Action::CameraRight => KeyCode::Right,
        Action::CameraUp => KeyCode::Up,
        Action::CameraDown => KeyCode::Down,
        Action::CameraCenter => KeyCode::Char('c'),
        Action::Quit => KeyCode::Esc,
    }
}

impl KeyMap {
    pub fn key_for(&self, action: Action) -> KeyCode {
        self.keys[action.index()]
    }

    /// Action bound to a key; letters match in either case
    pub fn action_for(&self, code: KeyCode) -> Option<Action> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        Action::ALL
            .iter()
            .copied()
            .find(|action| self.keys[action.index()] == code)
    }
}

/// Short label for a key code, for on-screen hints
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

/// Ctrl-C always quits, whatever the bindings say
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
