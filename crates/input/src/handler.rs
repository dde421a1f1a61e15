//! Per-frame input state for terminal environments.
//!
//! Turns crossterm key events into one [`InputSnapshot`] per frame: which
//! actions are held and which went down this frame. Terminals without
//! key-release events are handled with a timeout: a key not seen again
//! within the timeout counts as released.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use log::trace;

use crate::map::KeyMap;
use crate::types::{Action, InputSnapshot};

// Long enough to bridge the gap between terminal auto-repeat events, short
// enough that a tap does not read as a long hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct InputState {
    key_map: KeyMap,
    /// Last time each held action's key was seen; `None` when up
    last_seen: [Option<Instant>; Action::COUNT],
    /// Edges collected since the last snapshot
    pending: InputSnapshot,
    key_release_timeout: Duration,
}

impl InputState {
    pub fn new(key_map: KeyMap) -> Self {
        Self {
            key_map,
            last_seen: [None; Action::COUNT],
            pending: InputSnapshot::new(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout.as_millis() as u64
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Feed one key event; returns the action it maps to, if any
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        self.handle_key_event_at(key, Instant::now())
    }

    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) -> Option<Action> {
        let Some(action) = self.key_map.action_for(key.code) else {
            trace!("unbound key {:?}", key.code);
            return None;
        };
        let slot = &mut self.last_seen[action.index()];

        match key.kind {
            KeyEventKind::Press => {
                if slot.is_none() {
                    self.pending.set_pressed(action);
                }
                *slot = Some(now);
            }
            KeyEventKind::Repeat => {
                if slot.is_none() {
                    // Auto-released while the key was still held
                    self.pending.set_down(action);
                }
                *slot = Some(now);
            }
            KeyEventKind::Release => {
                *slot = None;
            }
        }
        Some(action)
    }

    /// Snapshot for the frame ending now, then start a new frame
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        self.take_snapshot_at(Instant::now())
    }

    pub fn take_snapshot_at(&mut self, now: Instant) -> InputSnapshot {
        let mut snapshot = self.pending;
        for action in Action::ALL {
            let slot = &mut self.last_seen[action.index()];
            if let Some(seen) = *slot {
                if now.saturating_duration_since(seen) > self.key_release_timeout {
                    *slot = None;
                    continue;
                }
                snapshot.set_down(action);
            }
        }
        self.pending.clear();
        snapshot
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.last_seen[action.index()].is_some()
    }

    pub fn reset(&mut self) {
        self.last_seen = [None; Action::COUNT];
        self.pending.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KeyMap::default())
    }
}
