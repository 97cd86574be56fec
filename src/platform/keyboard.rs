//! Keyboard mapping
//!
//! Key handlers fire between ticks. Movement keys collapse into held flags
//! (last state wins); math keys and restart become discrete events.

use crate::sim::{InputEvent, TickInput};

/// Movement keys that stay held across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

impl HeldKey {
    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(HeldKey::Forward),
            "s" | "arrowdown" => Some(HeldKey::Backward),
            "a" | "arrowleft" => Some(HeldKey::TurnLeft),
            "d" | "arrowright" => Some(HeldKey::TurnRight),
            _ => None,
        }
    }
}

/// Held-key state sampled by each tick
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    held: TickInput,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        self.held
    }

    fn set(&mut self, key: HeldKey, down: bool) {
        match key {
            HeldKey::Forward => self.held.forward = down,
            HeldKey::Backward => self.held.backward = down,
            HeldKey::TurnLeft => self.held.turn_left = down,
            HeldKey::TurnRight => self.held.turn_right = down,
        }
    }

    /// Handle a key press. Returns the discrete event it produced, if any.
    /// While the run is over only `r` (restart) does anything.
    pub fn key_down(&mut self, key: &str, game_over: bool) -> Option<InputEvent> {
        if game_over {
            return key.eq_ignore_ascii_case("r").then_some(InputEvent::Restart);
        }

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() {
                return Some(InputEvent::Digit(c));
            }
        }
        match key {
            "Backspace" => return Some(InputEvent::Backspace),
            "Enter" => return Some(InputEvent::Submit),
            _ => {}
        }

        if let Some(held) = HeldKey::from_key(key) {
            self.set(held, true);
        }
        None
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(held) = HeldKey::from_key(key) {
            self.set(held, false);
        }
    }

    /// Drop every held key (restart, focus loss)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }
}
