//! Held-key tracking for terminal environments.
//!
//! Most terminals only report key presses (plus auto-repeat presses while a
//! key stays down). A direction counts as held until no press for it has been
//! seen for the release timeout. Terminals that do emit release events switch
//! the tracker to release-driven mode on the first one.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;

use crate::map::direction_for_key;
use crate::types::{Direction, KeyState, KEY_RELEASE_TIMEOUT_MS};

const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Debug, Clone)]
pub struct KeyTracker {
    last_press: [Option<Instant>; 4],
    release_events: bool,
    release_timeout: Duration,
}

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Left => 0,
        Direction::Right => 1,
        Direction::Up => 2,
        Direction::Down => 3,
    }
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            last_press: [None; 4],
            release_events: false,
            release_timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS as u64),
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms as u64);
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// True once the terminal has reported a key release.
    pub fn has_release_events(&self) -> bool {
        self.release_events
    }

    /// Feed a terminal key event. Returns the direction it affected, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Direction> {
        let direction = direction_for_key(key.code)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(direction, now),
            KeyEventKind::Release => {
                if !self.release_events {
                    debug!("terminal reports key releases; disabling release timeout");
                    self.release_events = true;
                }
                self.release(direction);
            }
        }
        Some(direction)
    }

    pub fn press(&mut self, direction: Direction, now: Instant) {
        self.last_press[slot(direction)] = Some(now);
    }

    pub fn release(&mut self, direction: Direction) {
        self.last_press[slot(direction)] = None;
    }

    /// Directions held at `now`.
    pub fn key_state(&self, now: Instant) -> KeyState {
        let mut keys = KeyState::none();
        for direction in DIRECTIONS {
            let held = match self.last_press[slot(direction)] {
                Some(_) if self.release_events => true,
                Some(at) => now.saturating_duration_since(at) <= self.release_timeout,
                None => false,
            };
            keys.set(direction, held);
        }
        keys
    }

    pub fn reset(&mut self) {
        self.last_press = [None; 4];
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
