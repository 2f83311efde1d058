//! Terminal input module (world-facing).
//!
//! This module is intentionally independent of the world model. It maps
//! `crossterm` key events into [`crate::types::Direction`]s and quit requests,
//! and tracks which directions are held (including terminals without
//! key-release events).

pub mod handler;
pub mod map;

pub use tile_world_types as types;

pub use handler::KeyTracker;
pub use map::{direction_for_key, should_quit, to_input_event};
