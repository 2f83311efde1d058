//! Terminal presentation module.
//!
//! This is a small, game-oriented rendering layer for terminal play.
//! The world composes frames into an RGBA [`Canvas`](tile_world_core::Canvas);
//! this crate turns that canvas into character cells and flushes them to a
//! terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Two pixels per cell (upper half block), so pixels stay roughly square
//! - Only rewrite the cells that changed between frames

pub mod fb;
pub mod pixel_view;
pub mod platform;
pub mod renderer;

pub use tile_world_core as core;
pub use tile_world_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, UPPER_HALF_BLOCK};
pub use pixel_view::{PixelView, StatusLine, Viewport};
pub use platform::TerminalPlatform;
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
