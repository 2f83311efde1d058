//! Core world module - viewport, scrolling and the frame loop
//!
//! This crate holds the part of the viewer with real invariants: the
//! world/screen coordinate model, scroll clamping and draw ordering. All
//! environment access (display, input, audio) goes through the
//! [`Platform`] handle that is moved into a [`World`], which keeps the model:
//!
//! - **Deterministic**: a scripted [`HeadlessPlatform`] replays input frame by frame
//! - **Testable**: no global state, so several worlds can coexist in one process
//! - **Portable**: the same loop drives the terminal or a headless canvas
//!
//! # Module Structure
//!
//! - [`block`]: static image-backed entities placed at world coordinates
//! - [`sprite`]: the drawing/translation capability the world composites
//! - [`canvas`]: RGBA pixel framebuffer with clipped alpha blits
//! - [`platform`]: display, input and audio traits the world talks to
//! - [`headless`]: an in-memory platform with scripted input
//! - [`clock`]: frame-rate limiting
//! - [`world`]: viewport, scroll offset and the main loop
//!
//! # Example
//!
//! ```
//! use tile_world_core::{HeadlessPlatform, ScriptedFrame, Unlimited, World, WorldConfig};
//! use tile_world_types::Direction;
//!
//! let platform = HeadlessPlatform::new().with_frames([
//!     ScriptedFrame::holding(Direction::Right),
//!     ScriptedFrame::quit(),
//! ]);
//! let config = WorldConfig::new(10, 10, 20, 20, 32);
//! let mut world = World::with_limiter(config, platform, Unlimited::default()).unwrap();
//!
//! let summary = world.run().unwrap();
//! assert_eq!(summary.frames, 2);
//! assert_eq!(world.offset(), (-10, 0));
//! ```

pub mod block;
pub mod canvas;
pub mod clock;
pub mod error;
pub mod headless;
pub mod platform;
pub mod sprite;
pub mod world;

pub use tile_world_assets as assets;
pub use tile_world_types as types;

pub use block::Block;
pub use canvas::Canvas;
pub use clock::{frame_budget, FrameClock, FrameLimiter, Unlimited};
pub use error::{PlatformError, WorldError};
pub use headless::{HeadlessPlatform, ScriptedFrame};
pub use platform::{InputSource, Platform, Surface};
pub use sprite::Sprite;
pub use world::{RunSummary, World, WorldConfig};
