//! Environment traits: the display, input and audio a [`World`](crate::World)
//! talks to.
//!
//! A platform value is created by the caller and moved into the world, so
//! there is no process-wide subsystem. Implementations must make
//! [`Platform::shutdown`] idempotent; the world calls it on every exit path
//! of its main loop.

use std::path::Path;

use crate::assets::AssetError;
use crate::error::PlatformError;
use crate::types::{Image, InputEvent, KeyState, Rgba};

/// Frame output.
pub trait Surface {
    /// Size the drawable area (pixels). Called once when the world is built.
    fn open(&mut self, width: u32, height: u32) -> Result<(), PlatformError>;

    /// Current drawable size in pixels.
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgba);

    /// Draw `image` with its top-left corner at screen position `(x, y)`.
    fn blit(&mut self, image: &Image, x: i32, y: i32);

    /// Show the composed frame.
    fn present(&mut self) -> Result<(), PlatformError>;
}

/// Per-frame input.
pub trait InputSource {
    /// Append every pending event to `out` without blocking.
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError>;

    /// Directional keys held right now.
    fn key_state(&self) -> KeyState;
}

/// Everything the world needs from its environment.
pub trait Platform: Surface + InputSource {
    fn set_title(&mut self, title: &str);

    /// Install an already colour-keyed icon.
    fn set_icon(&mut self, icon: &Image);

    /// Start looping background music.
    fn play_music(&mut self, path: &Path) -> Result<(), AssetError>;

    /// Release the display and audio. Safe to call more than once.
    fn shutdown(&mut self) -> Result<(), PlatformError>;
}
