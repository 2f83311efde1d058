//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the viewer.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (world model, asset loading, terminal presentation).
//!
//! # Coordinate Spaces
//!
//! Two coordinate systems meet in this crate:
//!
//! - **World space**: origin at the bottom-left of the whole world, Y grows upward.
//! - **Screen space**: origin at the top-left of the viewport, Y grows downward.
//!
//! [`Rect`] is always expressed in screen space. Conversion from world space
//! happens once, when a block is placed (see [`WorldDimensions::to_screen_y`]).
//!
//! # Render Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 30 | Frame-rate cap of the main loop |
//! | `DEFAULT_SCROLL_SPEED` | 10 | Pixels scrolled per frame while a key is held |
//! | `DEFAULT_SCROLL_STEP` | 1 | Pixels scrolled by a bare scroll call |
//! | `ICON_SIZE` | 32 | Edge length of the window icon bitmap |
//! | `ICON_COLOR_KEY` | (100, 100, 100) | Icon colour rendered fully transparent |

pub mod pixel;

pub use pixel::{Image, Rgb, Rgba};

/// Main loop timing and scrolling defaults.
pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_SCROLL_SPEED: u32 = 10;
pub const DEFAULT_SCROLL_STEP: u32 = 1;

/// Window icon constraints.
pub const ICON_SIZE: u32 = 32;
pub const ICON_COLOR_KEY: Rgb = Rgb::new(100, 100, 100);

/// Colour the frame is cleared to before anything is drawn.
pub const BACKGROUND_COLOR: Rgba = Rgba::BLACK;

/// Edge length of the generated "error" tile.
pub const FALLBACK_TILE_SIZE: u32 = 32;

/// Terminal key handling (milliseconds).
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 250;

/// Viewport travel direction.
///
/// Scrolling the viewport in a direction moves the world content the
/// opposite way on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Snapshot of the directional keys currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub const fn none() -> Self {
        Self {
            left: false,
            right: false,
            up: false,
            down: false,
        }
    }

    /// Key state with exactly one direction held.
    pub fn only(direction: Direction) -> Self {
        let mut keys = Self::none();
        keys.set(direction, true);
        keys
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// The single direction to scroll this frame.
    ///
    /// When several keys are held the first match in the order
    /// left, right, up, down wins and the others are ignored.
    pub fn scroll_direction(&self) -> Option<Direction> {
        [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
        .into_iter()
        .find(|&d| self.is_held(d))
    }
}

/// Discrete input events delivered once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the viewer.
    Quit,
    /// The presentation surface changed size (terminal columns/rows).
    Resize { width: u16, height: u16 },
    /// Anything else; the world ignores it.
    Other,
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shift by `(dx, dy)`, saturating at the `i32` range.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }
}

/// World extent and ground line handed to blocks at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldDimensions {
    /// World width in pixels.
    pub width: i32,
    /// World height in pixels.
    pub height: i32,
    /// Vertical bias of the ground line in pixels.
    pub ground_offset: i32,
}

impl WorldDimensions {
    pub const fn new(width: i32, height: i32, ground_offset: i32) -> Self {
        Self {
            width,
            height,
            ground_offset,
        }
    }

    /// Convert a world-space Y (bottom-left origin) to the screen-space Y of a
    /// sprite's top edge.
    ///
    /// Positions far outside the world saturate at the `i32` range.
    pub fn to_screen_y(&self, world_y: i32, sprite_height: u32) -> i32 {
        let y = self.height as i64
            - (world_y as i64 + sprite_height as i64)
            - self.ground_offset as i64;
        y.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_direction_priority() {
        let all = KeyState {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        assert_eq!(all.scroll_direction(), Some(Direction::Left));

        let right_up = KeyState {
            right: true,
            up: true,
            ..KeyState::none()
        };
        assert_eq!(right_up.scroll_direction(), Some(Direction::Right));

        let up_down = KeyState {
            up: true,
            down: true,
            ..KeyState::none()
        };
        assert_eq!(up_down.scroll_direction(), Some(Direction::Up));

        assert_eq!(
            KeyState::only(Direction::Down).scroll_direction(),
            Some(Direction::Down)
        );
        assert_eq!(KeyState::none().scroll_direction(), None);
    }

    #[test]
    fn test_world_to_screen_y() {
        let dims = WorldDimensions::new(640, 640, 0);
        assert_eq!(dims.to_screen_y(0, 32), 608);

        let grounded = WorldDimensions::new(640, 640, 16);
        assert_eq!(grounded.to_screen_y(64, 32), 640 - 96 - 16);
    }

    #[test]
    fn test_far_world_positions_saturate() {
        let dims = WorldDimensions::new(640, 640, 0);
        assert_eq!(dims.to_screen_y(i32::MAX - 10, 32), 640 - i32::MAX - 22);
        assert_eq!(dims.to_screen_y(i32::MIN, 32), i32::MAX);
        assert_eq!(dims.to_screen_y(i32::MAX, u32::MAX), i32::MIN);
    }

    #[test]
    fn test_rect_translate_saturates() {
        let mut r = Rect::new(10, 10, 4, 4);
        r.translate(-3, 5);
        assert_eq!((r.x, r.y), (7, 15));

        let mut edge = Rect::new(i32::MAX - 1, i32::MIN + 1, 4, 4);
        edge.translate(10, -10);
        assert_eq!((edge.x, edge.y), (i32::MAX, i32::MIN));
    }
}
