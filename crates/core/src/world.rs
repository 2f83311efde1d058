//! The world: viewport, scroll offset, owned sprites and the main loop.
//!
//! # Scroll offset
//!
//! `(background_x, background_y)` is the translation applied to all world
//! content. It is never positive and never scrolls the viewport past the
//! world's far edges:
//!
//! ```text
//! -(world_width  - viewport_width)  <= background_x <= 0
//! -(world_height - viewport_height) <= background_y <= 0
//! ```
//!
//! A scroll step that would cross a bound is shortened to land exactly on it.
//! When the world is not larger than the viewport on an axis, that axis never
//! scrolls.
//!
//! # Main loop
//!
//! Each iteration polls events, applies at most one scroll, clears, draws the
//! background and then every sprite in insertion order, presents, and waits
//! out the rest of the frame budget. A quit event stops the loop after the
//! current iteration has been presented.

use std::path::Path;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::assets::{load_icon, ImageCache};
use crate::block::Block;
use crate::clock::{FrameClock, FrameLimiter};
use crate::error::WorldError;
use crate::platform::Platform;
use crate::sprite::Sprite;
use crate::types::{
    Direction, Image, InputEvent, Rgba, WorldDimensions, BACKGROUND_COLOR, DEFAULT_FPS,
    DEFAULT_SCROLL_SPEED, DEFAULT_SCROLL_STEP,
};

/// World construction parameters.
///
/// Viewport and world sizes are in grid cells; `grid_size` is the pixel edge
/// of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    pub viewport_cells_x: i32,
    pub viewport_cells_y: i32,
    pub grid_x: i32,
    pub grid_y: i32,
    pub grid_size: i32,
    /// Vertical bias of the ground line used when placing blocks.
    pub ground_offset: i32,
    pub fps: u32,
    /// Pixels scrolled per frame while a direction key is held.
    pub scroll_speed: u32,
    pub background_color: Rgba,
}

impl WorldConfig {
    pub fn new(
        viewport_cells_x: i32,
        viewport_cells_y: i32,
        grid_x: i32,
        grid_y: i32,
        grid_size: i32,
    ) -> Self {
        Self {
            viewport_cells_x,
            viewport_cells_y,
            grid_x,
            grid_y,
            grid_size,
            ground_offset: 0,
            fps: DEFAULT_FPS,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            background_color: BACKGROUND_COLOR,
        }
    }

    pub fn with_ground_offset(mut self, ground_offset: i32) -> Self {
        self.ground_offset = ground_offset;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_scroll_speed(mut self, scroll_speed: u32) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }

    /// Reject non-positive dimensions and a zero frame rate.
    pub fn validate(&self) -> Result<(), WorldError> {
        let dims = [
            ("viewport width", self.viewport_cells_x),
            ("viewport height", self.viewport_cells_y),
            ("world width", self.grid_x),
            ("world height", self.grid_y),
            ("grid size", self.grid_size),
        ];
        for (name, value) in dims {
            if value <= 0 {
                return Err(WorldError::InvalidDimension { name, value });
            }
        }
        if self.fps == 0 {
            return Err(WorldError::InvalidFrameRate(self.fps));
        }
        Ok(())
    }

    fn pixels(&self, cells: i32, name: &'static str) -> Result<i32, WorldError> {
        cells
            .checked_mul(self.grid_size)
            .ok_or(WorldError::InvalidDimension { name, value: cells })
    }
}

/// Outcome of a completed main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames drawn and presented.
    pub frames: u64,
}

pub struct World<P: Platform, L: FrameLimiter = FrameClock> {
    config: WorldConfig,
    viewport_width: i32,
    viewport_height: i32,
    world_width: i32,
    world_height: i32,
    background_x: i32,
    background_y: i32,
    background: Option<Rc<Image>>,
    sprites: Vec<Box<dyn Sprite>>,
    images: ImageCache,
    running: bool,
    platform: P,
    limiter: L,
}

impl<P: Platform> World<P, FrameClock> {
    /// Build a world that limits its frame rate with the system clock.
    pub fn new(config: WorldConfig, platform: P) -> Result<Self, WorldError> {
        Self::with_limiter(config, platform, FrameClock::new())
    }
}

impl<P: Platform, L: FrameLimiter> World<P, L> {
    /// Build a world and open the platform's display at the viewport size.
    pub fn with_limiter(
        config: WorldConfig,
        mut platform: P,
        limiter: L,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        let viewport_width = config.pixels(config.viewport_cells_x, "viewport width")?;
        let viewport_height = config.pixels(config.viewport_cells_y, "viewport height")?;
        let world_width = config.pixels(config.grid_x, "world width")?;
        let world_height = config.pixels(config.grid_y, "world height")?;

        platform.open(viewport_width as u32, viewport_height as u32)?;

        info!("world initialized");
        info!("viewport: {}x{}px", viewport_width, viewport_height);
        info!("world: {}x{}px", world_width, world_height);
        info!("grid: {}x{} cells of {}px", config.grid_x, config.grid_y, config.grid_size);

        Ok(Self {
            config,
            viewport_width,
            viewport_height,
            world_width,
            world_height,
            background_x: 0,
            background_y: 0,
            background: None,
            sprites: Vec::new(),
            images: ImageCache::new(),
            running: true,
            platform,
            limiter,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Viewport size in pixels.
    pub fn viewport_size(&self) -> (i32, i32) {
        (self.viewport_width, self.viewport_height)
    }

    /// World size in pixels.
    pub fn world_size(&self) -> (i32, i32) {
        (self.world_width, self.world_height)
    }

    /// Dimensions handed to blocks placed in this world.
    pub fn dimensions(&self) -> WorldDimensions {
        WorldDimensions::new(self.world_width, self.world_height, self.config.ground_offset)
    }

    /// Current scroll offset `(background_x, background_y)`.
    pub fn offset(&self) -> (i32, i32) {
        (self.background_x, self.background_y)
    }

    /// Most negative legal offset on each axis.
    pub fn min_offset(&self) -> (i32, i32) {
        (
            -((self.world_width - self.viewport_width).max(0)),
            -((self.world_height - self.viewport_height).max(0)),
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> u32 {
        self.config.fps
    }

    pub fn set_fps(&mut self, fps: u32) -> Result<(), WorldError> {
        if fps == 0 {
            return Err(WorldError::InvalidFrameRate(fps));
        }
        self.config.fps = fps;
        Ok(())
    }

    pub fn scroll_speed(&self) -> u32 {
        self.config.scroll_speed
    }

    pub fn set_scroll_speed(&mut self, speed: u32) {
        self.config.scroll_speed = speed;
    }

    pub fn sprites(&self) -> &[Box<dyn Sprite>] {
        &self.sprites
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn limiter(&self) -> &L {
        &self.limiter
    }

    pub fn set_title(&mut self, title: &str) {
        self.platform.set_title(title);
        info!("title set: '{}'", title);
    }

    /// Set the window icon from a colour-keyed bitmap. A missing or invalid
    /// icon is logged and otherwise ignored.
    pub fn set_icon(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match load_icon(path) {
            Ok(icon) => {
                self.platform.set_icon(&icon);
                info!("icon set: '{}'", path.display());
            }
            Err(err) => warn!("icon skipped: {}", err),
        }
    }

    /// Loop background music forever. A missing or unsupported track is logged
    /// and otherwise ignored.
    pub fn load_music(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.platform.play_music(path) {
            Ok(()) => info!("background music started: '{}'", path.display()),
            Err(err) => warn!("background music skipped: {}", err),
        }
    }

    /// Load the background image; unloadable files show the fallback tile.
    pub fn set_background(&mut self, path: impl AsRef<Path>) {
        let loaded = self.images.load(path);
        self.background = Some(loaded.into_image());
    }

    pub fn set_background_image(&mut self, image: Image) {
        self.background = Some(Rc::new(image));
    }

    /// Append a sprite. It is painted after every sprite added before it.
    pub fn add_sprite(&mut self, sprite: Box<dyn Sprite>) {
        self.sprites.push(sprite);
    }

    pub fn add_block(&mut self, block: Block) {
        self.add_sprite(Box::new(block));
    }

    /// Place a block from an image file at world position `(x, y)`.
    ///
    /// Returns `false` when the fallback tile had to be used.
    pub fn place_block(&mut self, x: i32, y: i32, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let loaded = self.images.load(path);
        let block = Block::from_loaded(x, y, loaded, self.dimensions());
        let ok = !block.is_fallback();
        if let Some(reason) = block.fallback_reason() {
            debug!("block at ({}, {}) shows fallback: {}", x, y, reason);
        }
        self.add_block(block);
        ok
    }

    /// Place a block from an in-memory image at world position `(x, y)`.
    pub fn place_image(&mut self, x: i32, y: i32, image: Rc<Image>) {
        let block = Block::new(x, y, image, self.dimensions());
        self.add_block(block);
    }

    /// Move the viewport up by at most `speed` pixels. Returns the distance
    /// actually scrolled.
    pub fn scroll_up(&mut self, speed: u32) -> u32 {
        self.scroll(Direction::Up, speed)
    }

    pub fn scroll_down(&mut self, speed: u32) -> u32 {
        self.scroll(Direction::Down, speed)
    }

    pub fn scroll_left(&mut self, speed: u32) -> u32 {
        self.scroll(Direction::Left, speed)
    }

    pub fn scroll_right(&mut self, speed: u32) -> u32 {
        self.scroll(Direction::Right, speed)
    }

    /// Scroll by the default single step.
    pub fn nudge(&mut self, direction: Direction) -> u32 {
        self.scroll(direction, DEFAULT_SCROLL_STEP)
    }

    /// Move the viewport by at most `speed` pixels towards `direction`.
    ///
    /// The content (background and every sprite) moves the opposite way. The
    /// step is clamped so the offset stays in range; at a bound this is a
    /// no-op. Returns the distance actually scrolled.
    pub fn scroll(&mut self, direction: Direction, speed: u32) -> u32 {
        let speed = speed.min(i32::MAX as u32) as i32;
        let (min_x, min_y) = self.min_offset();

        let (dx, dy) = match direction {
            Direction::Up => (0, speed.min(-self.background_y).max(0)),
            Direction::Down => (0, -(speed.min(self.background_y - min_y).max(0))),
            Direction::Left => (speed.min(-self.background_x).max(0), 0),
            Direction::Right => (-(speed.min(self.background_x - min_x).max(0)), 0),
        };
        if dx == 0 && dy == 0 {
            return 0;
        }

        self.background_x += dx;
        self.background_y += dy;
        for sprite in &mut self.sprites {
            sprite.translate(dx, dy);
        }
        dx.unsigned_abs() + dy.unsigned_abs()
    }

    /// Ask the main loop to end after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Compose and present one frame.
    pub fn render_frame(&mut self) -> Result<(), WorldError> {
        self.platform.clear(self.config.background_color);
        if let Some(background) = &self.background {
            self.platform
                .blit(background, self.background_x, self.background_y);
        }
        for sprite in &self.sprites {
            sprite.draw(&mut self.platform);
        }
        self.platform.present()?;
        Ok(())
    }

    /// Run the main loop until a quit event arrives, then shut the platform
    /// down. Shutdown also happens when the loop fails.
    pub fn run(&mut self) -> Result<RunSummary, WorldError> {
        info!("main loop started at {} fps", self.config.fps);
        let result = self.run_loop();

        info!("shutting down platform");
        let teardown = self.platform.shutdown();
        let summary = result?;
        teardown?;

        info!("main loop finished after {} frames", summary.frames);
        Ok(summary)
    }

    fn run_loop(&mut self) -> Result<RunSummary, WorldError> {
        let mut events = Vec::with_capacity(16);
        let mut frames = 0u64;

        while self.running {
            events.clear();
            self.platform.poll_events(&mut events)?;
            for event in &events {
                match event {
                    InputEvent::Quit => {
                        info!("quit requested");
                        self.running = false;
                    }
                    InputEvent::Resize { width, height } => {
                        debug!("surface resized to {}x{}", width, height);
                    }
                    InputEvent::Other => {}
                }
            }

            if let Some(direction) = self.platform.key_state().scroll_direction() {
                self.scroll(direction, self.config.scroll_speed);
            }

            self.render_frame()?;
            frames += 1;

            self.limiter.wait(self.config.fps);
        }

        Ok(RunSummary { frames })
    }
}
