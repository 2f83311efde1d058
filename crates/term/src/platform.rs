//! TerminalPlatform: the world's display, input and audio in a terminal.
//!
//! Frames are composed into an RGBA canvas, mapped to half-block cells by
//! [`PixelView`] and diff-flushed by [`TerminalRenderer`]. Held directions come
//! from a [`KeyTracker`], since terminals report key presses rather than state.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal;
use log::{debug, info, warn};

use tile_world_assets::{AssetError, MusicPlayer};
use tile_world_input::{to_input_event, KeyTracker};

use crate::core::{Canvas, InputSource, Platform, PlatformError, Surface};
use crate::fb::FrameBuffer;
use crate::pixel_view::{PixelView, StatusLine};
use crate::renderer::TerminalRenderer;
use crate::types::{Image, InputEvent, KeyState, Rgba};

pub struct TerminalPlatform {
    renderer: TerminalRenderer,
    view: PixelView,
    canvas: Canvas,
    fb: FrameBuffer,
    tracker: KeyTracker,
    music: MusicPlayer,
    title: String,
    icon: Option<Image>,
    show_status: bool,
    opened: bool,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: PixelView::new(),
            canvas: Canvas::default(),
            fb: FrameBuffer::new(0, 0),
            tracker: KeyTracker::new(),
            music: MusicPlayer::new(),
            title: String::new(),
            icon: None,
            show_status: true,
            opened: false,
        }
    }

    /// Hide the bottom status row and give the whole terminal to the world.
    pub fn without_status_line(mut self) -> Self {
        self.show_status = false;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The colour-keyed icon. Terminals have nowhere to show it.
    pub fn icon(&self) -> Option<&Image> {
        self.icon.as_ref()
    }

    fn enter(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas.resize(width, height);
        if !self.renderer.is_active() {
            self.renderer
                .enter()
                .context("failed to enter raw mode / alternate screen")?;
        }
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        self.fb.resize(cols, rows);
        if !self.title.is_empty() {
            self.renderer.set_title(&self.title)?;
        }
        self.opened = true;
        info!("terminal opened: {cols}x{rows} cells for {width}x{height} px");
        Ok(())
    }

    fn status_line(&self) -> StatusLine {
        let name = if self.title.is_empty() {
            "tile-world"
        } else {
            self.title.as_str()
        };
        StatusLine::new(format!(
            "{name}  {}x{}px  arrows/hjkl/wasd: scroll  q: quit",
            self.canvas.width(),
            self.canvas.height()
        ))
    }

    fn flush(&mut self) -> Result<()> {
        let status = self.show_status.then(|| self.status_line());
        self.view.render_into(&self.canvas, status.as_ref(), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn drain_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            match &ev {
                Event::Key(key) => {
                    self.tracker.handle_key_event(*key, Instant::now());
                }
                Event::Resize(cols, rows) => {
                    debug!("terminal resized to {cols}x{rows}");
                    self.fb.resize(*cols, *rows);
                    self.renderer.invalidate();
                }
                Event::FocusLost => self.tracker.reset(),
                _ => {}
            }
            out.push(to_input_event(&ev));
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.music.stop();
        self.opened = false;
        self.renderer.exit().context("failed to restore terminal")
    }
}

impl Default for TerminalPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalPlatform {
    fn open(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        Ok(self.enter(width, height)?)
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, color: Rgba) {
        self.canvas.clear(color);
    }

    fn blit(&mut self, image: &Image, x: i32, y: i32) {
        self.canvas.blit(image, x, y);
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        if !self.opened {
            return Err(PlatformError::NotOpen);
        }
        Ok(self.flush()?)
    }
}

impl InputSource for TerminalPlatform {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError> {
        Ok(self.drain_events(out)?)
    }

    fn key_state(&self) -> KeyState {
        self.tracker.key_state(Instant::now())
    }
}

impl Platform for TerminalPlatform {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        if self.renderer.is_active() {
            if let Err(e) = self.renderer.set_title(title) {
                warn!("failed to set terminal title: {e:#}");
            }
        }
    }

    fn set_icon(&mut self, icon: &Image) {
        info!(
            "icon set ({}x{}); terminals cannot display it",
            icon.width(),
            icon.height()
        );
        self.icon = Some(icon.clone());
    }

    fn play_music(&mut self, path: &Path) -> Result<(), AssetError> {
        self.music.play_looped(path)
    }

    fn shutdown(&mut self) -> Result<(), PlatformError> {
        if !self.renderer.is_active() && !self.opened {
            return Ok(());
        }
        info!("terminal shutdown");
        Ok(self.leave()?)
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if self.renderer.is_active() {
            if let Err(e) = self.leave() {
                warn!("terminal restore on drop failed: {e:#}");
            }
        }
    }
}
