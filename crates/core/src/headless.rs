//! In-memory platform with scripted input.
//!
//! Each call to `poll_events` consumes one [`ScriptedFrame`]. Once the script
//! runs out the platform reports [`InputEvent::Quit`], so a scripted run
//! always terminates.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::debug;

use crate::assets::AssetError;
use crate::canvas::Canvas;
use crate::error::PlatformError;
use crate::platform::{InputSource, Platform, Surface};
use crate::types::{Direction, Image, InputEvent, KeyState, Rgba};

/// Input delivered during one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptedFrame {
    pub events: Vec<InputEvent>,
    pub keys: KeyState,
}

impl ScriptedFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(direction: Direction) -> Self {
        Self {
            events: Vec::new(),
            keys: KeyState::only(direction),
        }
    }

    pub fn with_keys(keys: KeyState) -> Self {
        Self {
            events: Vec::new(),
            keys,
        }
    }

    pub fn quit() -> Self {
        Self {
            events: vec![InputEvent::Quit],
            keys: KeyState::none(),
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    canvas: Canvas,
    opened: bool,
    script: VecDeque<ScriptedFrame>,
    keys: KeyState,
    presented: u64,
    last_frame: Option<Canvas>,
    title: Option<String>,
    icon: Option<Image>,
    music: Option<PathBuf>,
    shutdowns: u32,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(mut self, frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        self.script.extend(frames);
        self
    }

    /// Number of frames shown so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&Canvas> {
        self.last_frame.as_ref()
    }

    /// The frame being composed.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn icon(&self) -> Option<&Image> {
        self.icon.as_ref()
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdowns > 0
    }

    pub fn shutdown_count(&self) -> u32 {
        self.shutdowns
    }
}

impl Surface for HeadlessPlatform {
    fn open(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        self.canvas.resize(width, height);
        self.opened = true;
        Ok(())
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
        self.presented += 1;
        match &mut self.last_frame {
            Some(last) => last.clone_from(&self.canvas),
            None => self.last_frame = Some(self.canvas.clone()),
        }
        Ok(())
    }
}

impl InputSource for HeadlessPlatform {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<(), PlatformError> {
        match self.script.pop_front() {
            Some(frame) => {
                self.keys = frame.keys;
                out.extend(frame.events);
            }
            None => {
                self.keys = KeyState::none();
                out.push(InputEvent::Quit);
            }
        }
        Ok(())
    }

    fn key_state(&self) -> KeyState {
        self.keys
    }
}

impl Platform for HeadlessPlatform {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_icon(&mut self, icon: &Image) {
        self.icon = Some(icon.clone());
    }

    fn play_music(&mut self, path: &Path) -> Result<(), AssetError> {
        if !path.is_file() {
            return Err(AssetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        self.music = Some(path.to_path_buf());
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), PlatformError> {
        self.shutdowns += 1;
        debug!("headless platform shut down ({} calls)", self.shutdowns);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_exhaustion_reports_quit() {
        let mut p = HeadlessPlatform::new().with_frames([ScriptedFrame::holding(Direction::Up)]);
        let mut events = Vec::new();

        p.poll_events(&mut events).unwrap();
        assert!(events.is_empty());
        assert!(p.key_state().up);

        p.poll_events(&mut events).unwrap();
        assert_eq!(events, vec![InputEvent::Quit]);
        assert_eq!(p.key_state(), KeyState::none());
    }

    #[test]
    fn test_present_requires_open() {
        let mut p = HeadlessPlatform::new();
        assert!(matches!(p.present(), Err(PlatformError::NotOpen)));

        p.open(8, 4).unwrap();
        p.present().unwrap();
        assert_eq!(p.presented(), 1);
        assert_eq!(p.last_frame().unwrap().width(), 8);
    }
}
