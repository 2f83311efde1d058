//! RGBA pixel framebuffer the frame is composited into.

use crate::types::{Image, Rgba};

/// 2D framebuffer of opaque pixels, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the canvas.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.resize(len, Rgba::BLACK);
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Alpha-blend `image` with its top-left corner at `(x, y)`.
    ///
    /// Coordinates may be negative or past the edges; the blit is clipped to
    /// the canvas.
    pub fn blit(&mut self, image: &Image, x: i32, y: i32) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + image.width() as i64).min(self.width as i64);
        let y1 = (y as i64 + image.height() as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src_x = (x0 - x as i64) as usize;
        let run = (x1 - x0) as usize;
        for dy in y0..y1 {
            let src_row = image.row((dy - y as i64) as u32);
            let src = &src_row[src_x..src_x + run];
            let start = (dy as usize) * (self.width as usize) + x0 as usize;
            let dst = &mut self.pixels[start..start + run];
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.over(*d);
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(0, 0)
    }
}
