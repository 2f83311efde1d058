//! PixelView: maps an RGBA canvas onto terminal cells.
//!
//! Each cell shows two vertically stacked pixels with the upper-half-block
//! glyph: the foreground colour paints the top pixel, the background colour
//! the bottom one. Canvases larger than the terminal are downscaled by an
//! integer factor (nearest neighbour) and centered.

use crate::core::Canvas;
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Rgb;

/// Cell area available for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One line of text drawn along the bottom row of the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
}

impl StatusLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone)]
pub struct PixelView {
    background: Rgb,
    status_style: CellStyle,
}

impl Default for PixelView {
    fn default() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            status_style: CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(30, 30, 40)).bold(),
        }
    }
}

impl PixelView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Downscale factor needed to fit `canvas_w` x `canvas_h` pixels into
    /// `cols` x `rows` cells (two pixels per row). Never below 1.
    pub fn scale_for(canvas_w: u32, canvas_h: u32, cols: u16, rows: u16) -> u32 {
        let cols = (cols as u32).max(1);
        let pixel_rows = (rows as u32).max(1) * 2;
        let sx = canvas_w.div_ceil(cols);
        let sy = canvas_h.div_ceil(pixel_rows);
        sx.max(sy).max(1)
    }

    /// Render `canvas` into `fb`, reserving the last row for `status` when given.
    pub fn render_into(&self, canvas: &Canvas, status: Option<&StatusLine>, fb: &mut FrameBuffer) {
        fb.clear(Cell::blank(self.background));

        let rows = match status {
            Some(_) => fb.height().saturating_sub(1),
            None => fb.height(),
        };
        self.render_canvas(canvas, Viewport::new(0, 0, fb.width(), rows), fb);

        if let Some(status) = status {
            if fb.height() > 0 {
                let y = fb.height() - 1;
                fb.fill_row(y, self.status_style.into_cell(' '));
                fb.put_str(1, y, &status.text, self.status_style);
            }
        }
    }

    pub fn render_canvas(&self, canvas: &Canvas, area: Viewport, fb: &mut FrameBuffer) {
        if area.width == 0 || area.height == 0 || canvas.width() == 0 || canvas.height() == 0 {
            return;
        }

        let scale = Self::scale_for(canvas.width(), canvas.height(), area.width, area.height);
        let cols = canvas.width().div_ceil(scale) as u16;
        let rows = canvas.height().div_ceil(scale * 2) as u16;
        let cols = cols.min(area.width);
        let rows = rows.min(area.height);
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for cy in 0..rows {
            let top_py = cy as u32 * scale * 2;
            let bottom_py = top_py + scale;
            for cx in 0..cols {
                let px = cx as u32 * scale;
                let upper = self.sample(canvas, px, top_py);
                let lower = self.sample(canvas, px, bottom_py);
                fb.set(left + cx, top + cy, Cell::half_block(upper, lower));
            }
        }
    }

    fn sample(&self, canvas: &Canvas, x: u32, y: u32) -> Rgb {
        match canvas.get(x, y) {
            Some(px) => px.over(self.background.with_alpha(255)).rgb(),
            None => self.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::UPPER_HALF_BLOCK;
    use crate::types::{Image, Rgba};

    #[test]
    fn test_scale_fits_terminal() {
        // 640x640 world into 80x24 cells: 640/80 = 8, 640/48 -> 14.
        assert_eq!(PixelView::scale_for(640, 640, 80, 24), 14);
        assert_eq!(PixelView::scale_for(10, 10, 80, 24), 1);
        assert_eq!(PixelView::scale_for(10, 10, 0, 0), 10);
    }

    #[test]
    fn test_two_pixels_per_cell() {
        let mut canvas = Canvas::new(2, 2);
        canvas.blit(&Image::filled(1, 1, Rgba::opaque(255, 0, 0)), 0, 0);
        canvas.blit(&Image::filled(1, 1, Rgba::opaque(0, 0, 255)), 0, 1);

        let mut fb = FrameBuffer::new(2, 1);
        PixelView::new().render_into(&canvas, None, &mut fb);

        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, UPPER_HALF_BLOCK);
        assert_eq!(cell.pixels(), Some((Rgb::new(255, 0, 0), Rgb::new(0, 0, 255))));
        let black = Rgb::new(0, 0, 0);
        assert_eq!(fb.get(1, 0).unwrap().pixels(), Some((black, black)));
    }

    #[test]
    fn test_small_canvas_is_centered() {
        let canvas = Canvas::new(2, 2);
        let mut fb = FrameBuffer::new(6, 3);
        PixelView::new().render_into(&canvas, None, &mut fb);

        // 2 columns by 1 row, centered in 6x3.
        assert_eq!(fb.row_text(0), "      ");
        assert_eq!(fb.row_text(1), "  \u{2580}\u{2580}  ");
        assert_eq!(fb.row_text(2), "      ");
    }

    #[test]
    fn test_status_line_uses_last_row() {
        let canvas = Canvas::new(4, 4);
        let mut fb = FrameBuffer::new(8, 3);
        PixelView::new().render_into(&canvas, Some(&StatusLine::new("demo")), &mut fb);

        assert_eq!(fb.row_text(2), " demo   ");
        assert!(fb.row_text(0).contains('\u{2580}'));
    }

    #[test]
    fn test_downscaled_sampling_uses_block_origin() {
        // 4x4 canvas into 2x1 cells: scale 2, so pixels (0,0) and (0,2) are sampled.
        let mut canvas = Canvas::new(4, 4);
        canvas.blit(&Image::filled(1, 1, Rgba::opaque(0, 255, 0)), 0, 2);
        let mut fb = FrameBuffer::new(2, 1);
        PixelView::new().render_into(&canvas, None, &mut fb);

        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.style.fg, Rgb::new(0, 0, 0));
        assert_eq!(cell.style.bg, Rgb::new(0, 255, 0));
    }
}
