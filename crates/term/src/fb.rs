//! Character-cell framebuffer the pixel view draws into.
//!
//! Cells are stored row-major. Every write is clipped to the buffer, so
//! callers can draw without checking terminal bounds first.

use crate::types::Rgb;

/// Glyph that paints the upper half of a cell in the foreground colour.
pub const UPPER_HALF_BLOCK: char = '\u{2580}';

/// Foreground/background colours of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    /// A cell showing two stacked pixels.
    pub const fn half_block(upper: Rgb, lower: Rgb) -> Self {
        CellStyle::new(upper, lower).into_cell(UPPER_HALF_BLOCK)
    }

    /// A blank cell filled with `color`.
    pub const fn blank(color: Rgb) -> Self {
        CellStyle::new(color, color).into_cell(' ')
    }

    /// `(upper, lower)` pixel colours when this is a half-block cell.
    pub fn pixels(&self) -> Option<(Rgb, Rgb)> {
        (self.ch == UPPER_HALF_BLOCK).then_some((self.style.fg, self.style.bg))
    }
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.cols
    }

    pub fn height(&self) -> u16 {
        self.rows
    }

    /// Match the terminal size. The allocation is kept when it is big enough.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (self.cols, self.rows) != (cols, rows) {
            self.cols = cols;
            self.rows = rows;
            self.cells.resize(cols as usize * rows as usize, Cell::default());
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.cols && y < self.rows).then(|| y as usize * self.cols as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Overwrite a whole row.
    pub fn fill_row(&mut self, y: u16, cell: Cell) {
        if y < self.rows {
            let start = y as usize * self.cols as usize;
            self.cells[start..start + self.cols as usize].fill(cell);
        }
    }

    /// Write `text` from `(x, y)` onward, cut off at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: CellStyle) {
        let columns = (x..self.cols).zip(text.chars());
        for (cx, ch) in columns {
            self.set(cx, y, style.into_cell(ch));
        }
    }

    /// Row glyphs as a string.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.cols)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}
