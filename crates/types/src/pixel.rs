//! Colour and pixel buffer types.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// 32-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const MAGENTA: Rgba = Rgba::new(255, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Composite `self` over `dst` ("source over").
    ///
    /// The destination is treated as opaque, which holds for a frame that was
    /// cleared to a solid colour first.
    #[inline]
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            0 => dst,
            255 => self,
            a => {
                let a = a as u16;
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * inv + 127) / 255) as u8;
                Rgba::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), 255)
            }
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

/// 2D pixel buffer with alpha, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Build from tightly packed RGBA8 bytes.
    ///
    /// Returns `None` when the byte count does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, raw: &[u8]) -> Option<Self> {
        let len = (width as usize) * (height as usize);
        if raw.len() != len * 4 {
            return None;
        }
        let pixels = raw
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
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

    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    /// One row of pixels, or an empty slice past the bottom edge.
    pub fn row(&self, y: u32) -> &[Rgba] {
        match self.idx(0, y) {
            Some(start) => &self.pixels[start..start + self.width as usize],
            None => &[],
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_checks_length() {
        assert!(Image::from_rgba8(2, 2, &[0; 15]).is_none());
        let img = Image::from_rgba8(2, 1, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(img.get(0, 0), Some(Rgba::new(1, 2, 3, 4)));
        assert_eq!(img.get(1, 0), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(img.get(2, 0), None);
    }

    #[test]
    fn test_over_blending() {
        let dst = Rgba::opaque(0, 0, 0);
        assert_eq!(Rgba::TRANSPARENT.over(dst), dst);
        assert_eq!(Rgba::opaque(9, 9, 9).over(dst), Rgba::opaque(9, 9, 9));

        let half = Rgba::new(255, 255, 255, 128).over(dst);
        assert_eq!(half.a, 255);
        assert!(half.r > 120 && half.r < 135);
    }

    #[test]
    fn test_row_access() {
        let mut img = Image::new(3, 2);
        img.set(2, 1, Rgba::MAGENTA);
        assert_eq!(img.row(1).len(), 3);
        assert_eq!(img.row(1)[2], Rgba::MAGENTA);
        assert!(img.row(2).is_empty());
    }
}
