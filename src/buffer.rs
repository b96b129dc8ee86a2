//! RGB pixel buffer
//!
//! Row-major, 8 bits per channel, 3 interleaved channels. This is the unit of
//! input and output for every effect; all effects preserve its dimensions.

/// Interleaved channels per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// Row-major RGB888 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageBuffer {
    /// Create a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width as usize) * (height as usize) * CHANNELS],
            width,
            height,
        }
    }

    /// Create a buffer filled with a solid color.
    pub fn filled(width: u32, height: u32, r: u8, g: u8, b: u8) -> Self {
        let mut buffer = Self::new(width, height);
        for px in buffer.pixels.chunks_exact_mut(CHANNELS) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
        buffer
    }

    /// Wrap a raw interleaved RGB byte vector. Returns `None` when the length
    /// does not match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() == (width as usize) * (height as usize) * CHANNELS {
            Some(Self {
                pixels,
                width,
                height,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (not bytes).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer, yielding the raw interleaved bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) as usize) * CHANNELS
    }

    /// Read a pixel (bounds checked). Returns (r, g, b) or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }

    /// Write a pixel (bounds checked).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = r;
            self.pixels[idx + 1] = g;
            self.pixels[idx + 2] = b;
        }
    }

    /// Borrow one row of interleaved bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.pixel_index(0, y);
        let end = start + (self.width as usize) * CHANNELS;
        &self.pixels[start..end]
    }

    /// Mutably borrow one row of interleaved bytes.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.pixel_index(0, y);
        let end = start + (self.width as usize) * CHANNELS;
        &mut self.pixels[start..end]
    }
}
