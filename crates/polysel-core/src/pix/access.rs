//! Pixel access functions
//!
//! Get/set for 8-bit gray and 32-bit RGBA pixels. 8-bit samples are
//! packed four per word, most significant byte first.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Read the sample at column `x` from a row of words.
#[inline]
fn get_data_sample(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => {
            let word = line[(x >> 2) as usize];
            (word >> (24 - 8 * (x & 3))) & 0xff
        }
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Write the sample at column `x` into a row of words.
#[inline]
fn set_data_sample(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit8 => {
            let shift = 24 - 8 * (x & 3);
            let word = &mut line[(x >> 2) as usize];
            *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
        }
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or the row is too short for `x`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_sample(self.row_data(y), x, self.depth())
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let wpl = self.wpl() as usize;
        let start = y as usize * wpl;
        get_data_sample(&self.data()[start..start + wpl], x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or the row is too short for `x`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_data_sample(self.row_data_mut(y), x, depth, val);
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}
