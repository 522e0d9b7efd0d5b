//! PIX - The main image container
//!
//! The `Pix` structure is the image type consumed by the morphology crate.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - 8-bit pixels are packed MSB to LSB within each word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, copy it into a `PixMut` with [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Words per line
    wpl: u32,
    data: Vec<u32>,
}

/// PIX - Main image container
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use polysel_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                data,
            }),
        })
    }

    /// Create an 8-bit image from row-major gray values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `values` is not exactly
    /// `width * height` long.
    pub fn from_gray_values(width: u32, height: u32, values: &[u8]) -> Result<Self> {
        let mut pm = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
        let len = (width as usize) * (height as usize);
        if values.len() != len {
            return Err(Error::IndexOutOfBounds {
                index: values.len(),
                len,
            });
        }
        for (i, &v) in values.iter().enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            pm.set_pixel_unchecked(x, y, v as u32);
        }
        Ok(pm.into())
    }

    /// Compute words per line for given width and depth.
    ///
    /// Uses u64 arithmetic to prevent overflow for large widths.
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
        let bits_per_line = u64::from(width) * u64::from(depth.bits());
        let wpl = bits_per_line.div_ceil(32);
        u32::try_from(wpl).map_err(|_| Error::InvalidDimension { width, height: 1 })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Check if two PIX have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Check pixel-exact equality (padding bits are ignored).
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width())
                .all(|x| self.get_pixel_unchecked(x, y) == other.get_pixel_unchecked(x, y))
        })
    }

    /// Invert every sample (`max - value`).
    ///
    /// For 32-bit images all four channels, alpha included, are inverted.
    pub fn invert(&self) -> Pix {
        let mut pm = self.to_mut();
        // Padding bits flip too; they are never read back.
        for word in pm.inner.data.iter_mut() {
            *word = !*word;
        }
        pm.into()
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth() {
        assert_eq!(PixelDepth::Bit8.bits(), 8);
        assert_eq!(PixelDepth::Bit32.bits(), 32);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.wpl(), 25);

        let pix = Pix::new(3, 2, PixelDepth::Bit32).unwrap();
        assert_eq!(pix.wpl(), 3);
        assert_eq!(pix.data().len(), 6);
    }

    #[test]
    fn test_pix_invalid_dimensions() {
        assert!(Pix::new(0, 10, PixelDepth::Bit8).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit32).is_err());
    }

    #[test]
    fn test_to_mut_copies() {
        let pix = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
        let mut pm = pix.to_mut();
        pm.set_pixel(4, 4, 255).unwrap();
        let modified: Pix = pm.into();
        assert_eq!(modified.get_pixel(4, 4), Some(255));
        assert_eq!(pix.get_pixel(4, 4), Some(0));
    }

    #[test]
    fn test_from_gray_values() {
        let pix = Pix::from_gray_values(3, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(2, 0), Some(3));
        assert_eq!(pix.get_pixel(1, 1), Some(5));
        assert!(Pix::from_gray_values(3, 2, &[0; 5]).is_err());
    }

    #[test]
    fn test_invert_and_equals() {
        let pix = Pix::from_gray_values(2, 2, &[0, 10, 200, 255]).unwrap();
        let inv = pix.invert();
        assert_eq!(inv.get_pixel(0, 0), Some(255));
        assert_eq!(inv.get_pixel(1, 0), Some(245));
        assert_eq!(inv.get_pixel(1, 1), Some(0));
        assert!(inv.invert().equals(&pix));
        assert!(!inv.equals(&pix));
    }
}
