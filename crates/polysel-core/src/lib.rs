//! polysel-core - Basic data structures for morphological image processing
//!
//! This crate provides the image container shared by the polysel crates:
//!
//! - [`Pix`] / [`PixMut`] - The main image container (immutable / mutable)
//! - [`PixelDepth`] - Supported pixel depths (8-bit gray, 32-bit RGBA)
//! - [`color`] - Channel helpers for packed 32-bit pixels

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{Pix, PixMut, PixelDepth};

/// Color channel indices and helper functions for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Red channel (MSB, byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;
    /// Alpha channel (LSB, byte 3)
    pub const ALPHA: usize = 3;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Shift amounts indexed by channel (`RED`, `GREEN`, `BLUE`, `ALPHA`).
    pub const CHANNEL_SHIFTS: [u32; 4] = [RED_SHIFT, GREEN_SHIFT, BLUE_SHIFT, ALPHA_SHIFT];

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Extract the component at `channel` (0 = red ... 3 = alpha).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 3`.
    #[inline]
    pub fn channel(pixel: u32, channel: usize) -> u8 {
        ((pixel >> CHANNEL_SHIFTS[channel]) & 0xff) as u8
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

}
