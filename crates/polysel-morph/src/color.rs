//! Color morphological operations
//!
//! Implements erosion and dilation for 32-bpp RGBA images.
//!
//! # Algorithm
//!
//! Color morphology applies the grayscale operation separately to each of
//! the four channels (alpha included), then recombines the results.

use crate::grayscale::{Extremum, brick_plane, check_brick_size, morph_plane};
use crate::polygon::Mask;
use crate::sel::Sel;
use crate::{MorphError, MorphResult};
use polysel_core::color::{self as rgba, ALPHA, BLUE, GREEN, RED};
use polysel_core::{Pix, PixMut, PixelDepth};

/// Color channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
    /// Alpha channel
    Alpha,
}

impl ColorChannel {
    /// All channels in pixel order
    pub const ALL: [ColorChannel; 4] = [
        ColorChannel::Red,
        ColorChannel::Green,
        ColorChannel::Blue,
        ColorChannel::Alpha,
    ];

    /// Index of the channel as used by [`polysel_core::color`]
    pub fn index(self) -> usize {
        match self {
            ColorChannel::Red => RED,
            ColorChannel::Green => GREEN,
            ColorChannel::Blue => BLUE,
            ColorChannel::Alpha => ALPHA,
        }
    }
}

fn check_color(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(MorphError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Extract one channel of a 32-bpp image as a row-major plane.
pub fn extract_channel(pix: &Pix, ch: ColorChannel) -> MorphResult<Vec<u8>> {
    check_color(pix)?;
    let idx = ch.index();
    let mut plane = Vec::with_capacity(pix.width() as usize * pix.height() as usize);
    for y in 0..pix.height() {
        plane.extend(
            pix.row_data(y)[..pix.width() as usize]
                .iter()
                .map(|&p| rgba::channel(p, idx)),
        );
    }
    Ok(plane)
}

/// Process every channel with `f` and recombine into a new image.
fn map_channels<F>(pix: &Pix, f: F) -> MorphResult<Pix>
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    check_color(pix)?;
    let (w, h) = (pix.width(), pix.height());
    let planes = ColorChannel::ALL
        .iter()
        .map(|&ch| extract_channel(pix, ch).map(|p| f(&p)))
        .collect::<MorphResult<Vec<_>>>()?;

    let mut pm: PixMut = Pix::new(w, h, PixelDepth::Bit32)?.to_mut();
    for y in 0..h {
        let base = y as usize * w as usize;
        for (x, px) in pm.row_data_mut(y).iter_mut().take(w as usize).enumerate() {
            let i = base + x;
            *px = rgba::compose_rgba(planes[0][i], planes[1][i], planes[2][i], planes[3][i]);
        }
    }
    Ok(pm.into())
}

fn morph_color(pix: &Pix, sel: &Sel, op: Extremum) -> MorphResult<Pix> {
    let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    map_channels(pix, |plane| morph_plane(plane, w, h, &offsets, op))
}

/// Dilate a color image with a structuring element
pub fn dilate_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    log::debug!(
        "dilate_color: {}x{} image, {} hits",
        pix.width(),
        pix.height(),
        sel.hit_count()
    );
    morph_color(pix, sel, Extremum::Max)
}

/// Erode a color image with a structuring element
pub fn erode_color(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    log::debug!(
        "erode_color: {}x{} image, {} hits",
        pix.width(),
        pix.height(),
        sel.hit_count()
    );
    morph_color(pix, sel, Extremum::Min)
}

/// Dilate a color image with a polygon mask
pub fn dilate_color_mask(pix: &Pix, mask: &Mask) -> MorphResult<Pix> {
    dilate_color(pix, &Sel::from_mask(mask))
}

/// Dilate a color image with a brick structuring element (per-channel max filter)
pub fn dilate_color_brick(pix: &Pix, hsize: u32, vsize: u32) -> MorphResult<Pix> {
    check_brick_size(hsize, vsize)?;
    check_color(pix)?;
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    map_channels(pix, |plane| {
        brick_plane(plane, w, h, hsize, vsize, Extremum::Max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_structuring_element;
    use crate::grayscale::dilate_gray;

    fn test_image(w: u32, h: u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit32).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                let r = ((x * 29 + y * 3) % 256) as u8;
                let g = ((x * 7 + y * 41) % 256) as u8;
                let b = ((x * y + 11) % 256) as u8;
                let a = if (x + y) % 5 == 0 { 0 } else { 200 };
                pm.set_rgba(x, y, r, g, b, a).unwrap();
            }
        }
        pm.into()
    }

    #[test]
    fn test_dilate_color_matches_per_channel_gray() {
        let pix = test_image(14, 11);
        let sel = Sel::from_mask(&generate_structuring_element(2, 5).unwrap());
        let out = dilate_color(&pix, &sel).unwrap();

        for ch in ColorChannel::ALL {
            let plane = extract_channel(&pix, ch).unwrap();
            let gray = Pix::from_gray_values(14, 11, &plane).unwrap();
            let expected = dilate_gray(&gray, &sel).unwrap();
            let actual = extract_channel(&out, ch).unwrap();
            for y in 0..11u32 {
                for x in 0..14u32 {
                    assert_eq!(
                        actual[(y * 14 + x) as usize] as u32,
                        expected.get_pixel(x, y).unwrap(),
                        "{:?} at ({}, {})",
                        ch,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_erode_color_not_brighter() {
        let pix = test_image(9, 9);
        let sel = Sel::create_square(3).unwrap();
        let out = erode_color(&pix, &sel).unwrap();
        for y in 0..9 {
            for x in 0..9 {
                let (r0, g0, b0, a0) = pix.get_rgba(x, y).unwrap();
                let (r1, g1, b1, a1) = out.get_rgba(x, y).unwrap();
                assert!(r1 <= r0 && g1 <= g0 && b1 <= b0 && a1 <= a0);
            }
        }
    }

    #[test]
    fn test_brick_matches_square_sel() {
        let pix = test_image(10, 8);
        let a = dilate_color_brick(&pix, 3, 5).unwrap();
        let b = dilate_color(&pix, &Sel::create_brick(3, 5).unwrap()).unwrap();
        assert!(a.equals(&b));
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let sel = Sel::create_square(3).unwrap();
        assert!(matches!(
            dilate_color(&pix, &sel),
            Err(MorphError::UnsupportedDepth { actual: 8, .. })
        ));
        assert!(extract_channel(&pix, ColorChannel::Red).is_err());
    }
}
