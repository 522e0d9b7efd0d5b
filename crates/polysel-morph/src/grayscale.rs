//! Grayscale morphological operations
//!
//! Implements erosion and dilation for 8-bpp grayscale images with an
//! arbitrary structuring element.
//!
//! # Algorithm
//!
//! For each output pixel `p` and each hit offset `o` of the SEL:
//! - **Dilation**: maximum of `src(p + o)`
//! - **Erosion**: minimum of `src(p + o)`
//!
//! Offsets that land outside the image are skipped, so no border value is
//! invented. A pixel with no in-image offset gets `0` from dilation and
//! `255` from erosion. With this convention `erode(f)` equals
//! `invert(dilate(invert(f)))` exactly.
//!
//! Dilating a single bright pixel stamps the SEL reflected through its
//! origin.

use crate::polygon::Mask;
use crate::sel::Sel;
use crate::{MorphError, MorphResult};
use polysel_core::{Pix, PixMut, PixelDepth};

/// Extremum taken over the SEL neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extremum {
    /// Maximum (dilation)
    Max,
    /// Minimum (erosion)
    Min,
}

impl Extremum {
    #[inline]
    fn identity(self) -> u8 {
        match self {
            Extremum::Max => 0,
            Extremum::Min => 255,
        }
    }

    #[inline]
    fn combine(self, acc: u8, v: u8) -> u8 {
        match self {
            Extremum::Max => acc.max(v),
            Extremum::Min => acc.min(v),
        }
    }
}

/// Apply `op` over `offsets` to a row-major 8-bit plane.
pub(crate) fn morph_plane(
    src: &[u8],
    width: usize,
    height: usize,
    offsets: &[(i32, i32)],
    op: Extremum,
) -> Vec<u8> {
    let mut dst = vec![op.identity(); width * height];
    let (w, h) = (width as i64, height as i64);

    for y in 0..h {
        for x in 0..w {
            let mut acc = op.identity();
            for &(dx, dy) in offsets {
                let sx = x + dx as i64;
                let sy = y + dy as i64;
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    continue;
                }
                acc = op.combine(acc, src[(sy * w + sx) as usize]);
            }
            dst[(y * w + x) as usize] = acc;
        }
    }
    dst
}

/// Offsets of a 1-D brick of `size` pixels with origin at `size / 2`,
/// limited to what can reach inside an image axis of `extent` pixels.
pub(crate) fn brick_offsets(size: u32, extent: usize) -> std::ops::RangeInclusive<i32> {
    let origin = i64::from(size / 2);
    let reach = i64::try_from(extent)
        .unwrap_or(i64::MAX)
        .saturating_sub(1)
        .min(i64::from(i32::MAX));
    let lo = (-origin).max(-reach);
    let hi = (i64::from(size) - 1 - origin).min(reach);
    // Both ends lie in [-reach, reach], which fits in i32
    lo as i32..=hi as i32
}

/// Separable rectangular max/min filter on a plane.
pub(crate) fn brick_plane(
    src: &[u8],
    width: usize,
    height: usize,
    hsize: u32,
    vsize: u32,
    op: Extremum,
) -> Vec<u8> {
    let horizontal: Vec<(i32, i32)> = brick_offsets(hsize, width).map(|dx| (dx, 0)).collect();
    let vertical: Vec<(i32, i32)> = brick_offsets(vsize, height).map(|dy| (0, dy)).collect();
    let tmp = morph_plane(src, width, height, &horizontal, op);
    morph_plane(&tmp, width, height, &vertical, op)
}

pub(crate) fn check_brick_size(hsize: u32, vsize: u32) -> MorphResult<()> {
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick size must be positive, got {}x{}",
            hsize, vsize
        )));
    }
    Ok(())
}

fn check_gray(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Copy an 8-bpp image into a row-major byte plane.
fn gray_plane(pix: &Pix) -> Vec<u8> {
    let mut plane = Vec::with_capacity(pix.width() as usize * pix.height() as usize);
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            plane.push(pix.get_pixel_unchecked(x, y) as u8);
        }
    }
    plane
}

/// Build an 8-bpp image from a row-major byte plane.
fn plane_to_gray(width: u32, height: u32, plane: &[u8]) -> MorphResult<Pix> {
    let mut pm: PixMut = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();
    for (i, &v) in plane.iter().enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        pm.set_pixel_unchecked(x, y, v as u32);
    }
    Ok(pm.into())
}

fn morph_gray(pix: &Pix, sel: &Sel, op: Extremum) -> MorphResult<Pix> {
    check_gray(pix)?;
    let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();
    let (w, h) = (pix.width(), pix.height());
    let dst = morph_plane(&gray_plane(pix), w as usize, h as usize, &offsets, op);
    plane_to_gray(w, h, &dst)
}

/// Dilate a grayscale image with a structuring element
///
/// Dilation computes the maximum pixel value over the SEL hits,
/// which expands bright regions and shrinks dark regions.
pub fn dilate_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    log::debug!(
        "dilate_gray: {}x{} image, {}x{} sel with {} hits",
        pix.width(),
        pix.height(),
        sel.width(),
        sel.height(),
        sel.hit_count()
    );
    morph_gray(pix, sel, Extremum::Max)
}

/// Erode a grayscale image with a structuring element
///
/// Erosion computes the minimum pixel value over the SEL hits,
/// which shrinks bright regions and expands dark regions.
pub fn erode_gray(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    log::debug!(
        "erode_gray: {}x{} image, {} hits",
        pix.width(),
        pix.height(),
        sel.hit_count()
    );
    morph_gray(pix, sel, Extremum::Min)
}

/// Dilate a grayscale image with a polygon mask
pub fn dilate_gray_mask(pix: &Pix, mask: &Mask) -> MorphResult<Pix> {
    dilate_gray(pix, &Sel::from_mask(mask))
}

/// Dilate a grayscale image with a brick structuring element
///
/// This is a plain rectangular maximum filter of `hsize` x `vsize`,
/// computed as two 1-D passes.
pub fn dilate_gray_brick(pix: &Pix, hsize: u32, vsize: u32) -> MorphResult<Pix> {
    check_gray(pix)?;
    check_brick_size(hsize, vsize)?;
    log::debug!(
        "dilate_gray_brick: {}x{} image, {}x{} brick",
        pix.width(),
        pix.height(),
        hsize,
        vsize
    );
    if hsize == 1 && vsize == 1 {
        return Ok(pix.clone());
    }
    let (w, h) = (pix.width(), pix.height());
    let dst = brick_plane(
        &gray_plane(pix),
        w as usize,
        h as usize,
        hsize,
        vsize,
        Extremum::Max,
    );
    plane_to_gray(w, h, &dst)
}
