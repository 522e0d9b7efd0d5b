//! Polygonal bokeh by dilation
//!
//! Dilating a photograph with a polygonal structuring element turns every
//! bright highlight into a polygon, the way an aperture with straight blades
//! renders out-of-focus points. The square max filter of the same diameter
//! is provided for comparison.

use std::ops::RangeInclusive;

use crate::color::{dilate_color_brick, dilate_color_mask};
use crate::grayscale::{dilate_gray_brick, dilate_gray_mask};
use crate::polygon::{Mask, PolygonSpec};
use crate::{MorphError, MorphResult};
use polysel_core::{Pix, PixelDepth};

/// Aperture parameters for [`bokeh_dilate_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BokehParams {
    spec: PolygonSpec,
}

impl BokehParams {
    /// Default kernel half-width in pixels
    pub const DEFAULT_RADIUS: u32 = 20;
    /// Default number of aperture blades
    pub const DEFAULT_SIDES: u32 = 6;
    /// Blade counts offered to users for interactive selection
    pub const SIDES_RANGE: RangeInclusive<u32> = 3..=10;

    /// Create validated bokeh parameters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PolygonSpec::new`].
    pub fn new(radius: u32, sides: u32) -> MorphResult<Self> {
        Ok(Self {
            spec: PolygonSpec::new(radius, sides)?,
        })
    }

    /// Same radius, different blade count.
    pub fn with_sides(self, sides: u32) -> MorphResult<Self> {
        Self::new(self.spec.radius(), sides)
    }

    /// Kernel half-width in pixels
    pub fn radius(&self) -> u32 {
        self.spec.radius()
    }

    /// Number of aperture blades
    pub fn sides(&self) -> u32 {
        self.spec.sides()
    }

    /// Build the structuring element for these parameters.
    pub fn mask(&self) -> Mask {
        self.spec.generate()
    }
}

impl Default for BokehParams {
    fn default() -> Self {
        Self {
            spec: PolygonSpec::new_unchecked(Self::DEFAULT_RADIUS, Self::DEFAULT_SIDES),
        }
    }
}

/// Dilate an 8-bpp or 32-bpp image with a regular polygon of `sides` sides.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] for a zero radius or fewer
/// than three sides.
pub fn bokeh_dilate(pix: &Pix, radius: u32, sides: u32) -> MorphResult<Pix> {
    bokeh_dilate_with(pix, &BokehParams::new(radius, sides)?)
}

/// Dilate an 8-bpp or 32-bpp image with the polygon described by `params`.
pub fn bokeh_dilate_with(pix: &Pix, params: &BokehParams) -> MorphResult<Pix> {
    log::debug!(
        "bokeh: radius={} sides={} on {}x{} {} bpp",
        params.radius(),
        params.sides(),
        pix.width(),
        pix.height(),
        pix.depth().bits()
    );
    let mask = params.mask();
    match pix.depth() {
        PixelDepth::Bit8 => dilate_gray_mask(pix, &mask),
        PixelDepth::Bit32 => dilate_color_mask(pix, &mask),
    }
}

/// Square max filter with the same footprint as a bokeh kernel of `radius`.
pub fn max_filter(pix: &Pix, radius: u32) -> MorphResult<Pix> {
    let diameter = radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| MorphError::InvalidParameters(format!("radius {} too large", radius)))?;
    match pix.depth() {
        PixelDepth::Bit8 => dilate_gray_brick(pix, diameter, diameter),
        PixelDepth::Bit32 => dilate_color_brick(pix, diameter, diameter),
    }
}
