//! polysel-morph - Polygonal structuring elements and morphology
//!
//! This crate provides:
//!
//! - Polygon structuring-element generation: a square byte mask marking a
//!   family of concentric regular polygons, for use as a dilation kernel
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Grayscale morphology: erosion and dilation for 8-bpp images
//! - Color morphology: erosion and dilation for 32-bpp images
//! - Polygonal bokeh: dilation of a photograph with a polygon aperture

pub mod bokeh;
pub mod color;
mod error;
pub mod grayscale;
pub mod polygon;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use polygon::{Mask, PolygonSpec, RADIUS_STEP, generate_structuring_element};
pub use sel::{Sel, SelElement};

// Re-export commonly used grayscale morphology functions
pub use grayscale::{dilate_gray, dilate_gray_brick, dilate_gray_mask, erode_gray};

// Re-export commonly used color morphology functions
pub use color::{
    ColorChannel, dilate_color, dilate_color_brick, dilate_color_mask, erode_color,
    extract_channel,
};

pub use bokeh::{BokehParams, bokeh_dilate, bokeh_dilate_with, max_filter};
