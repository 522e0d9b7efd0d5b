//! polysel - Polygonal structuring elements for Rust
//!
//! # Overview
//!
//! polysel generates square byte masks shaped like filled regular polygons
//! and uses them as structuring elements for grayscale and color
//! morphology. Dilating a photograph with such a mask renders bright
//! highlights as polygons, imitating the bokeh of a bladed aperture.
//!
//! - Structuring-element generation ([`generate_structuring_element`])
//! - Morphological operations (dilation, erosion, max filter)
//! - Polygonal bokeh on 8-bpp and 32-bpp images
//!
//! # Example
//!
//! ```
//! use polysel::generate_structuring_element;
//!
//! let mask = generate_structuring_element(20, 6).unwrap();
//! assert_eq!(mask.side(), 41);
//! assert_eq!(mask.as_bytes().len(), 41 * 41);
//! assert!(mask.is_hit(20, 20));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use polysel_core::*;

// Re-export the morphology crate as a module
pub use polysel_morph as morph;

pub use polysel_morph::{Mask, MorphError, PolygonSpec, generate_structuring_element};
