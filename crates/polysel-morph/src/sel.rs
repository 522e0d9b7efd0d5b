//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Polygon masks produced by [`crate::generate_structuring_element`]
//! convert into a `Sel` with [`Sel::from_mask`].

use crate::polygon::Mask;
use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - this offset takes part in the operation
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create a new structuring element filled with don't-care elements
    ///
    /// The origin is placed at the center `(width / 2, height / 2)`.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| MorphError::InvalidSel(format!("{}x{} is too large", width, height)))?;
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; len],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a structuring element from a polygon mask
    ///
    /// Mask hits (`0`) become [`SelElement::Hit`]; every other value becomes
    /// [`SelElement::DontCare`]. The origin is the mask center.
    pub fn from_mask(mask: &Mask) -> Self {
        let side = mask.side();
        let data = mask
            .as_bytes()
            .iter()
            .map(|&v| {
                if v == Mask::HIT {
                    SelElement::Hit
                } else {
                    SelElement::DontCare
                }
            })
            .collect();
        Self {
            width: side,
            height: side,
            cx: mask.radius(),
            cy: mask.radius(),
            data,
        }
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{}",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Set an element at (x, y)
    ///
    /// Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.data[idx] = elem;
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width as usize;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx % width) as i32;
                    let y = (idx / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_structuring_element;

    #[test]
    fn test_new_and_brick() {
        assert!(Sel::new(0, 3).is_err());
        let sel = Sel::create_brick(3, 5).unwrap();
        assert_eq!(sel.width(), 3);
        assert_eq!(sel.height(), 5);
        assert_eq!(sel.origin_x(), 1);
        assert_eq!(sel.origin_y(), 2);
        assert_eq!(sel.hit_count(), 15);
        assert_eq!(Sel::new(4, 4).unwrap().hit_count(), 0);
    }

    #[test]
    fn test_elements_and_origin() {
        let mut sel = Sel::new(3, 2).unwrap();
        sel.set_element(2, 1, SelElement::Hit);
        sel.set_element(3, 0, SelElement::Hit);
        assert_eq!(sel.get_element(2, 1), Some(SelElement::Hit));
        assert_eq!(sel.get_element(0, 0), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(3, 0), None);
        assert_eq!(sel.hit_count(), 1);

        assert!(sel.set_origin(3, 0).is_err());
        assert!(sel.set_origin(0, 2).is_err());
        sel.set_origin(0, 0).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (0, 0));
    }

    #[test]
    fn test_from_mask() {
        let mask = generate_structuring_element(3, 6).unwrap();
        let sel = Sel::from_mask(&mask);
        assert_eq!(sel.width(), 7);
        assert_eq!(sel.height(), 7);
        assert_eq!(sel.origin_x(), 3);
        assert_eq!(sel.origin_y(), 3);
        assert_eq!(sel.hit_count(), mask.hit_count());
        assert_eq!(sel.get_element(3, 3), Some(SelElement::Hit));
        assert!(sel.hit_offsets().any(|o| o == (0, 0)));
    }

    #[test]
    fn test_hit_offsets() {
        let mut sel = Sel::new(3, 3).unwrap();
        for i in 0..3 {
            sel.set_element(i, i, SelElement::Hit);
        }
        sel.set_origin(0, 0).unwrap();
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets, vec![(0, 0), (1, 1), (2, 2)]);

        sel.set_origin(1, 1).unwrap();
        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets, vec![(-1, -1), (0, 0), (1, 1)]);
    }
}
