//! Polygonal structuring elements
//!
//! Builds a square mask of side `2 * radius + 1` in which every point on a
//! family of concentric regular polygons is marked. The polygons are
//! inscribed in circles of radius `0, 0.25, 0.5, ..., radius`, so the union
//! of their outlines fills the polygon of the requested radius. Dilating an
//! image with the result spreads each bright pixel into that polygon, which
//! is the classic aperture-shaped "bokeh" highlight.
//!
//! # Mask convention
//!
//! The mask follows the kernel convention of max-filter style dilation
//! routines: a value of `0` ([`Mask::HIT`]) marks an offset that belongs to
//! the structuring element and `255` ([`Mask::BACKGROUND`]) marks one that
//! does not. The origin is the center pixel `(radius, radius)`.
//!
//! # Rasterization
//!
//! Vertex `k` of the polygon with circumradius `r` lies at
//! `θ = k * 2π / sides`, column `radius + sin(θ)·r`, row `radius + cos(θ)·r`.
//! Each edge is sampled at roughly one point per pixel along its dominant
//! axis. Coordinates are rounded half away from zero ([`f32::round`]) and
//! clamped into the mask before writing. Every sample is computed from its
//! integer index, never by accumulating a floating-point step.

use std::f32::consts::TAU;
use std::fmt;

use crate::{MorphError, MorphResult};

/// Radial distance between two consecutive polygon outlines, in pixels.
pub const RADIUS_STEP: f32 = 0.25;

/// Number of outlines per pixel of radius (`1 / RADIUS_STEP`).
const OUTLINES_PER_PIXEL: u64 = 4;

/// A point in mask coordinates: (column, row).
type Point = (f32, f32);

/// Parameters of a polygonal structuring element
///
/// Construction validates the parameters, so a `PolygonSpec` always
/// describes a mask that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolygonSpec {
    radius: u32,
    sides: u32,
}

impl PolygonSpec {
    /// Smallest number of sides that forms a polygon
    pub const MIN_SIDES: u32 = 3;

    /// Create a validated polygon specification.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameters`] if `radius` is 0, if
    /// `sides < 3`, or if the mask would not fit in memory addressing.
    pub fn new(radius: u32, sides: u32) -> MorphResult<Self> {
        if radius == 0 {
            return Err(MorphError::InvalidParameters(
                "radius must be positive".to_string(),
            ));
        }
        if sides < Self::MIN_SIDES {
            return Err(MorphError::InvalidParameters(format!(
                "polygon needs at least {} sides, got {}",
                Self::MIN_SIDES,
                sides
            )));
        }
        let side = 2 * u64::from(radius) + 1;
        let fits = u32::try_from(side).is_ok()
            && side
                .checked_mul(side)
                .and_then(|n| usize::try_from(n).ok())
                .is_some();
        if !fits {
            return Err(MorphError::InvalidParameters(format!(
                "radius {} is too large for a {}x{} mask",
                radius, side, side
            )));
        }
        Ok(Self { radius, sides })
    }

    /// Build a spec from parameters already known to be valid.
    pub(crate) const fn new_unchecked(radius: u32, sides: u32) -> Self {
        Self { radius, sides }
    }

    /// Kernel half-width in pixels.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of polygon vertices.
    #[inline]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Side length of the generated mask (`2 * radius + 1`).
    #[inline]
    pub fn side_length(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Rasterize the polygon family into a new mask.
    pub fn generate(&self) -> Mask {
        log::debug!(
            "generating polygon structuring element: radius={} sides={}",
            self.radius,
            self.sides
        );

        let mut mask = Mask::filled(self.radius);
        let center = self.radius as f32;
        let angle = TAU / self.sides as f32;

        for ring in 0..=u64::from(self.radius) * OUTLINES_PER_PIXEL {
            let r = ring as f32 * RADIUS_STEP;
            let vertex = |k: u32| -> Point {
                let theta = k as f32 * angle;
                (center + theta.sin() * r, center + theta.cos() * r)
            };

            let mut previous = vertex(0);
            for k in 1..=self.sides {
                let current = vertex(k);
                mask.draw_segment(previous, current);
                previous = current;
            }
        }

        log::trace!(
            "polygon structuring element {}x{} has {} hits",
            mask.side(),
            mask.side(),
            mask.hit_count()
        );
        mask
    }
}

/// Generate a polygonal structuring element.
///
/// Shorthand for `PolygonSpec::new(radius, sides)?.generate()`.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] if `radius` is 0 or
/// `sides < 3`. No partial mask is produced.
///
/// # Examples
///
/// ```
/// use polysel_morph::generate_structuring_element;
///
/// let mask = generate_structuring_element(2, 4).unwrap();
/// assert_eq!(mask.side(), 5);
/// assert!(mask.is_hit(2, 2));
/// assert!(!mask.is_hit(0, 0));
/// ```
pub fn generate_structuring_element(radius: u32, sides: u32) -> MorphResult<Mask> {
    Ok(PolygonSpec::new(radius, sides)?.generate())
}

/// Square byte mask describing a structuring element
///
/// Values are [`Mask::HIT`] (`0`) or [`Mask::BACKGROUND`] (`255`), stored
/// row-major with the origin at the top-left. The element's center is
/// `(radius, radius)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    radius: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Value of a position that belongs to the structuring element
    pub const HIT: u8 = 0;
    /// Value of a position outside the structuring element
    pub const BACKGROUND: u8 = 255;

    fn filled(radius: u32) -> Self {
        let side = (2 * radius + 1) as usize;
        Self {
            radius,
            data: vec![Self::BACKGROUND; side * side],
        }
    }

    /// Half-width of the mask; the center is `(radius, radius)`.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Width and height of the mask (`2 * radius + 1`).
    #[inline]
    pub fn side(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Row-major mask bytes, `side() * side()` long.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the mask and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Get the value at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        let side = self.side();
        if x >= side || y >= side {
            return None;
        }
        Some(self.data[y as usize * side as usize + x as usize])
    }

    /// Check whether `(x, y)` belongs to the structuring element.
    pub fn is_hit(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == Some(Self::HIT)
    }

    /// Number of positions that belong to the structuring element.
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == Self::HIT).count()
    }

    /// Iterate over hit positions as `(x, y)` mask coordinates.
    pub fn hit_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let side = self.side() as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == Self::HIT)
            .map(move |(idx, _)| ((idx % side) as u32, (idx / side) as u32))
    }

    /// Rasterize the segment `start -> end`.
    ///
    /// Samples are taken at `t = j / span` for every `j` with `t <= 1`, where
    /// `span` is the larger of the two axis extents. A zero-length segment
    /// marks only its start point.
    fn draw_segment(&mut self, start: Point, end: Point) {
        let dx = end.0 - start.0;
        let dy = end.1 - start.1;
        let span = dx.abs().max(dy.abs());
        if span == 0.0 {
            self.stamp(start);
            return;
        }

        let delta = 1.0 / span;
        let mut j = 0u32;
        loop {
            let t = j as f32 * delta;
            if t > 1.0 {
                break;
            }
            self.stamp((start.0 + dx * t, start.1 + dy * t));
            j += 1;
        }
    }

    /// Mark the pixel nearest to `p`, clamped into the mask.
    #[inline]
    fn stamp(&mut self, p: Point) {
        let side = self.side() as usize;
        let x = clamp_index(p.0, side - 1);
        let y = clamp_index(p.1, side - 1);
        self.data[y * side + x] = Self::HIT;
    }
}

/// Round half away from zero and clamp into `[0, max]`.
#[inline]
fn clamp_index(v: f32, max: usize) -> usize {
    let r = v.round();
    if r <= 0.0 { 0 } else { (r as usize).min(max) }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mask {}x{}", self.side(), self.side())?;
        fmt::Display::fmt(self, f)
    }
}

/// Renders one text row per mask row: `x` for a hit, `.` otherwise.
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.side() as usize) {
            for &v in row {
                f.write_str(if v == Self::HIT { "x" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            generate_structuring_element(0, 6),
            Err(MorphError::InvalidParameters(_))
        ));
        assert!(matches!(
            generate_structuring_element(5, 2),
            Err(MorphError::InvalidParameters(_))
        ));
        assert!(matches!(
            generate_structuring_element(5, 0),
            Err(MorphError::InvalidParameters(_))
        ));
        assert!(PolygonSpec::new(1, 3).is_ok());
    }

    #[test]
    fn test_dimensions_are_odd() {
        for radius in 1..=12 {
            for sides in [3, 4, 7, 10] {
                let mask = generate_structuring_element(radius, sides).unwrap();
                let side = 2 * radius + 1;
                assert_eq!(mask.side(), side);
                assert_eq!(mask.as_bytes().len(), (side * side) as usize);
            }
        }
    }

    #[test]
    fn test_values_are_binary_and_center_hit() {
        for sides in 3..=10 {
            let mask = generate_structuring_element(7, sides).unwrap();
            assert!(
                mask.as_bytes()
                    .iter()
                    .all(|&v| v == Mask::HIT || v == Mask::BACKGROUND)
            );
            assert!(mask.is_hit(7, 7), "center not hit for {} sides", sides);
        }
    }

    #[test]
    fn test_diamond_radius_2() {
        let mask = generate_structuring_element(2, 4).unwrap();
        for y in 0..5i32 {
            for x in 0..5i32 {
                let inside = (x - 2).abs() + (y - 2).abs() <= 2;
                assert_eq!(
                    mask.is_hit(x as u32, y as u32),
                    inside,
                    "pixel ({}, {}) in\n{}",
                    x,
                    y,
                    mask
                );
            }
        }
        assert_eq!(mask.hit_count(), 13);
        assert_eq!(mask.get(0, 0), Some(Mask::BACKGROUND));
        assert_eq!(mask.get(2, 0), Some(Mask::HIT));
    }

    #[test]
    fn test_plus_radius_1() {
        let mask = generate_structuring_element(1, 4).unwrap();
        assert_eq!(mask.to_string(), ".x.\nxxx\n.x.\n");
    }

    #[test]
    fn test_hexagon_radius_1() {
        let mask = generate_structuring_element(1, 6).unwrap();
        // The side vertices sit at rows 0.5 and 1.5 up to f32 error in
        // cos(). On the right that error pushes them outward to rows 0 and
        // 2; on the left both land on row 1, so the left corners stay empty.
        assert_eq!(mask.to_string(), ".xx\nxxx\n.xx\n");
        assert_eq!(mask.hit_count(), 7);
        assert_eq!(mask, generate_structuring_element(1, 6).unwrap());
    }

    #[test]
    fn test_hits_stay_near_circumcircle() {
        let radius = 15u32;
        for sides in 3..=10 {
            let mask = generate_structuring_element(radius, sides).unwrap();
            let limit = (radius as f32 + 1.0).powi(2);
            for (x, y) in mask.hit_positions() {
                let dx = x as f32 - radius as f32;
                let dy = y as f32 - radius as f32;
                assert!(dx * dx + dy * dy <= limit, "({}, {}) outside", x, y);
            }
        }
    }

    #[test]
    fn test_hit_positions_match_count() {
        let mask = generate_structuring_element(6, 5).unwrap();
        assert_eq!(mask.hit_positions().count(), mask.hit_count());
        assert!(mask.hit_positions().all(|(x, y)| mask.is_hit(x, y)));
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-0.4, 4), 0);
        assert_eq!(clamp_index(-3.0, 4), 0);
        assert_eq!(clamp_index(2.5, 4), 3);
        assert_eq!(clamp_index(1.49, 4), 1);
        assert_eq!(clamp_index(4.6, 4), 4);
    }

    #[test]
    fn test_degenerate_segment_marks_start_only() {
        let mut mask = Mask::filled(3);
        mask.draw_segment((3.0, 3.0), (3.0, 3.0));
        assert_eq!(mask.hit_count(), 1);
        assert!(mask.is_hit(3, 3));
    }

    #[test]
    fn test_segment_sampling() {
        let mut mask = Mask::filled(3);
        mask.draw_segment((0.0, 0.0), (6.0, 3.0));
        // One sample per column along the dominant axis
        assert_eq!(mask.hit_count(), 7);
        assert!(mask.is_hit(0, 0));
        assert!(mask.is_hit(6, 3));
        assert!(mask.is_hit(1, 1)); // (1, 0.5) rounds away from zero
    }

    #[test]
    fn test_spec_accessors() {
        let spec = PolygonSpec::new(20, 6).unwrap();
        assert_eq!(spec.radius(), 20);
        assert_eq!(spec.sides(), 6);
        assert_eq!(spec.side_length(), 41);
        assert_eq!(spec.generate().side(), 41);
    }
}
