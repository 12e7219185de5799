//! Procedural shape layout.
//!
//! The layout stage turns a canvas and four percentage parameters into an
//! ordered list of shapes. The formulas that map parameters to counts and
//! zones live here; the sampling itself is in [`engine`].

mod engine;

pub use engine::Engine;

use serde::{Deserialize, Serialize};

use bauhaus_core::{canvas::Canvas, geometry::Point};

/// Fewest shapes a scene asks for (density 0).
pub const MIN_SHAPES: usize = 2;
/// Most shapes a scene asks for (density 100).
pub const MAX_SHAPES: usize = 20;
/// Extra candidate positions sampled per shape at dispersion 100.
pub const MAX_EXTRA_CANDIDATES: usize = 60;

/// User-tunable layout parameters, each a percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// How many shapes to place.
    pub density: f32,
    /// How hard placement tries to spread shapes apart.
    pub dispersion: f32,
    /// Size of the empty ellipse around the canvas center.
    pub center_exclusion: f32,
    /// Scale of every shape; 50 is nominal.
    pub shape_size: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            density: 50.0,
            dispersion: 50.0,
            center_exclusion: 50.0,
            shape_size: 50.0,
        }
    }
}

/// Number of shapes requested at `density`.
///
/// # Examples
///
/// ```
/// # use bauhaus::layout::shape_count;
/// assert_eq!(shape_count(0.0), 2);
/// assert_eq!(shape_count(50.0), 11);
/// assert_eq!(shape_count(100.0), 20);
/// ```
pub fn shape_count(density: f32) -> usize {
    let extra = (MAX_SHAPES - MIN_SHAPES) as f32;
    (MIN_SHAPES as f32 + density.clamp(0.0, 100.0) / 100.0 * extra).floor() as usize
}

/// Candidate positions sampled per shape at `dispersion`.
///
/// # Examples
///
/// ```
/// # use bauhaus::layout::candidate_count;
/// assert_eq!(candidate_count(0.0), 1);
/// assert_eq!(candidate_count(100.0), 61);
/// ```
pub fn candidate_count(dispersion: f32) -> usize {
    1 + (dispersion.clamp(0.0, 100.0) / 100.0 * MAX_EXTRA_CANDIDATES as f32).floor() as usize
}

/// The axis-aligned ellipse around the canvas center where no shape may sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    center: Point,
    radius_x: f32,
    radius_y: f32,
}

impl ExclusionZone {
    /// Zone for `center_exclusion` percent: semi-axes are that share of the
    /// half-width and half-height.
    pub fn for_canvas(canvas: Canvas, center_exclusion: f32) -> Self {
        let factor = center_exclusion.clamp(0.0, 100.0) / 100.0;
        Self {
            center: canvas.center(),
            radius_x: canvas.width() as f32 / 2.0 * factor,
            radius_y: canvas.height() as f32 / 2.0 * factor,
        }
    }

    pub fn radius_x(&self) -> f32 {
        self.radius_x
    }

    pub fn radius_y(&self) -> f32 {
        self.radius_y
    }

    /// Returns true if `point` lies strictly inside the ellipse.
    ///
    /// A degenerate ellipse (either semi-axis zero) excludes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus::layout::ExclusionZone;
    /// # use bauhaus_core::{canvas::Canvas, geometry::Point};
    /// let canvas = Canvas::new(200, 100).unwrap();
    /// let zone = ExclusionZone::for_canvas(canvas, 100.0);
    /// assert!(zone.excludes(Point::new(100.0, 50.0)));
    /// assert!(!zone.excludes(Point::new(0.0, 0.0)));
    /// assert!(!ExclusionZone::for_canvas(canvas, 0.0).excludes(Point::new(100.0, 50.0)));
    /// ```
    pub fn excludes(&self, point: Point) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let dx = (point.x() - self.center.x()) / self.radius_x;
        let dy = (point.y() - self.center.y()) / self.radius_y;
        dx * dx + dy * dy < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_count_endpoints() {
        assert_eq!(shape_count(0.0), MIN_SHAPES);
        assert_eq!(shape_count(100.0), MAX_SHAPES);
    }

    #[test]
    fn test_shape_count_clamps() {
        assert_eq!(shape_count(-20.0), MIN_SHAPES);
        assert_eq!(shape_count(250.0), MAX_SHAPES);
    }

    #[test]
    fn test_candidate_count_midpoint() {
        assert_eq!(candidate_count(50.0), 31);
    }

    #[test]
    fn test_zone_boundary_is_not_excluded() {
        let canvas = Canvas::new(200, 100).unwrap();
        let zone = ExclusionZone::for_canvas(canvas, 50.0);
        assert_eq!(zone.radius_x(), 50.0);
        assert_eq!(zone.radius_y(), 25.0);
        assert!(!zone.excludes(Point::new(150.0, 50.0)));
        assert!(zone.excludes(Point::new(149.0, 50.0)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// More density never asks for fewer shapes, and the count stays in range.
    fn check_shape_count_monotonic(a: f32, b: f32) -> Result<(), TestCaseError> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(shape_count(lo) <= shape_count(hi));
        prop_assert!((MIN_SHAPES..=MAX_SHAPES).contains(&shape_count(lo)));
        prop_assert!((MIN_SHAPES..=MAX_SHAPES).contains(&shape_count(hi)));
        Ok(())
    }

    /// With no exclusion nothing is ever rejected.
    fn check_zero_exclusion_rejects_nothing(
        width: u32,
        height: u32,
        x: f32,
        y: f32,
    ) -> Result<(), TestCaseError> {
        let canvas = Canvas::new(width, height).unwrap();
        let zone = ExclusionZone::for_canvas(canvas, 0.0);
        let point = Point::new(x * width as f32, y * height as f32);
        prop_assert!(!zone.excludes(point));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn shape_count_monotonic(a in 0.0f32..=100.0, b in 0.0f32..=100.0) {
            check_shape_count_monotonic(a, b)?;
        }

        #[test]
        fn zero_exclusion_rejects_nothing(
            width in 1u32..4000,
            height in 1u32..4000,
            x in 0.0f32..1.0,
            y in 0.0f32..1.0,
        ) {
            check_zero_exclusion_rejects_nothing(width, height, x, y)?;
        }
    }
}
