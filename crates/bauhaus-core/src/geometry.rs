//! Geometric primitives for scene layout and rendering.
//!
//! This module provides the geometric types shared by the layout engine and
//! the renderers.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned bounding box
//! - [`Placement`] - Rotate-scale-translate transform from a shape's local frame
//!
//! # Coordinate System
//!
//! Canvas space uses the screen convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Positive rotation angles therefore turn clockwise on screen. The vector
//! renderer flips into PDF's y-up page space only at the very end.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use bauhaus_core::geometry::Point;
/// let p1 = Point::new(3.0, 0.0);
/// let p2 = Point::new(0.0, 4.0);
///
/// assert_eq!(p1.distance(p2), 5.0);
/// assert_eq!(p1.add_point(p2), Point::new(3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let doubled = point.scale(2.0);
    /// assert_eq!(doubled.x(), 20.0);
    /// assert_eq!(doubled.y(), 40.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rotates the point about the origin by `angle` radians.
    ///
    /// In the y-down canvas frame a positive angle turns clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::geometry::Point;
    /// # use std::f32::consts::FRAC_PI_2;
    /// // A quarter turn moves +X onto +Y, i.e. from "right" to "down" on screen.
    /// let rotated = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
    /// assert!((rotated.x() - 0.0).abs() < 1e-6);
    /// assert!((rotated.y() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimension by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns the smaller of the two dimensions
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            Some(match acc {
                None => Bounds {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Scales the bounds about the origin.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            min_x: self.min_x * factor,
            min_y: self.min_y * factor,
            max_x: self.max_x * factor,
            max_y: self.max_y * factor,
        }
    }
}

/// The transform that carries a shape's local frame into a render target.
///
/// Local geometry is centred on the origin. A placement rotates it by
/// `rotation`, scales it by `scale` and finally translates it to
/// `center * scale`. Both renderers use the same placement so the raster and
/// vector outputs stay geometrically identical.
///
/// # Examples
///
/// ```
/// # use bauhaus_core::geometry::{Placement, Point};
/// let placement = Placement::new(Point::new(100.0, 50.0), 0.0, 2.0);
/// let corner = placement.apply(Point::new(-5.0, -5.0));
/// assert_eq!(corner, Point::new(190.0, 90.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    center: Point,
    rotation: f32,
    scale: f32,
}

impl Placement {
    pub fn new(center: Point, rotation: f32, scale: f32) -> Self {
        Self {
            center,
            rotation,
            scale,
        }
    }

    /// Returns the translated (already scaled) center.
    pub fn origin(self) -> Point {
        self.center.scale(self.scale)
    }

    pub fn rotation(self) -> f32 {
        self.rotation
    }

    /// Maps a local-frame point into target space.
    pub fn apply(self, local: Point) -> Point {
        local.rotate(self.rotation).scale(self.scale).add_point(self.origin())
    }
}
