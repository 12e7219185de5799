//! The shape model.
//!
//! A [`Shape`] is a flat, immutable description of one filled primitive. Its
//! geometry lives in a local frame centred on the origin (see
//! [`ShapeKind::outline`]); renderers place that frame on their target with a
//! [`Placement`] so every backend draws exactly the same silhouette.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    geometry::{Bounds, Placement, Point},
};

/// Fraction of the bottom width a trapezoid's top edge uses when unset.
pub const DEFAULT_TRAPEZOID_TOP_RATIO: f32 = 0.5;

/// Kind-specific extents of a shape.
///
/// # Examples
///
/// ```
/// # use bauhaus_core::shape::ShapeKind;
/// let square = ShapeKind::Rectangle { width: 40.0, height: 10.0, force_square: true };
/// assert_eq!(square.extent(), (40.0, 40.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// An axis-aligned box. When `force_square` is set the stored height is
    /// ignored and the box is `width × width`.
    Rectangle {
        width: f32,
        height: f32,
        force_square: bool,
    },
    Circle {
        diameter: f32,
    },
    /// Isosceles triangle, apex up. Its drawn height is `height·√3/2`.
    Triangle {
        width: f32,
        height: f32,
    },
    /// `width` is the bottom edge. The top edge defaults to half of it.
    Trapezoid {
        width: f32,
        height: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top_width: Option<f32>,
    },
    Rhombus {
        width: f32,
        height: f32,
    },
}

impl ShapeKind {
    /// Returns a short lowercase name for the kind, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Circle { .. } => "circle",
            Self::Triangle { .. } => "triangle",
            Self::Trapezoid { .. } => "trapezoid",
            Self::Rhombus { .. } => "rhombus",
        }
    }

    /// Returns the drawn `(width, height)` of the unrotated outline.
    pub fn extent(&self) -> (f32, f32) {
        match *self {
            Self::Rectangle {
                width,
                height,
                force_square,
            } => (width, if force_square { width } else { height }),
            Self::Circle { diameter } => (diameter, diameter),
            Self::Triangle { width, height } => (width, triangle_height(height)),
            Self::Trapezoid { width, height, .. } | Self::Rhombus { width, height } => {
                (width, height)
            }
        }
    }

    /// Builds the outline in the local frame, centred on the origin.
    ///
    /// Polygons are listed clockwise on screen starting at the top.
    pub fn outline(&self) -> Outline {
        match *self {
            Self::Circle { diameter } => Outline::Circle {
                radius: diameter / 2.0,
            },
            Self::Rectangle { .. } => {
                let (w, h) = self.extent();
                let (hw, hh) = (w / 2.0, h / 2.0);
                Outline::Polygon(vec![
                    Point::new(-hw, -hh),
                    Point::new(hw, -hh),
                    Point::new(hw, hh),
                    Point::new(-hw, hh),
                ])
            }
            Self::Triangle { width, height } => {
                let (hw, hh) = (width / 2.0, triangle_height(height) / 2.0);
                Outline::Polygon(vec![
                    Point::new(0.0, -hh),
                    Point::new(hw, hh),
                    Point::new(-hw, hh),
                ])
            }
            Self::Trapezoid {
                width,
                height,
                top_width,
            } => {
                let top = top_width.unwrap_or(width * DEFAULT_TRAPEZOID_TOP_RATIO);
                let (ht, hb, hh) = (top / 2.0, width / 2.0, height / 2.0);
                Outline::Polygon(vec![
                    Point::new(-ht, -hh),
                    Point::new(ht, -hh),
                    Point::new(hb, hh),
                    Point::new(-hb, hh),
                ])
            }
            Self::Rhombus { width, height } => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                Outline::Polygon(vec![
                    Point::new(0.0, -hh),
                    Point::new(hw, 0.0),
                    Point::new(0.0, hh),
                    Point::new(-hw, 0.0),
                ])
            }
        }
    }
}

fn triangle_height(height: f32) -> f32 {
    height * 3f32.sqrt() / 2.0
}

/// Local-frame geometry of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Polygon(Vec<Point>),
    Circle { radius: f32 },
}

impl Outline {
    /// Splits a convex polygon into a triangle fan anchored at its first vertex.
    ///
    /// Quadrilaterals yield two triangles and triangles yield themselves.
    /// Circles have no triangulation and yield nothing.
    pub fn triangles(&self) -> Vec<[Point; 3]> {
        match self {
            Self::Polygon(points) if points.len() >= 3 => points[1..]
                .windows(2)
                .map(|pair| [points[0], pair[0], pair[1]])
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// One filled primitive in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    center: Point,
    rotation: f32,
    fill: Color,
}

impl Shape {
    /// Creates a shape, normalizing `rotation` into `[0, 2π)`.
    pub fn new(kind: ShapeKind, center: Point, rotation: f32, fill: Color) -> Self {
        let mut rotation = rotation.rem_euclid(TAU);
        if rotation >= TAU {
            rotation = 0.0;
        }
        Self {
            kind,
            center,
            rotation,
            fill,
        }
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Rotation in radians, clockwise on screen.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn outline(&self) -> Outline {
        self.kind.outline()
    }

    /// Returns the placement of this shape on a target at `scale`.
    pub fn placement(&self, scale: f32) -> Placement {
        Placement::new(self.center, self.rotation, scale)
    }

    /// Returns the axis-aligned bounding box of the placed silhouette at `scale`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::{color::Color, geometry::Point, shape::{Shape, ShapeKind}};
    /// let circle = Shape::new(
    ///     ShapeKind::Circle { diameter: 10.0 },
    ///     Point::new(50.0, 50.0),
    ///     0.0,
    ///     Color::black(),
    /// );
    /// let bounds = circle.bounds(2.0);
    /// assert_eq!(bounds.min_x(), 90.0);
    /// assert_eq!(bounds.width(), 20.0);
    /// ```
    pub fn bounds(&self, scale: f32) -> Bounds {
        let placement = self.placement(scale);
        match self.outline() {
            Outline::Circle { radius } => {
                let r = radius * scale;
                Bounds::from_points([
                    placement.origin().add_point(Point::new(-r, -r)),
                    placement.origin().add_point(Point::new(r, r)),
                ])
                .unwrap_or_default()
            }
            Outline::Polygon(points) => {
                Bounds::from_points(points.into_iter().map(|p| placement.apply(p)))
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn polygon(kind: ShapeKind) -> Vec<Point> {
        match kind.outline() {
            Outline::Polygon(points) => points,
            Outline::Circle { .. } => panic!("expected polygon"),
        }
    }

    #[test]
    fn test_rectangle_force_square_ignores_height() {
        let points = polygon(ShapeKind::Rectangle {
            width: 20.0,
            height: 6.0,
            force_square: true,
        });
        assert_eq!(points[0], Point::new(-10.0, -10.0));
        assert_eq!(points[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_rectangle_uses_height() {
        let kind = ShapeKind::Rectangle {
            width: 20.0,
            height: 6.0,
            force_square: false,
        };
        assert_eq!(kind.extent(), (20.0, 6.0));
    }

    #[test]
    fn test_triangle_apex_up_and_centered() {
        let points = polygon(ShapeKind::Triangle {
            width: 10.0,
            height: 10.0,
        });
        let h = 10.0 * 3f32.sqrt() / 2.0;
        assert_eq!(points.len(), 3);
        assert_approx_eq!(f32, points[0].y(), -h / 2.0);
        assert_eq!(points[0].x(), 0.0);
        assert_approx_eq!(f32, points[1].y(), h / 2.0);
        assert_eq!(points[1].x(), 5.0);
        assert_eq!(points[2].x(), -5.0);
    }

    #[test]
    fn test_trapezoid_default_top_width() {
        let points = polygon(ShapeKind::Trapezoid {
            width: 40.0,
            height: 20.0,
            top_width: None,
        });
        assert_eq!(points[1].x() - points[0].x(), 20.0);
        assert_eq!(points[2].x() - points[3].x(), 40.0);
    }

    #[test]
    fn test_trapezoid_explicit_top_width() {
        let points = polygon(ShapeKind::Trapezoid {
            width: 40.0,
            height: 20.0,
            top_width: Some(30.0),
        });
        assert_eq!(points[1].x() - points[0].x(), 30.0);
    }

    #[test]
    fn test_rhombus_extents() {
        let kind = ShapeKind::Rhombus {
            width: 30.0,
            height: 12.0,
        };
        let bounds = Bounds::from_points(polygon(kind)).unwrap();
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 12.0);
    }

    #[test]
    fn test_triangulation_counts() {
        let quad = ShapeKind::Rhombus {
            width: 1.0,
            height: 1.0,
        };
        let tri = ShapeKind::Triangle {
            width: 1.0,
            height: 1.0,
        };
        let circle = ShapeKind::Circle { diameter: 1.0 };
        assert_eq!(quad.outline().triangles().len(), 2);
        assert_eq!(tri.outline().triangles().len(), 1);
        assert!(circle.outline().triangles().is_empty());
    }

    #[test]
    fn test_rotation_is_normalized() {
        let shape = Shape::new(
            ShapeKind::Circle { diameter: 1.0 },
            Point::default(),
            -std::f32::consts::FRAC_PI_2,
            Color::black(),
        );
        assert_approx_eq!(f32, shape.rotation(), 3.0 * std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_shape_serde_tagged() {
        let shape = Shape::new(
            ShapeKind::Trapezoid {
                width: 4.0,
                height: 4.0,
                top_width: None,
            },
            Point::new(1.0, 2.0),
            0.0,
            Color::white(),
        );
        let json = serde_json::to_value(shape).unwrap();
        assert_eq!(json["kind"]["type"], "trapezoid");
        assert!(json["kind"].get("top_width").is_none());
        assert_eq!(json["fill"], "#ffffff");
    }
}
