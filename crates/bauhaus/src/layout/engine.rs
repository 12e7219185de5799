//! Best-candidate shape placement.
//!
//! Each shape samples a handful of uniformly random positions, throws away
//! those inside the exclusion zone and keeps the one farthest from every
//! shape already placed. More candidates means a more even spread.

use std::f32::consts::TAU;

use log::{debug, info};
use rand::Rng;

use bauhaus_core::{
    canvas::Canvas,
    color::{Color, Palette},
    geometry::Point,
    scene::Scene,
    shape::{Shape, ShapeKind},
};

use super::{ExclusionZone, LayoutParams, candidate_count, shape_count};
use crate::BauhausError;

/// Share of the shorter canvas side used as the nominal shape side.
const BASE_SIDE_RATIO: f32 = 0.25;
/// Smallest side any shape may have, in pixels.
const MIN_SIDE: f32 = 1.0;
const SHAPE_KIND_COUNT: u32 = 5;

/// Places shapes on one canvas with one set of parameters.
#[derive(Debug, Clone)]
pub struct Engine {
    canvas: Canvas,
    background: Color,
    colors: Vec<Color>,
    params: LayoutParams,
}

impl Engine {
    /// Creates an engine that paints from `palette` minus `background`.
    ///
    /// # Errors
    ///
    /// Returns [`BauhausError::Layout`] if every palette color equals the
    /// background, since no shape could then be told apart from it.
    pub fn new(
        canvas: Canvas,
        background: Color,
        palette: &Palette,
        params: LayoutParams,
    ) -> Result<Self, BauhausError> {
        let colors = palette.excluding(background);
        if colors.is_empty() {
            return Err(BauhausError::Layout(format!(
                "palette has no color other than the background {background}"
            )));
        }
        Ok(Self {
            canvas,
            background,
            colors,
            params,
        })
    }

    /// Generates a full scene with as many shapes as the density asks for.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Scene {
        let requested = shape_count(self.params.density);
        let shapes = self.place_shapes(requested, rng);
        info!(
            canvas:% = self.canvas,
            requested = requested,
            placed = shapes.len();
            "Scene generated"
        );
        Scene::new(self.canvas, self.background, shapes, requested)
    }

    /// Places up to `count` shapes.
    ///
    /// A shape whose every candidate falls in the exclusion zone is dropped,
    /// so the result can be shorter than `count`.
    pub fn place_shapes<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Shape> {
        let zone = ExclusionZone::for_canvas(self.canvas, self.params.center_exclusion);
        let candidates_per_shape = candidate_count(self.params.dispersion);
        let (width, height) = (self.canvas.width() as f32, self.canvas.height() as f32);

        let mut shapes: Vec<Shape> = Vec::with_capacity(count);
        for index in 0..count {
            let candidates: Vec<Point> = (0..candidates_per_shape)
                .map(|_| Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height)))
                .filter(|point| !zone.excludes(*point))
                .collect();

            let Some(center) = farthest_candidate(&candidates, &shapes) else {
                debug!(
                    index = index,
                    candidates = candidates_per_shape;
                    "Dropping shape: no candidate outside exclusion zone"
                );
                continue;
            };

            shapes.push(self.build_shape(center, rng));
        }
        shapes
    }

    fn build_shape<R: Rng + ?Sized>(&self, center: Point, rng: &mut R) -> Shape {
        let base = self.canvas.size().min_side() * BASE_SIDE_RATIO;
        let factor = (self.params.shape_size / 50.0) * (0.6 + rng.random::<f32>() * 0.9);
        let side = (base * factor).max(MIN_SIDE);
        let rotation = rng.random::<f32>() * TAU;

        let kind = match rng.random_range(0..SHAPE_KIND_COUNT) {
            0 => ShapeKind::Rectangle {
                width: side,
                height: side,
                force_square: rng.random_bool(0.5),
            },
            1 => ShapeKind::Circle { diameter: side },
            2 => ShapeKind::Triangle {
                width: side,
                height: side,
            },
            3 => ShapeKind::Trapezoid {
                width: side,
                height: side,
                top_width: Some(side * (0.4 + rng.random::<f32>() * 0.4)),
            },
            _ => ShapeKind::Rhombus {
                width: side,
                height: side,
            },
        };

        let fill = self.colors[rng.random_range(0..self.colors.len())];
        Shape::new(kind, center, rotation, fill)
    }
}

/// The first shape takes the first surviving candidate. Later shapes take
/// the candidate with the largest minimum distance to the placed centers,
/// the earliest one on ties.
fn farthest_candidate(candidates: &[Point], placed: &[Shape]) -> Option<Point> {
    if placed.is_empty() {
        return candidates.first().copied();
    }

    let mut best: Option<(Point, f32)> = None;
    for &candidate in candidates {
        let clearance = placed
            .iter()
            .map(|shape| shape.center().distance(candidate))
            .fold(f32::INFINITY, f32::min);
        if best.is_none_or(|(_, best_clearance)| clearance > best_clearance) {
            best = Some((candidate, clearance));
        }
    }
    best.map(|(point, _)| point)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn params_strategy() -> impl Strategy<Value = LayoutParams> {
        (0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0).prop_map(
            |(density, dispersion, center_exclusion, shape_size)| LayoutParams {
                density,
                dispersion,
                center_exclusion,
                shape_size,
            },
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every generated scene honors the shape invariants.
    fn check_scene_invariants(
        width: u32,
        height: u32,
        params: LayoutParams,
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let canvas = Canvas::new(width, height).unwrap();
        let background = Color::new("#F9F7DD").unwrap();
        let engine = Engine::new(canvas, background, &Palette::default(), params).unwrap();
        let zone = ExclusionZone::for_canvas(canvas, params.center_exclusion);
        let scene = engine.generate(&mut StdRng::seed_from_u64(seed));

        prop_assert!(scene.shapes().len() <= shape_count(params.density));
        for shape in scene.shapes() {
            let center = shape.center();
            prop_assert!(!zone.excludes(center));
            prop_assert!(center.x() >= 0.0 && center.x() < width as f32);
            prop_assert!(center.y() >= 0.0 && center.y() < height as f32);
            prop_assert!(shape.rotation() >= 0.0 && shape.rotation() < TAU);
            prop_assert_ne!(shape.fill(), background);
            let (w, h) = shape.kind().extent();
            prop_assert!(w >= 1.0 && h > 0.0);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn scene_invariants(
            width in 1u32..3000,
            height in 1u32..3000,
            params in params_strategy(),
            seed in any::<u64>(),
        ) {
            check_scene_invariants(width, height, params, seed)?;
        }
    }
}
