//! Raster rendering with tiny-skia.
//!
//! Used for the live preview and for PNG exports. All geometry is drawn at
//! `resolution_scale` times the canvas size so a high-resolution export is a
//! sharper copy of the preview, not a different picture.

use log::{debug, info};
use tiny_skia::{
    ColorU8, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform,
};

use bauhaus_core::{
    branding::BrandingSpec,
    color::Color,
    scene::Scene,
    shape::{Outline, Shape},
};

use super::{Error, ShapeRenderer, text::TextManager};
use crate::{branding::LogoRaster, export::text::layout_overlay};

/// A pixel surface being painted.
pub struct RasterRenderer {
    pixmap: Pixmap,
    scale: f32,
}

impl RasterRenderer {
    /// Creates a `round(w·scale) × round(h·scale)` surface filled with the
    /// scene background.
    pub fn new(scene: &Scene, scale: f32) -> Result<Self, Error> {
        let (width, height) = scene.canvas().scaled(scale);
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Render(format!("cannot allocate a {width}x{height} surface"))
        })?;
        let [r, g, b, a] = scene.background().to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(Self { pixmap, scale })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Composites `logo` at the position and width given by `branding`.
    pub fn draw_logo(
        &mut self,
        scene: &Scene,
        branding: &BrandingSpec,
        logo: &LogoRaster,
    ) -> Result<(), Error> {
        let bounds = branding.logo_bounds(scene.canvas(), self.scale, logo.size());
        let width = bounds.width().round() as u32;
        let height = bounds.height().round() as u32;
        if width == 0 || height == 0 {
            debug!("Logo collapses to zero pixels, skipping");
            return Ok(());
        }

        let resized = logo.resized(width, height);
        let mut overlay = Pixmap::new(width, height)
            .ok_or_else(|| Error::Render(format!("cannot allocate a {width}x{height} logo")))?;
        for (src, dst) in resized.pixels().zip(overlay.pixels_mut()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        self.pixmap.draw_pixmap(
            bounds.min_x().round() as i32,
            bounds.min_y().round() as i32,
            overlay.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Draws the visible text overlay of `branding`, if any.
    pub fn draw_text(&mut self, scene: &Scene, branding: &BrandingSpec, font_family: &str) {
        let Some(overlay) = branding.visible_text() else {
            return;
        };

        let canvas = scene.canvas();
        let font_px = overlay.font_px(canvas, self.scale);
        let line_height = overlay.line_height(canvas, self.scale);
        let color = overlay.color.color().to_rgba8();
        let manager = TextManager::global();

        for line in layout_overlay(overlay, canvas, self.scale, font_family) {
            let width = manager.measure(&line.text, font_family, font_px);
            let left = line.center.x() - width / 2.0;
            let top = line.center.y() - line_height / 2.0;

            let pixmap = &mut self.pixmap;
            manager.draw_line(
                &line.text,
                font_family,
                font_px,
                line_height,
                color,
                |x, y, w, h, [r, g, b, a]| {
                    let Some(rect) =
                        Rect::from_xywh(left + x as f32, top + y as f32, w as f32, h as f32)
                    else {
                        return;
                    };
                    let mut paint = Paint::default();
                    paint.set_color_rgba8(r, g, b, a);
                    paint.anti_alias = false;
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                },
            );
        }
    }

    /// Encodes the surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        self.pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("PNG encoding failed: {err}")))
    }

    /// Returns the straight-alpha RGBA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }
}

impl ShapeRenderer for RasterRenderer {
    fn draw_shape(&mut self, shape: &Shape) -> Result<(), Error> {
        let placement = shape.placement(self.scale);
        let origin = placement.origin();
        let transform = Transform::from_translate(origin.x(), origin.y())
            .pre_rotate(placement.rotation().to_degrees())
            .pre_scale(self.scale, self.scale);

        let path = match shape.outline() {
            Outline::Circle { radius } => PathBuilder::from_circle(0.0, 0.0, radius),
            Outline::Polygon(points) => {
                let mut builder = PathBuilder::new();
                for (i, point) in points.iter().enumerate() {
                    if i == 0 {
                        builder.move_to(point.x(), point.y());
                    } else {
                        builder.line_to(point.x(), point.y());
                    }
                }
                builder.close();
                builder.finish()
            }
        }
        .ok_or_else(|| Error::Render(format!("degenerate {} outline", shape.kind().name())))?;

        self.pixmap
            .fill_path(&path, &fill_paint(shape.fill()), FillRule::Winding, transform, None);
        Ok(())
    }
}

fn fill_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Renders a scene with its branding at `scale`.
///
/// `logo` is the already-resolved logo variant; pass `None` to skip it.
pub fn render(
    scene: &Scene,
    branding: &BrandingSpec,
    logo: Option<&LogoRaster>,
    scale: f32,
    font_family: &str,
) -> Result<RasterRenderer, Error> {
    let mut renderer = RasterRenderer::new(scene, scale)?;
    renderer.draw_shapes(scene)?;
    if let Some(logo) = logo {
        renderer.draw_logo(scene, branding, logo)?;
    }
    renderer.draw_text(scene, branding, font_family);
    info!(
        width = renderer.width(),
        height = renderer.height(),
        shapes = scene.shapes().len();
        "Raster rendered"
    );
    Ok(renderer)
}
