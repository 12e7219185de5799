//! PDF rendering with printpdf.
//!
//! Shapes become true vector paths built from the same local outlines as the
//! raster renderer. Canvas pixels map to PDF points through the page scale,
//! and y is flipped because PDF pages grow upwards. The whole document is
//! assembled in memory; nothing touches the disk until it is complete.
//!
//! Text is set in the built-in Helvetica and wrapped with its own advance
//! widths, so line breaks can differ from the PNG where the configured font
//! is narrower or wider. Text Helvetica cannot encode fails the export.

use log::info;
use printpdf::{
    BuiltinFont, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Polygon,
    Pt, Rgb,
    path::{PaintMode, WindingOrder},
};

use bauhaus_core::{
    branding::BrandingSpec,
    color::Color,
    geometry::Point,
    scene::Scene,
    shape::{Outline, Shape},
};

use super::{Error, ShapeRenderer, helvetica, text::layout_overlay_with};
use crate::branding::LogoRaster;

/// Message appended to every PDF failure.
const PNG_FALLBACK_HINT: &str = "export as PNG instead";

/// Resolution the logo is embedded at; one image pixel is one point.
const LOGO_DPI: f32 = 72.0;

/// A PDF page being assembled.
pub struct VectorRenderer {
    layer: PdfLayerReference,
    page_scale: f32,
    page_height: f32,
}

impl VectorRenderer {
    fn new(layer: PdfLayerReference, page_scale: f32, page_height: f32) -> Self {
        Self {
            layer,
            page_scale,
            page_height,
        }
    }

    /// Converts a y-down point in page points to a PDF point.
    fn to_page(&self, point: Point) -> printpdf::Point {
        printpdf::Point::new(
            Mm::from(Pt(point.x())),
            Mm::from(Pt(self.page_height - point.y())),
        )
    }

    fn set_fill(&self, color: Color) {
        let [r, g, b] = color.to_rgb_f32();
        self.layer
            .set_fill_color(printpdf::Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn fill_ring(&self, ring: Vec<(printpdf::Point, bool)>) {
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn fill_background(&self, scene: &Scene) {
        let size = scene.canvas().size().scale(self.page_scale);
        self.set_fill(scene.background());
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(size.width(), 0.0),
            Point::new(size.width(), size.height()),
            Point::new(0.0, size.height()),
        ];
        self.fill_ring(corners.iter().map(|p| (self.to_page(*p), false)).collect());
    }

    fn draw_logo(&self, scene: &Scene, branding: &BrandingSpec, logo: &LogoRaster) -> Result<(), Error> {
        let bounds = branding.logo_bounds(scene.canvas(), self.page_scale, logo.size());
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Ok(());
        }

        let rgba = printpdf::image_crate::RgbaImage::from_raw(
            logo.width(),
            logo.height(),
            logo.image().as_raw().clone(),
        )
        .ok_or_else(|| Error::Render(format!("logo buffer does not match its size; {PNG_FALLBACK_HINT}")))?;
        let image =
            printpdf::Image::from_dynamic_image(&printpdf::image_crate::DynamicImage::ImageRgba8(rgba));

        // PDF images are anchored at their bottom-left corner.
        let bottom_left = self.to_page(Point::new(bounds.min_x(), bounds.max_y()));
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm::from(bottom_left.x)),
                translate_y: Some(Mm::from(bottom_left.y)),
                scale_x: Some(bounds.width() / logo.width() as f32),
                scale_y: Some(bounds.height() / logo.height() as f32),
                dpi: Some(LOGO_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn draw_text(&self, scene: &Scene, branding: &BrandingSpec, font: &IndirectFontRef) {
        let Some(overlay) = branding.visible_text() else {
            return;
        };

        let canvas = scene.canvas();
        let font_pt = overlay.font_px(canvas, self.page_scale);
        self.set_fill(overlay.color.color());

        for line in layout_overlay_with(overlay, canvas, self.page_scale, helvetica::text_width) {
            if line.text.is_empty() {
                continue;
            }
            let width = helvetica::text_width(&line.text, font_pt);
            // Baseline sits about a third of the font size below the line middle.
            let baseline = Point::new(line.center.x() - width / 2.0, line.center.y() + font_pt * 0.35);
            let origin = self.to_page(baseline);
            self.layer.use_text(
                line.text.as_str(),
                font_pt,
                Mm::from(origin.x),
                Mm::from(origin.y),
                font,
            );
        }
    }
}

impl ShapeRenderer for VectorRenderer {
    fn draw_shape(&mut self, shape: &Shape) -> Result<(), Error> {
        let placement = shape.placement(self.page_scale);
        self.set_fill(shape.fill());

        match shape.outline() {
            Outline::Circle { radius } => {
                let center = self.to_page(placement.origin());
                let ring = printpdf::utils::calculate_points_for_circle(
                    Pt(radius * self.page_scale),
                    center.x,
                    center.y,
                );
                self.fill_ring(ring);
            }
            outline @ Outline::Polygon(_) => {
                let triangles = outline.triangles();
                if triangles.is_empty() {
                    return Err(Error::Render(format!(
                        "degenerate {} outline; {PNG_FALLBACK_HINT}",
                        shape.kind().name()
                    )));
                }
                for triangle in triangles {
                    self.fill_ring(
                        triangle
                            .iter()
                            .map(|p| (self.to_page(placement.apply(*p)), false))
                            .collect(),
                    );
                }
            }
        }
        Ok(())
    }
}

/// Renders a scene with its branding to PDF bytes.
///
/// # Errors
///
/// Any failure while assembling the document aborts the export with
/// [`Error::Render`]; no partial document is returned.
pub fn render(
    scene: &Scene,
    branding: &BrandingSpec,
    logo: Option<&LogoRaster>,
    page_scale: f32,
) -> Result<Vec<u8>, Error> {
    if let Some(c) = branding
        .visible_text()
        .and_then(|text| helvetica::first_unencodable(&text.content))
    {
        return Err(Error::Render(format!(
            "text contains `{c}`, which the built-in PDF font cannot encode; {PNG_FALLBACK_HINT}"
        )));
    }

    let page = scene.canvas().size().scale(page_scale);
    let (doc, page_index, layer_index) = PdfDocument::new(
        "Bauhaus background",
        Mm::from(Pt(page.width())),
        Mm::from(Pt(page.height())),
        "Layer 1",
    );
    let layer = doc.get_page(page_index).get_layer(layer_index);
    let mut renderer = VectorRenderer::new(layer, page_scale, page.height());

    renderer.fill_background(scene);
    renderer.draw_shapes(scene)?;
    if let Some(logo) = logo {
        renderer.draw_logo(scene, branding, logo)?;
    }
    if branding.visible_text().is_some() {
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| Error::Render(format!("cannot load Helvetica: {err}; {PNG_FALLBACK_HINT}")))?;
        renderer.draw_text(scene, branding, &font);
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|err| Error::Render(format!("PDF assembly failed: {err}; {PNG_FALLBACK_HINT}")))?;
    info!(
        width_pt = page.width(),
        height_pt = page.height(),
        bytes = bytes.len();
        "PDF rendered"
    );
    Ok(bytes)
}
