//! Integration tests for the SceneBuilder API
//!
//! These tests verify that the public API works end to end: generation,
//! PNG and PDF export, branding and the preview renderer.

use std::{fs, io::Cursor};

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::tempdir;

use bauhaus::{
    BauhausError, SceneBuilder,
    branding::{BrandingSpec, LogoChoice, TextOverlay},
    canvas::{AspectRatio, Canvas},
    config::{AppConfig, BrandingConfig, ExportConfig, LayoutConfig, StyleConfig},
    layout::ExclusionZone,
};

fn landscape() -> Canvas {
    AspectRatio::Landscape.canvas().expect("preset canvas is valid")
}

/// Builds a config whose logo source is a solid black PNG in `dir`.
fn config_with_logo(dir: &std::path::Path) -> AppConfig {
    let mut logo = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0]));
    for y in 5..15 {
        for x in 10..30 {
            logo.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    let mut bytes = Vec::new();
    logo.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode logo");
    let path = dir.join("logo.png");
    fs::write(&path, bytes).expect("write logo");

    let mut config = AppConfig::default();
    config
        .branding_mut()
        .set_logo_source(Some(path.to_string_lossy().to_string()));
    config
}

#[test]
fn test_builder_api_exists() {
    let _builder = SceneBuilder::default();
}

#[test]
fn test_generate_reference_scenario() {
    let mut config = AppConfig::default();
    config.style_mut().set_background_color("#F1F3D5");
    let builder = SceneBuilder::new(config);
    let background = bauhaus::color::Color::new("#F1F3D5").unwrap();
    let zone = ExclusionZone::for_canvas(landscape(), 50.0);

    for _ in 0..10 {
        let scene = builder.generate(landscape()).expect("Failed to generate");
        assert!((2..=11).contains(&scene.shapes().len()));
        for shape in scene.shapes() {
            assert_ne!(shape.fill(), background);
            assert!(!zone.excludes(shape.center()));
        }
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let builder = SceneBuilder::default();
    let a = builder.generate_seeded(landscape(), 1234).unwrap();
    let b = builder.generate_seeded(landscape(), 1234).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_configured_seed_is_used() {
    let mut config = AppConfig::default();
    config.layout_mut().set_seed(Some(77));
    let builder = SceneBuilder::new(config);
    let a = builder.generate(landscape()).unwrap();
    let b = builder.generate_seeded(landscape(), 77).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_render_png_and_high_res() {
    let builder = SceneBuilder::default();
    let canvas = Canvas::new(320, 180).unwrap();
    let scene = builder.generate_seeded(canvas, 5).unwrap();

    let png = builder
        .render_png(&scene, &BrandingSpec::default(), 1.0)
        .expect("Failed to render PNG");
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 180));

    let high_res = builder
        .render_high_res_png(&scene, &BrandingSpec::default())
        .expect("Failed to render high-res PNG");
    let decoded = image::load_from_memory(&high_res).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 360));
}

#[test]
fn test_render_pdf() {
    let builder = SceneBuilder::default();
    let scene = builder.generate_seeded(landscape(), 9).unwrap();
    let branding = BrandingSpec {
        text: Some(TextOverlay::new("Hello\nBauhaus")),
        ..BrandingSpec::default()
    };
    let pdf = builder
        .render_pdf(&scene, &branding)
        .expect("Failed to render PDF");
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_with_missing_logo_fails() {
    let builder = SceneBuilder::default();
    let scene = builder.generate_seeded(landscape(), 1).unwrap();
    let branding = BrandingSpec {
        logo: LogoChoice::Black,
        ..BrandingSpec::default()
    };

    let png = builder.render_png(&scene, &branding, 1.0);
    assert!(matches!(png, Err(BauhausError::Asset(_))));
    let pdf = builder.render_pdf(&scene, &branding);
    assert!(matches!(pdf, Err(BauhausError::Asset(_))));
}

#[test]
fn test_preview_with_missing_logo_still_renders() {
    let builder = SceneBuilder::default();
    let scene = builder.generate_seeded(Canvas::new(100, 100).unwrap(), 3).unwrap();
    let branding = BrandingSpec {
        logo: LogoChoice::White,
        ..BrandingSpec::default()
    };
    let preview = builder.preview_renderer(1.0);
    assert!(preview.request(scene, branding).wait());
    assert!(preview.latest().is_some());
}

#[test]
fn test_branded_exports() {
    let dir = tempdir().expect("Failed to create temp directory");
    let builder = SceneBuilder::new(config_with_logo(dir.path()));
    let scene = builder.generate_seeded(Canvas::new(400, 400).unwrap(), 21).unwrap();

    for logo in [LogoChoice::Black, LogoChoice::White] {
        let branding = BrandingSpec {
            logo,
            text: Some(TextOverlay::new("Bauhaus")),
            ..BrandingSpec::default()
        };
        let png = builder.render_png(&scene, &branding, 1.0);
        assert!(png.is_ok(), "PNG with {logo:?} logo: {:?}", png.err());
        let pdf = builder.render_pdf(&scene, &branding);
        assert!(pdf.is_ok(), "PDF with {logo:?} logo: {:?}", pdf.err());
    }
}

#[test]
fn test_logo_variants_are_inverses() {
    let dir = tempdir().expect("Failed to create temp directory");
    let builder = SceneBuilder::new(config_with_logo(dir.path()));

    let black = builder.logos().resolve(bauhaus::branding::Tone::Black).unwrap();
    let white = builder.logos().resolve(bauhaus::branding::Tone::White).unwrap();
    assert_eq!((black.width(), black.height()), (20, 10));
    for (b, w) in black.image().pixels().zip(white.image().pixels()) {
        assert_eq!([255 - b[0], 255 - b[1], 255 - b[2], b[3]], w.0);
    }
}

#[test]
fn test_invalid_scale_is_rejected() {
    let builder = SceneBuilder::default();
    let scene = builder.generate_seeded(Canvas::new(10, 10).unwrap(), 0).unwrap();
    let result = builder.render_png(&scene, &BrandingSpec::default(), 0.0);
    assert!(matches!(result, Err(BauhausError::Export(_))));
}

#[test]
fn test_invalid_pdf_page_scale_is_rejected() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default(),
        ExportConfig::new(0.0, 2.0),
        BrandingConfig::default(),
    );
    let builder = SceneBuilder::new(config);
    let scene = builder.generate_seeded(Canvas::new(10, 10).unwrap(), 0).unwrap();
    let result = builder.render_pdf(&scene, &BrandingSpec::default());
    assert!(matches!(result, Err(BauhausError::Export(_))));
}

#[test]
fn test_generated_scenes_are_remembered() {
    let builder = SceneBuilder::default();
    assert!(builder.history().is_empty());

    let first = builder.generate_seeded(landscape(), 1).unwrap();
    let second = builder.generate_seeded(landscape(), 2).unwrap();

    let history = builder.history();
    assert_eq!(history.len(), 2);
    let latest = history.latest().unwrap();
    assert_eq!(latest.scene(), &second);
    assert_eq!(builder.recall(latest.id()), Some(second));

    let oldest = history.iter().last().unwrap();
    assert_eq!(oldest.scene(), &first);
}

#[test]
fn test_history_is_bounded() {
    let builder = SceneBuilder::default();
    let canvas = Canvas::new(50, 50).unwrap();
    for seed in 0..15 {
        builder.generate_seeded(canvas, seed).unwrap();
    }
    let history = builder.history();
    assert_eq!(history.len(), bauhaus::scene::HISTORY_CAPACITY);
    assert!(builder.recall(1).is_none());
    assert!(builder.recall(15).is_some());
}
