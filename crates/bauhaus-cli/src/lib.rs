//! Bauhaus CLI library
//!
//! This module contains the core CLI logic for the Bauhaus background generator.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, LogoArg, OutputFormat, ToneArg};
pub use error_adapter::ErrorAdapter;

use std::{
    fs, io,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{info, warn};

use bauhaus::{
    BauhausError, SceneBuilder,
    branding::{BrandingSpec, TextOverlay},
    canvas::{AspectRatio, Canvas},
    config::AppConfig,
    export::{ExportKind, export_file_name},
    layout::LayoutParams,
};

/// Run the Bauhaus CLI application
///
/// Generates one scene from the configuration and the command-line
/// overrides, renders it in the requested format and writes it to disk.
/// Nothing is written unless rendering succeeds.
///
/// # Errors
///
/// Returns `BauhausError` for:
/// - Configuration loading errors
/// - Invalid canvas dimensions
/// - Unusable colors
/// - Logo loading errors when a logo is requested
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<(), BauhausError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let canvas = resolve_canvas(args)?;
    info!(
        canvas:% = canvas,
        aspect:% = AspectRatio::closest(canvas.width(), canvas.height());
        "Processing background"
    );

    let builder = SceneBuilder::new(app_config);
    let scene = builder.generate(canvas)?;
    if scene.dropped_count() > 0 {
        warn!(
            requested = scene.requested_count(),
            placed = scene.shapes().len();
            "Some shapes found no free position"
        );
    }

    if let Some(path) = &args.dump_scene {
        let json = serde_json::to_string_pretty(&scene).map_err(io::Error::from)?;
        fs::write(path, json)?;
        info!(path = path; "Scene written");
    }

    let branding = branding_spec(args);
    let (kind, bytes) = match args.format {
        OutputFormat::Png if args.high_res => {
            let scale = builder.config().export().high_res_scale();
            let bytes = builder.render_high_res_png(&scene, &branding)?;
            (ExportKind::HighResPng { scale }, bytes)
        }
        OutputFormat::Png => (ExportKind::Png, builder.render_png(&scene, &branding, 1.0)?),
        OutputFormat::Pdf => {
            if args.high_res {
                warn!("--high-res only applies to PNG output, ignoring");
            }
            (ExportKind::Pdf, builder.render_pdf(&scene, &branding)?)
        }
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => export_file_name(kind, canvas, now_millis()),
    };
    fs::write(&output, bytes)?;

    info!(output_file = output; "Background exported successfully");

    Ok(())
}

/// Folds the command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let current = config.layout().params();
    let params = LayoutParams {
        density: percent("density", args.density.unwrap_or(current.density)),
        dispersion: percent("dispersion", args.dispersion.unwrap_or(current.dispersion)),
        center_exclusion: percent(
            "center_exclusion",
            args.center_exclusion.unwrap_or(current.center_exclusion),
        ),
        shape_size: percent("shape_size", args.shape_size.unwrap_or(current.shape_size)),
    };
    config.layout_mut().set_params(params);

    if args.seed.is_some() {
        config.layout_mut().set_seed(args.seed);
    }
    if let Some(background) = &args.background {
        config.style_mut().set_background_color(background.as_str());
    }
    if args.logo_source.is_some() {
        config.branding_mut().set_logo_source(args.logo_source.clone());
    }
}

/// Preset dimensions, with `--width` and `--height` replacing either side.
fn resolve_canvas(args: &Args) -> Result<Canvas, BauhausError> {
    let canvas = match (args.width, args.height) {
        (None, None) => args.aspect.canvas()?,
        (width, height) => {
            let (preset_width, preset_height) = args.aspect.dimensions();
            Canvas::new(
                width.unwrap_or(preset_width),
                height.unwrap_or(preset_height),
            )?
        }
    };
    Ok(canvas)
}

fn branding_spec(args: &Args) -> BrandingSpec {
    let defaults = BrandingSpec::default();
    let text = args.text.as_ref().map(|content| {
        let overlay = TextOverlay::default();
        TextOverlay {
            content: content.replace("\\n", "\n"),
            x: percent("text_x", args.text_x.unwrap_or(overlay.x)),
            y: percent("text_y", args.text_y.unwrap_or(overlay.y)),
            font_size: percent("font_size", args.font_size.unwrap_or(overlay.font_size)),
            color: args.text_color.into(),
            ..overlay
        }
    });

    BrandingSpec {
        logo: args.logo.into(),
        logo_x: percent("logo_x", args.logo_x.unwrap_or(defaults.logo_x)),
        logo_y: percent("logo_y", args.logo_y.unwrap_or(defaults.logo_y)),
        logo_scale: percent("logo_scale", args.logo_scale.unwrap_or(defaults.logo_scale)),
        text,
    }
}

/// Clamps a percentage into `0..=100`, warning when it had to.
fn percent(name: &str, value: f32) -> f32 {
    if value.is_nan() {
        warn!(name = name; "Percentage is not a number, using 0");
        return 0.0;
    }
    let clamped = value.clamp(0.0, 100.0);
    if clamped != value {
        warn!(name = name, value = value, clamped = clamped; "Percentage out of range, clamped");
    }
    clamped
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use bauhaus::branding::{LogoChoice, Tone};

    use super::*;

    #[test]
    fn test_percent_clamps() {
        assert_eq!(percent("density", 50.0), 50.0);
        assert_eq!(percent("density", -5.0), 0.0);
        assert_eq!(percent("density", 250.0), 100.0);
        assert_eq!(percent("density", f32::NAN), 0.0);
    }

    #[test]
    fn test_resolve_canvas() {
        let args = Args {
            aspect: AspectRatio::Square,
            ..Args::default()
        };
        assert_eq!(resolve_canvas(&args).unwrap(), Canvas::new(1080, 1080).unwrap());

        let args = Args {
            width: Some(640),
            ..Args::default()
        };
        assert_eq!(resolve_canvas(&args).unwrap(), Canvas::new(640, 1080).unwrap());

        let args = Args {
            width: Some(0),
            height: Some(10),
            ..Args::default()
        };
        assert!(matches!(resolve_canvas(&args), Err(BauhausError::Canvas(_))));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        let args = Args {
            density: Some(120.0),
            shape_size: Some(10.0),
            seed: Some(3),
            ..Args::default()
        };
        apply_overrides(&mut config, &args);

        let params = config.layout().params();
        assert_eq!(params.density, 100.0);
        assert_eq!(params.dispersion, 50.0);
        assert_eq!(params.shape_size, 10.0);
        assert_eq!(config.layout().seed(), Some(3));
    }

    #[test]
    fn test_branding_spec() {
        let args = Args {
            logo: LogoArg::White,
            logo_scale: Some(30.0),
            text: Some("Hello\\nBauhaus".to_string()),
            text_color: ToneArg::White,
            ..Args::default()
        };
        let spec = branding_spec(&args);
        assert_eq!(spec.logo, LogoChoice::White);
        assert_eq!(spec.logo_scale, 30.0);
        assert_eq!(spec.logo_x, 5.0);

        let text = spec.text.unwrap();
        assert_eq!(text.content, "Hello\nBauhaus");
        assert_eq!(text.color, Tone::White);
        assert_eq!((text.x, text.y, text.font_size), (50.0, 50.0, 5.0));
    }

    #[test]
    fn test_no_text_without_flag() {
        assert!(branding_spec(&Args::default()).text.is_none());
    }
}
