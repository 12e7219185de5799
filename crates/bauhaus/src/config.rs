//! Configuration types for Bauhaus scene generation.
//!
//! This module provides configuration structures that control the default
//! layout parameters, colors, export scales and branding assets. All types
//! implement [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Default layout parameters and an optional seed.
//! - [`StyleConfig`] - Background color and palette override.
//! - [`ExportConfig`] - PDF page scale and high-resolution PNG multiplier.
//! - [`BrandingConfig`] - Logo source and overlay font.
//!
//! # Example
//!
//! ```
//! # use bauhaus::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.export().pdf_page_scale(), 0.75);
//! ```

use serde::Deserialize;

use bauhaus_core::{
    branding::Tone,
    color::{CREMA, Color, Palette},
};

use crate::layout::LayoutParams;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    export: ExportConfig,

    #[serde(default)]
    branding: BrandingConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        export: ExportConfig,
        branding: BrandingConfig,
    ) -> Self {
        Self {
            layout,
            style,
            export,
            branding,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the branding configuration.
    pub fn branding(&self) -> &BrandingConfig {
        &self.branding
    }

    /// Mutable access to the layout section, used to apply command-line overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    pub fn branding_mut(&mut self) -> &mut BrandingConfig {
        &mut self.branding
    }
}

/// Default layout parameters, as percentages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    density: f32,
    dispersion: f32,
    center_exclusion: f32,
    shape_size: f32,
    /// Fixed RNG seed. Unset means a fresh entropy seed per scene.
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            density: params.density,
            dispersion: params.dispersion,
            center_exclusion: params.center_exclusion,
            shape_size: params.shape_size,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Returns the configured parameters.
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            density: self.density,
            dispersion: self.dispersion,
            center_exclusion: self.center_exclusion,
            shape_size: self.shape_size,
        }
    }

    pub fn set_params(&mut self, params: LayoutParams) {
        self.density = params.density;
        self.dispersion = params.dispersion;
        self.center_exclusion = params.center_exclusion;
        self.shape_size = params.shape_size;
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }
}

/// Background color and palette.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color string. Defaults to crema.
    #[serde(default)]
    background_color: Option<String>,

    /// Replacement palette, as color strings.
    #[serde(default)]
    palette: Option<Vec<String>>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], falling back to crema.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed or
    /// is not fully opaque.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new_opaque(self.background_color.as_deref().unwrap_or(CREMA))
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = Some(color.into());
    }

    /// Returns the configured palette, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if any palette entry cannot be parsed.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            Some(colors) => Palette::parse(colors)
                .map_err(|err| format!("Invalid palette color in config: {err}")),
            None => Ok(Palette::default()),
        }
    }
}

/// Export scale factors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// PDF points per canvas pixel.
    pdf_page_scale: f32,
    /// Resolution multiplier of the high-resolution PNG export.
    high_res_scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pdf_page_scale: 0.75,
            high_res_scale: 2.0,
        }
    }
}

impl ExportConfig {
    pub fn new(pdf_page_scale: f32, high_res_scale: f32) -> Self {
        Self {
            pdf_page_scale,
            high_res_scale,
        }
    }

    pub fn pdf_page_scale(&self) -> f32 {
        self.pdf_page_scale
    }

    pub fn high_res_scale(&self) -> f32 {
        self.high_res_scale
    }
}

/// Logo asset and overlay font.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// File path or `http(s)` URL of the logo art.
    logo_source: Option<String>,
    /// The tone the source art is drawn in. The other tone is derived by inversion.
    logo_source_color: Tone,
    /// Internal rasterization multiplier for SVG logos.
    logo_multiplier: f32,
    /// Font family used for the text overlay.
    font_family: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            logo_source: None,
            logo_source_color: Tone::Black,
            logo_multiplier: 4.0,
            font_family: String::from("sans-serif"),
        }
    }
}

impl BrandingConfig {
    pub fn logo_source(&self) -> Option<&str> {
        self.logo_source.as_deref()
    }

    pub fn set_logo_source(&mut self, source: Option<String>) {
        self.logo_source = source;
    }

    pub fn logo_source_color(&self) -> Tone {
        self.logo_source_color
    }

    pub fn logo_multiplier(&self) -> f32 {
        self.logo_multiplier
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}
