//! Bauhaus - procedural geometric background generator.
//!
//! Layout, rendering and export for Bauhaus-style backgrounds. Flat-colored
//! shapes are scattered over a solid background according to four percentage
//! parameters, optionally branded with a logo and text, and rendered to PNG
//! or PDF from one shared shape model.

pub mod branding;
pub mod config;
pub mod export;
pub mod layout;
pub mod preview;

mod error;

pub use bauhaus_core::{canvas, color, geometry, scene, shape, text};

pub use error::BauhausError;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use bauhaus_core::{
    branding::BrandingSpec,
    canvas::Canvas,
    scene::{History, Scene},
};

use branding::{LogoCache, LogoRaster, LogoSource};
use config::AppConfig;
use export::{raster, vector};
use layout::Engine;
use preview::PreviewRenderer;

/// Builder for generating and rendering Bauhaus scenes.
///
/// This provides an API for running scenes through the layout and rendering
/// stages. It owns the logo cache, so branded renders made through one
/// builder share their loaded logo, and remembers the scenes it generated
/// in a bounded [`History`].
///
/// # Examples
///
/// ```rust,no_run
/// use bauhaus::{SceneBuilder, branding::BrandingSpec, canvas::Canvas, config::AppConfig};
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let canvas = Canvas::new(1920, 1080).expect("valid canvas");
///
/// // Same seed, same scene
/// let scene = builder.generate_seeded(canvas, 42).expect("Failed to generate");
///
/// let png = builder
///     .render_png(&scene, &BrandingSpec::default(), 1.0)
///     .expect("Failed to render");
/// let pdf = builder
///     .render_pdf(&scene, &BrandingSpec::default())
///     .expect("Failed to render");
/// ```
pub struct SceneBuilder {
    config: AppConfig,
    logos: Arc<LogoCache>,
    history: Mutex<History>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout defaults, colors, export scales and branding assets
    pub fn new(config: AppConfig) -> Self {
        let branding = config.branding();
        let logos = LogoCache::new(
            branding.logo_source().map(LogoSource::parse),
            branding.logo_source_color(),
            branding.logo_multiplier(),
        );
        Self {
            config,
            logos: Arc::new(logos),
            history: Mutex::new(History::new()),
        }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the shared logo cache.
    pub fn logos(&self) -> &Arc<LogoCache> {
        &self.logos
    }

    /// Builds a layout engine for `canvas` from the configured parameters and colors.
    ///
    /// # Errors
    ///
    /// Returns [`BauhausError::Layout`] for an unparsable background or
    /// palette, or a palette with nothing but the background in it.
    pub fn engine(&self, canvas: Canvas) -> Result<Engine, BauhausError> {
        let style = self.config.style();
        let background = style.background_color().map_err(BauhausError::Layout)?;
        let palette = style.palette().map_err(BauhausError::Layout)?;
        Engine::new(canvas, background, &palette, self.config.layout().params())
    }

    /// Generate a scene.
    ///
    /// Uses the configured seed when there is one and fresh OS entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns `BauhausError` if the configured colors are unusable.
    pub fn generate(&self, canvas: Canvas) -> Result<Scene, BauhausError> {
        match self.config.layout().seed() {
            Some(seed) => self.generate_seeded(canvas, seed),
            None => self.generate_with_rng(canvas, &mut StdRng::from_os_rng()),
        }
    }

    /// Generate a scene reproducibly from `seed`.
    pub fn generate_seeded(&self, canvas: Canvas, seed: u64) -> Result<Scene, BauhausError> {
        debug!(seed = seed; "Seeding layout");
        self.generate_with_rng(canvas, &mut StdRng::seed_from_u64(seed))
    }

    /// Generate a scene drawing randomness from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<Scene, BauhausError> {
        info!(canvas:% = canvas; "Generating scene");
        let scene = self.engine(canvas)?.generate(rng);
        trace!(scene:? = scene; "Generated scene");
        let id = self.lock_history().push(scene.clone());
        debug!(history_id = id; "Scene recorded");
        Ok(scene)
    }

    /// Snapshot of the recently generated scenes, newest first.
    pub fn history(&self) -> History {
        self.lock_history().clone()
    }

    /// Returns a remembered scene by its history id.
    pub fn recall(&self, id: u64) -> Option<Scene> {
        self.lock_history().get(id).map(|entry| entry.scene().clone())
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves the logo an export needs. Failures are fatal here.
    fn export_logo(&self, branding: &BrandingSpec) -> Result<Option<Arc<LogoRaster>>, BauhausError> {
        Ok(branding
            .logo
            .tone()
            .map(|tone| self.logos.resolve(tone))
            .transpose()?)
    }

    /// Render a scene to PNG bytes at `scale` times the canvas resolution.
    ///
    /// # Errors
    ///
    /// Returns `BauhausError` if the requested logo cannot be loaded or the
    /// surface cannot be rendered.
    pub fn render_png(
        &self,
        scene: &Scene,
        branding: &BrandingSpec,
        scale: f32,
    ) -> Result<Vec<u8>, BauhausError> {
        check_scale("resolution", scale)?;
        info!(scale = scale; "Rendering PNG");
        let logo = self.export_logo(branding)?;
        let renderer = raster::render(
            scene,
            branding,
            logo.as_deref(),
            scale,
            self.config.branding().font_family(),
        )?;
        Ok(renderer.encode_png()?)
    }

    /// Render a scene to PNG bytes at the configured high-resolution scale.
    pub fn render_high_res_png(
        &self,
        scene: &Scene,
        branding: &BrandingSpec,
    ) -> Result<Vec<u8>, BauhausError> {
        self.render_png(scene, branding, self.config.export().high_res_scale())
    }

    /// Render a scene to a single-page PDF.
    ///
    /// # Errors
    ///
    /// Returns `BauhausError` if the requested logo cannot be loaded or the
    /// document cannot be assembled. The latter suggests PNG as a fallback.
    pub fn render_pdf(&self, scene: &Scene, branding: &BrandingSpec) -> Result<Vec<u8>, BauhausError> {
        let page_scale = self.config.export().pdf_page_scale();
        check_scale("PDF page", page_scale)?;
        info!(page_scale = page_scale; "Rendering PDF");
        let logo = self.export_logo(branding)?;
        Ok(vector::render(
            scene,
            branding,
            logo.as_deref(),
            page_scale,
        )?)
    }

    /// Create a preview renderer sharing this builder's logo cache.
    pub fn preview_renderer(&self, scale: f32) -> PreviewRenderer {
        PreviewRenderer::new(
            Arc::clone(&self.logos),
            self.config.branding().font_family(),
            scale,
        )
    }
}

/// Rejects a render scale that would produce an empty or invalid surface.
fn check_scale(what: &str, scale: f32) -> Result<(), BauhausError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(export::Error::Render(format!("invalid {what} scale {scale}")).into())
    }
}
