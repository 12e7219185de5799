//! Logo loading and caching.
//!
//! The logo art is fetched once from a file or URL, rasterized (SVG) or
//! decoded (PNG, JPEG, WebP), trimmed to its opaque bounding box and cached
//! per tone. The art is authoritative in one tone; the other is produced by
//! exact inversion of the color channels.

use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use image::{RgbaImage, imageops::FilterType};
use log::{debug, info, warn};
use thiserror::Error;

use bauhaus_core::geometry::Size;

pub use bauhaus_core::branding::{BrandingSpec, LogoChoice, TextOverlay, Tone};

/// Pixels at or below this alpha do not count towards the logo's extent.
pub const TRIM_ALPHA_THRESHOLD: u8 = 8;

/// Why the logo could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("no logo source is configured")]
    NotConfigured,

    #[error("failed to fetch logo from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to read logo from {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("failed to decode logo: {0}")]
    Decode(String),

    #[error("logo has no opaque pixels")]
    Empty,
}

/// Where the logo art comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    Path(PathBuf),
    Url(String),
}

impl LogoSource {
    /// Treats `http://` and `https://` sources as URLs and anything else as a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    fn fetch(&self) -> Result<Vec<u8>, AssetError> {
        match self {
            Self::Path(path) => {
                info!(path:? = path; "Reading logo");
                fs::read(path).map_err(|err| AssetError::Io {
                    path: path.clone(),
                    reason: err.to_string(),
                })
            }
            Self::Url(url) => {
                info!(url = url.as_str(); "Fetching logo");
                let fetch_err = |err: reqwest::Error| AssetError::Fetch {
                    url: url.clone(),
                    reason: err.to_string(),
                };
                let response = reqwest::blocking::get(url.as_str())
                    .and_then(|response| response.error_for_status())
                    .map_err(fetch_err)?;
                Ok(response.bytes().map_err(fetch_err)?.to_vec())
            }
        }
    }
}

/// A trimmed, straight-alpha RGBA logo in one tone.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoRaster {
    image: RgbaImage,
}

impl LogoRaster {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Returns the logo resampled to `width × height` with Lanczos3.
    pub fn resized(&self, width: u32, height: u32) -> RgbaImage {
        image::imageops::resize(&self.image, width.max(1), height.max(1), FilterType::Lanczos3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LogoKey {
    tone: Tone,
    multiplier_bits: u32,
}

type LogoSlot = Arc<OnceLock<Result<Arc<LogoRaster>, AssetError>>>;

/// Memoized logo variants.
///
/// Concurrent requests for the same tone share a single load. A failed load
/// is evicted so the next request tries again.
#[derive(Debug)]
pub struct LogoCache {
    source: Option<LogoSource>,
    source_tone: Tone,
    multiplier: f32,
    bytes: Mutex<Option<Arc<[u8]>>>,
    entries: Mutex<HashMap<LogoKey, LogoSlot>>,
}

impl LogoCache {
    /// Creates a cache for art drawn in `source_tone`, rasterizing SVG at
    /// `multiplier` times its intrinsic size.
    pub fn new(source: Option<LogoSource>, source_tone: Tone, multiplier: f32) -> Self {
        Self {
            source,
            source_tone,
            multiplier: if multiplier > 0.0 { multiplier } else { 1.0 },
            bytes: Mutex::new(None),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// A cache with no source; every resolve fails with [`AssetError::NotConfigured`].
    pub fn unconfigured() -> Self {
        Self::new(None, Tone::Black, 1.0)
    }

    /// Returns the logo in `tone`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] when the source is missing, unreachable,
    /// undecodable or fully transparent.
    pub fn resolve(&self, tone: Tone) -> Result<Arc<LogoRaster>, AssetError> {
        let key = LogoKey {
            tone,
            multiplier_bits: self.multiplier.to_bits(),
        };
        let slot = Arc::clone(
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key)
                .or_default(),
        );

        let mut loaded_here = false;
        let result = slot
            .get_or_init(|| {
                loaded_here = true;
                self.load(tone)
            })
            .clone();

        if !loaded_here {
            debug!(tone:% = tone; "Logo cache hit");
        }

        if result.is_err() {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if entries.get(&key).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                entries.remove(&key);
            }
        }
        result
    }

    fn load(&self, tone: Tone) -> Result<Arc<LogoRaster>, AssetError> {
        let bytes = self.source_bytes()?;
        let decoded = decode(&bytes, self.multiplier)?;
        let trimmed = trim_transparent(&decoded, TRIM_ALPHA_THRESHOLD).ok_or(AssetError::Empty)?;
        let image = if tone == self.source_tone {
            trimmed
        } else {
            invert(trimmed)
        };
        info!(
            tone:% = tone,
            width = image.width(),
            height = image.height();
            "Logo variant prepared"
        );
        Ok(Arc::new(LogoRaster::new(image)))
    }

    /// Fetches the source once; later calls reuse the bytes.
    fn source_bytes(&self) -> Result<Arc<[u8]>, AssetError> {
        let source = self.source.as_ref().ok_or(AssetError::NotConfigured)?;
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bytes) = bytes.as_ref() {
            return Ok(Arc::clone(bytes));
        }
        let fetched: Arc<[u8]> = source.fetch()?.into();
        *bytes = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Resolves `tone` for a preview, where a missing logo is not fatal.
    pub fn resolve_or_warn(&self, tone: Tone) -> Option<Arc<LogoRaster>> {
        match self.resolve(tone) {
            Ok(logo) => Some(logo),
            Err(err) => {
                warn!(err:% = err; "Rendering without logo");
                None
            }
        }
    }
}

impl Default for LogoCache {
    fn default() -> Self {
        Self::unconfigured()
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with('<') && head.contains("<svg"))
}

fn decode(bytes: &[u8], multiplier: f32) -> Result<RgbaImage, AssetError> {
    if looks_like_svg(bytes) {
        rasterize_svg(bytes, multiplier)
    } else {
        image::load_from_memory(bytes)
            .map(|image| image.to_rgba8())
            .map_err(|err| AssetError::Decode(err.to_string()))
    }
}

fn rasterize_svg(bytes: &[u8], multiplier: f32) -> Result<RgbaImage, AssetError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &options)
        .map_err(|err| AssetError::Decode(err.to_string()))?;

    let size = tree.size().to_int_size();
    let width = ((size.width() as f32 * multiplier).round() as u32).max(1);
    let height = ((size.height() as f32 * multiplier).round() as u32).max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| AssetError::Decode(format!("cannot allocate {width}x{height} logo")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(multiplier, multiplier),
        &mut pixmap.as_mut(),
    );

    let mut image = RgbaImage::new(width, height);
    for (pixel, out) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let c = pixel.demultiply();
        *out = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

/// Crops `image` to the bounding box of pixels with alpha above `threshold`.
///
/// Returns `None` if no pixel qualifies.
pub fn trim_transparent(image: &RgbaImage, threshold: u8) -> Option<RgbaImage> {
    let mut extent: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] <= threshold {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let (x0, y0, x1, y1) = extent?;
    Some(image::imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image())
}

/// Replaces every color channel `v` with `255 - v`, keeping alpha.
pub fn invert(mut image: RgbaImage) -> RgbaImage {
    for pixel in image.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = 255 - *channel;
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    /// 20x10 transparent canvas with an opaque black 6x4 block at (5, 3).
    fn logo_png() -> Vec<u8> {
        let mut image = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 0]));
        for y in 3..7 {
            for x in 5..11 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        // Faint fringe that must not count towards the extent.
        image.put_pixel(0, 0, Rgba([0, 0, 0, TRIM_ALPHA_THRESHOLD]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn cache_for(bytes: &[u8], name: &str) -> (tempfile::TempDir, LogoCache) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        let cache = LogoCache::new(Some(LogoSource::Path(path)), Tone::Black, 4.0);
        (dir, cache)
    }

    #[test]
    fn test_trim_to_opaque_box() {
        let (_dir, cache) = cache_for(&logo_png(), "logo.png");
        let logo = cache.resolve(Tone::Black).unwrap();
        assert_eq!((logo.width(), logo.height()), (6, 4));
        assert!(logo.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_black_and_white_are_exact_inverses() {
        let (_dir, cache) = cache_for(&logo_png(), "logo.png");
        let black = cache.resolve(Tone::Black).unwrap();
        let white = cache.resolve(Tone::White).unwrap();

        assert_eq!(black.image().dimensions(), white.image().dimensions());
        for (b, w) in black.image().pixels().zip(white.image().pixels()) {
            assert_eq!(w[0], 255 - b[0]);
            assert_eq!(w[1], 255 - b[1]);
            assert_eq!(w[2], 255 - b[2]);
            assert_eq!(w[3], b[3]);
        }
        assert!(white.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_variants_are_memoized() {
        let (_dir, cache) = cache_for(&logo_png(), "logo.png");
        let first = cache.resolve(Tone::White).unwrap();
        let second = cache.resolve(Tone::White).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_source_bytes_fetched_once() {
        let (dir, cache) = cache_for(&logo_png(), "logo.png");
        cache.resolve(Tone::Black).unwrap();
        fs::remove_file(dir.path().join("logo.png")).unwrap();
        // The white variant still loads from the memoized bytes.
        assert!(cache.resolve(Tone::White).is_ok());
    }

    #[test]
    fn test_svg_source_rasterized_at_multiplier() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect x="2" y="2" width="4" height="4" fill="#000000"/>
        </svg>"##;
        let (_dir, cache) = cache_for(svg, "logo.svg");
        let logo = cache.resolve(Tone::Black).unwrap();
        assert_eq!((logo.width(), logo.height()), (16, 16));
    }

    #[test]
    fn test_unconfigured_fails() {
        let cache = LogoCache::unconfigured();
        assert_eq!(cache.resolve(Tone::Black), Err(AssetError::NotConfigured));
        assert!(cache.resolve_or_warn(Tone::Black).is_none());
    }

    #[test]
    fn test_missing_file_is_io_error_and_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.png");
        let cache = LogoCache::new(Some(LogoSource::Path(path.clone())), Tone::Black, 1.0);

        assert!(matches!(cache.resolve(Tone::Black), Err(AssetError::Io { .. })));

        fs::write(&path, logo_png()).unwrap();
        assert!(cache.resolve(Tone::Black).is_ok());
    }

    #[test]
    fn test_fully_transparent_is_empty() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 3]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let (_dir, cache) = cache_for(&bytes, "blank.png");
        assert_eq!(cache.resolve(Tone::Black), Err(AssetError::Empty));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let (_dir, cache) = cache_for(b"not an image", "logo.png");
        assert!(matches!(cache.resolve(Tone::Black), Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            LogoSource::parse("https://example.com/logo.png"),
            LogoSource::Url("https://example.com/logo.png".into())
        );
        assert_eq!(
            LogoSource::parse("assets/logo.svg"),
            LogoSource::Path(PathBuf::from("assets/logo.svg"))
        );
    }

    #[test]
    fn test_resized_keeps_requested_dimensions() {
        let logo = LogoRaster::new(RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255])));
        assert_eq!(logo.resized(16, 8).dimensions(), (16, 8));
    }
}
