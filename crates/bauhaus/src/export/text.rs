//! Text shaping for the overlay, shared by both renderers.
//!
//! Measuring and glyph rasterization go through one process-wide
//! [`TextManager`] so the raster and vector paths wrap text with identical
//! metrics.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use log::info;

use bauhaus_core::{
    branding::TextOverlay,
    canvas::Canvas,
    text::{LINE_HEIGHT_FACTOR, TextLine, layout_lines, wrap_text},
};

/// Average glyph advance, as a share of the font size, used when no font
/// could shape the text.
const FALLBACK_ADVANCE: f32 = 0.55;

/// TextManager handles text measurement and glyph rasterization.
/// It keeps one FontSystem and glyph cache for the whole process.
pub struct TextManager {
    font_system: Mutex<FontSystem>,
    swash_cache: Mutex<SwashCache>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
            swash_cache: Mutex::new(SwashCache::new()),
        }
    }

    /// Returns the process-wide instance.
    pub fn global() -> &'static TextManager {
        TEXT_MANAGER.get_or_init(TextManager::new)
    }

    /// Width in pixels of `text` set on a single line at `font_px`.
    pub fn measure(&self, text: &str, family: &str, font_px: f32) -> f32 {
        if text.is_empty() || font_px <= 0.0 {
            return 0.0;
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");
        let metrics = Metrics::new(font_px, font_px * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(font_family(family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0f32, f32::max);

        if width > 0.0 {
            width
        } else {
            text.chars().count() as f32 * font_px * FALLBACK_ADVANCE
        }
    }

    /// Rasterizes one line of text.
    ///
    /// `plot` receives rectangles relative to the top-left of a line box of
    /// height `line_height`, each with its coverage-weighted RGBA color.
    pub fn draw_line(
        &self,
        text: &str,
        family: &str,
        font_px: f32,
        line_height: f32,
        color: [u8; 4],
        mut plot: impl FnMut(i32, i32, u32, u32, [u8; 4]),
    ) {
        if text.is_empty() || font_px <= 0.0 || line_height <= 0.0 {
            return;
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");
        let mut swash_cache = self.swash_cache.lock().expect("failed to lock SwashCache");

        let metrics = Metrics::new(font_px, line_height);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(font_family(family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let [r, g, b, a] = color;
        buffer.draw(
            &mut swash_cache,
            cosmic_text::Color::rgba(r, g, b, a),
            |x, y, w, h, c| plot(x, y, w, h, [c.r(), c.g(), c.b(), c.a()]),
        );
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

fn font_family(name: &str) -> Family<'_> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        other => Family::Name(other),
    }
}

/// Wraps and positions the overlay for a target at `scale`, measuring with
/// the shaped `family`.
pub fn layout_overlay(
    overlay: &TextOverlay,
    canvas: Canvas,
    scale: f32,
    family: &str,
) -> Vec<TextLine> {
    let manager = TextManager::global();
    layout_overlay_with(overlay, canvas, scale, |line, font_px| {
        manager.measure(line, family, font_px)
    })
}

/// Wraps and positions the overlay with a caller-supplied `measure(line, font_px)`.
///
/// Both renderers go through this, so explicit breaks, wrap width and
/// centring follow the same rules in PNG and PDF output; only the font
/// metrics differ.
pub fn layout_overlay_with(
    overlay: &TextOverlay,
    canvas: Canvas,
    scale: f32,
    measure: impl Fn(&str, f32) -> f32,
) -> Vec<TextLine> {
    let font_px = overlay.font_px(canvas, scale);
    let lines = wrap_text(
        &overlay.content,
        overlay.max_line_width(canvas, scale),
        |line| measure(line, font_px),
    );
    layout_lines(
        lines,
        overlay.anchor(canvas, scale),
        overlay.line_height(canvas, scale),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(TextManager::global().measure("", "sans-serif", 20.0), 0.0);
        assert_eq!(TextManager::global().measure("abc", "sans-serif", 0.0), 0.0);
    }

    #[test]
    fn test_measure_grows_with_content() {
        let manager = TextManager::global();
        let short = manager.measure("ab", "sans-serif", 20.0);
        let long = manager.measure("abababababab", "sans-serif", 20.0);
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(TextManager::global(), TextManager::global()));
    }

    #[test]
    fn test_overlay_explicit_break_kept() {
        let canvas = Canvas::new(1000, 1000).unwrap();
        let overlay = TextOverlay::new("first\nsecond");
        let lines = layout_overlay(&overlay, canvas, 1.0, "sans-serif");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
        assert!(lines[0].center.y() < lines[1].center.y());
    }

    #[test]
    fn test_overlay_uses_supplied_metrics() {
        let canvas = Canvas::new(1000, 1000).unwrap();
        let mut overlay = TextOverlay::new("aa bb cc");
        overlay.x = 10.0;
        // 200 px of line width, 100 px per character.
        let lines = layout_overlay_with(&overlay, canvas, 1.0, |line, _| {
            line.chars().count() as f32 * 100.0
        });
        let texts: Vec<_> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, ["aa", "bb", "cc"]);
    }

    #[test]
    fn test_overlay_long_line_wraps() {
        let canvas = Canvas::new(400, 400).unwrap();
        let mut overlay = TextOverlay::new(
            "a fairly long sentence that cannot possibly fit in a narrow column",
        );
        overlay.x = 10.0;
        let lines = layout_overlay(&overlay, canvas, 1.0, "sans-serif");
        assert!(lines.len() >= 2);
        for line in &lines {
            assert_eq!(line.center.x(), 40.0);
        }
    }
}
