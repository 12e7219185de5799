//! Logo and text overlay specifications.
//!
//! Every position and size here is a percentage of the canvas so the same
//! spec renders identically at any resolution. The helpers convert to target
//! pixels for a given render scale.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    canvas::Canvas,
    color::Color,
    geometry::{Bounds, Point, Size},
    text::LINE_HEIGHT_FACTOR,
};

/// One of the two overlay tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Black,
    White,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Self::Black => Color::black(),
            Self::White => Color::white(),
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            _ => Err(format!("unknown tone `{s}`, expected `black` or `white`")),
        }
    }
}

/// Which logo variant, if any, to composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoChoice {
    #[default]
    None,
    Black,
    White,
}

impl LogoChoice {
    /// Returns the requested tone, or `None` when no logo is wanted.
    pub fn tone(self) -> Option<Tone> {
        match self {
            Self::None => None,
            Self::Black => Some(Tone::Black),
            Self::White => Some(Tone::White),
        }
    }
}

/// Free-form text drawn over the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverlay {
    pub enabled: bool,
    pub content: String,
    /// Horizontal anchor, percent of canvas width.
    pub x: f32,
    /// Vertical anchor, percent of canvas height.
    pub y: f32,
    /// Font size, percent of canvas width.
    pub font_size: f32,
    pub color: Tone,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            enabled: true,
            content: String::new(),
            x: 50.0,
            y: 50.0,
            font_size: 5.0,
            color: Tone::Black,
        }
    }
}

impl TextOverlay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// An overlay is drawn only when enabled and not blank.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.content.trim().is_empty()
    }

    /// Font size in target pixels.
    pub fn font_px(&self, canvas: Canvas, scale: f32) -> f32 {
        self.font_size / 100.0 * canvas.width() as f32 * scale
    }

    /// Distance between consecutive baselines in target pixels.
    pub fn line_height(&self, canvas: Canvas, scale: f32) -> f32 {
        self.font_px(canvas, scale) * LINE_HEIGHT_FACTOR
    }

    /// Widest a wrapped line may be: twice the margin from the anchor to the
    /// nearer side edge, in target pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::{branding::TextOverlay, canvas::Canvas};
    /// let mut text = TextOverlay::new("hi");
    /// text.x = 25.0;
    /// let canvas = Canvas::new(1000, 500).unwrap();
    /// assert_eq!(text.max_line_width(canvas, 1.0), 500.0);
    /// ```
    pub fn max_line_width(&self, canvas: Canvas, scale: f32) -> f32 {
        let margin = self.x.min(100.0 - self.x).max(0.0);
        margin * 2.0 / 100.0 * canvas.width() as f32 * scale
    }

    /// The anchor point in target pixels.
    pub fn anchor(&self, canvas: Canvas, scale: f32) -> Point {
        Point::new(
            self.x / 100.0 * canvas.width() as f32,
            self.y / 100.0 * canvas.height() as f32,
        )
        .scale(scale)
    }
}

/// Logo and text overlay settings for a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingSpec {
    pub logo: LogoChoice,
    /// Left edge of the logo, percent of canvas width.
    pub logo_x: f32,
    /// Top edge of the logo, percent of canvas height.
    pub logo_y: f32,
    /// Logo width, percent of canvas width.
    pub logo_scale: f32,
    pub text: Option<TextOverlay>,
}

impl Default for BrandingSpec {
    fn default() -> Self {
        Self {
            logo: LogoChoice::None,
            logo_x: 5.0,
            logo_y: 5.0,
            logo_scale: 15.0,
            text: None,
        }
    }
}

impl BrandingSpec {
    /// Returns the visible text overlay, if any.
    pub fn visible_text(&self) -> Option<&TextOverlay> {
        self.text.as_ref().filter(|text| text.is_visible())
    }

    /// Target-pixel rectangle for a logo whose source is `logo_size`.
    ///
    /// The width is `logo_scale%` of the scaled canvas width and the height
    /// follows the source aspect ratio.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::{branding::BrandingSpec, canvas::Canvas, geometry::Size};
    /// let spec = BrandingSpec::default();
    /// let canvas = Canvas::new(1000, 1000).unwrap();
    /// let rect = spec.logo_bounds(canvas, 2.0, Size::new(400.0, 200.0));
    /// assert_eq!(rect.min_x(), 100.0);
    /// assert_eq!(rect.width(), 300.0);
    /// assert_eq!(rect.height(), 150.0);
    /// ```
    pub fn logo_bounds(&self, canvas: Canvas, scale: f32, logo_size: Size) -> Bounds {
        let canvas_px = canvas.size().scale(scale);
        let width = self.logo_scale / 100.0 * canvas_px.width();
        let height = if logo_size.width() > 0.0 {
            width * logo_size.height() / logo_size.width()
        } else {
            0.0
        };
        let top_left = Point::new(
            self.logo_x / 100.0 * canvas_px.width(),
            self.logo_y / 100.0 * canvas_px.height(),
        );
        Bounds::new_from_top_left(top_left, Size::new(width, height))
    }
}
