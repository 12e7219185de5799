//! Canvas dimensions and aspect-ratio presets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Point, Size};

/// A canvas with a zero dimension cannot be laid out or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid canvas {width}x{height}: both dimensions must be non-zero")]
pub struct InvalidCanvas {
    pub width: u32,
    pub height: u32,
}

/// Pixel dimensions of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCanvas")]
pub struct Canvas {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawCanvas {
    width: u32,
    height: u32,
}

impl TryFrom<RawCanvas> for Canvas {
    type Error = InvalidCanvas;

    fn try_from(raw: RawCanvas) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl Canvas {
    /// Creates a canvas.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCanvas`] when either dimension is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::canvas::Canvas;
    /// assert!(Canvas::new(1920, 1080).is_ok());
    /// assert!(Canvas::new(0, 1080).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidCanvas> {
        if width == 0 || height == 0 {
            return Err(InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    pub fn size(self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn center(self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Pixel dimensions of a render at `scale`, rounded to whole pixels.
    pub fn scaled(self, scale: f32) -> (u32, u32) {
        (
            ((self.width as f32 * scale).round() as u32).max(1),
            ((self.height as f32 * scale).round() as u32).max(1),
        )
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Named canvas formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    Square,
    #[default]
    Landscape,
    Portrait,
    Classic,
    ClassicPortrait,
    A4,
    Custom { width: u32, height: u32 },
}

impl AspectRatio {
    /// Every fixed preset, in menu order.
    pub const PRESETS: [AspectRatio; 6] = [
        Self::Square,
        Self::Landscape,
        Self::Portrait,
        Self::Classic,
        Self::ClassicPortrait,
        Self::A4,
    ];

    /// Pixel dimensions of the preset. A4 is 300 DPI.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Square => (1080, 1080),
            Self::Landscape => (1920, 1080),
            Self::Portrait => (1080, 1920),
            Self::Classic => (1440, 1080),
            Self::ClassicPortrait => (1080, 1440),
            Self::A4 => (2480, 3508),
            Self::Custom { width, height } => (width, height),
        }
    }

    /// Width over height. A4 uses the paper ratio rather than its rounded pixels.
    pub fn ratio(self) -> f32 {
        match self {
            Self::A4 => 210.0 / 297.0,
            other => {
                let (w, h) = other.dimensions();
                w as f32 / h as f32
            }
        }
    }

    /// Builds the canvas for this preset.
    ///
    /// # Errors
    ///
    /// Only a custom ratio with a zero dimension fails.
    pub fn canvas(self) -> Result<Canvas, InvalidCanvas> {
        let (w, h) = self.dimensions();
        Canvas::new(w, h)
    }

    /// Returns the preset whose ratio is nearest to `width / height`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bauhaus_core::canvas::AspectRatio;
    /// assert_eq!(AspectRatio::closest(3840, 2160), AspectRatio::Landscape);
    /// assert_eq!(AspectRatio::closest(800, 800), AspectRatio::Square);
    /// ```
    pub fn closest(width: u32, height: u32) -> AspectRatio {
        let target = width as f32 / height.max(1) as f32;
        Self::PRESETS
            .into_iter()
            .min_by(|a, b| {
                let da = (a.ratio() - target).abs();
                let db = (b.ratio() - target).abs();
                da.total_cmp(&db)
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "1:1"),
            Self::Landscape => write!(f, "16:9"),
            Self::Portrait => write!(f, "9:16"),
            Self::Classic => write!(f, "4:3"),
            Self::ClassicPortrait => write!(f, "3:4"),
            Self::A4 => write!(f, "A4"),
            Self::Custom { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    /// Parses `1:1`, `16:9`, `9:16`, `4:3`, `3:4`, `a4` or `<W>x<H>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1:1" => Ok(Self::Square),
            "16:9" => Ok(Self::Landscape),
            "9:16" => Ok(Self::Portrait),
            "4:3" => Ok(Self::Classic),
            "3:4" => Ok(Self::ClassicPortrait),
            "a4" => Ok(Self::A4),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| format!("unknown aspect ratio `{s}`"))?;
                let width = w
                    .parse()
                    .map_err(|_| format!("invalid width in aspect ratio `{s}`"))?;
                let height = h
                    .parse()
                    .map_err(|_| format!("invalid height in aspect ratio `{s}`"))?;
                Ok(Self::Custom { width, height })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rejects_zero() {
        assert_eq!(
            Canvas::new(10, 0),
            Err(InvalidCanvas {
                width: 10,
                height: 0
            })
        );
        assert!(Canvas::new(0, 0).is_err());
    }

    #[test]
    fn test_canvas_scaled_rounds() {
        let canvas = Canvas::new(1920, 1080).unwrap();
        assert_eq!(canvas.scaled(2.0), (3840, 2160));
        assert_eq!(canvas.scaled(0.5), (960, 540));
        assert_eq!(Canvas::new(3, 3).unwrap().scaled(0.5), (2, 2));
    }

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(AspectRatio::Landscape.dimensions(), (1920, 1080));
        assert_eq!(AspectRatio::Portrait.dimensions(), (1080, 1920));
        assert_eq!(AspectRatio::A4.dimensions(), (2480, 3508));
    }

    #[test]
    fn test_closest_maps_presets_to_themselves() {
        for preset in AspectRatio::PRESETS {
            let (w, h) = preset.dimensions();
            assert_eq!(AspectRatio::closest(w, h), preset, "preset {preset}");
        }
    }

    #[test]
    fn test_parse_aspect() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert_eq!("A4".parse::<AspectRatio>(), Ok(AspectRatio::A4));
        assert_eq!(
            "800x600".parse::<AspectRatio>(),
            Ok(AspectRatio::Custom {
                width: 800,
                height: 600
            })
        );
        assert!("wide".parse::<AspectRatio>().is_err());
        assert!("800xabc".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_custom_zero_canvas_fails() {
        let custom = AspectRatio::Custom {
            width: 0,
            height: 10,
        };
        assert!(custom.canvas().is_err());
    }

    #[test]
    fn test_canvas_deserialize_validates() {
        let ok: Canvas = serde_json::from_str(r#"{"width":4,"height":3}"#).unwrap();
        assert_eq!(ok.to_string(), "4x3");
        assert!(serde_json::from_str::<Canvas>(r#"{"width":0,"height":3}"#).is_err());
    }
}
