//! Color handling for Bauhaus scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the fixed [`Palette`] that shapes are painted from.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Serialize};

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Scene colors are always opaque; the renderers only ever read the 8-bit
/// sRGB channels through [`Color::to_rgba8`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    color: DynamicColor,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgba8().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use bauhaus_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_ne!(red, blue);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Like [`Color::new`], but rejects colors that are not fully opaque.
    ///
    /// Backgrounds and palette entries go through this so every fill in a
    /// scene covers what is under it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bauhaus_core::color::Color;
    ///
    /// assert!(Color::new_opaque("#8A1B61").is_ok());
    /// assert!(Color::new_opaque("rgba(0, 0, 0, 0.5)").is_err());
    /// ```
    pub fn new_opaque(color_str: &str) -> Result<Self, String> {
        let color = Self::new(color_str)?;
        if color.to_rgba8()[3] != u8::MAX {
            return Err(format!("color `{color_str}` must be fully opaque"));
        }
        Ok(color)
    }

    /// Pure black, used for logo and text overlays.
    pub fn black() -> Self {
        Self::new("#000000").expect("'#000000' is a valid CSS color")
    }

    /// Pure white, used for logo and text overlays.
    pub fn white() -> Self {
        Self::new("#ffffff").expect("'#ffffff' is a valid CSS color")
    }

    /// Returns the color as 8-bit sRGB channels `[r, g, b, a]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bauhaus_core::color::Color;
    ///
    /// let mustard = Color::new("#F4C82E").unwrap();
    /// assert_eq!(mustard.to_rgba8(), [0xF4, 0xC8, 0x2E, 0xFF]);
    /// ```
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Returns the color channels normalized to `0.0..=1.0`.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        let [r, g, b, _] = self.to_rgba8();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// Returns the `#rrggbb` form of this color.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Crema, the default background.
pub const CREMA: &str = "#F9F7DD";
pub const MORADO_INTENSO: &str = "#8A1B61";
pub const AMARILLO_MOSTAZA: &str = "#F4C82E";
pub const NARANJA_CALIDO: &str = "#E37239";
pub const MORADO_MEDIO: &str = "#9C77B3";
pub const ROSA: &str = "#F09AE4";
pub const MAGENTA_INTENSO: &str = "#B24A87";
pub const VERDE_MENTA: &str = "#9ED1BC";

/// The fixed set of colors shapes are painted from.
///
/// # Examples
///
/// ```
/// use bauhaus_core::color::{Color, Palette, CREMA};
///
/// let palette = Palette::default();
/// let background = Color::new(CREMA).unwrap();
/// let usable = palette.excluding(background);
/// assert_eq!(usable.len(), palette.len() - 1);
/// assert!(!usable.contains(&background));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from explicit colors.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Parses a palette from CSS color strings.
    ///
    /// # Errors
    ///
    /// Returns the first color string that fails to parse or is translucent.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, String> {
        colors
            .iter()
            .map(|c| Color::new_opaque(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Returns all palette colors.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the palette colors that differ from `background`.
    ///
    /// Shapes are only ever painted with these so none of them disappears into
    /// the background.
    pub fn excluding(&self, background: Color) -> Vec<Color> {
        self.colors
            .iter()
            .copied()
            .filter(|color| *color != background)
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::parse(&[
            CREMA,
            MORADO_INTENSO,
            AMARILLO_MOSTAZA,
            NARANJA_CALIDO,
            MORADO_MEDIO,
            ROSA,
            MAGENTA_INTENSO,
            VERDE_MENTA,
        ])
        .expect("built-in palette colors are valid")
    }
}
