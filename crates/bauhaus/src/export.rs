pub mod raster;
pub mod text;
pub mod vector;

mod helvetica;

use bauhaus_core::{canvas::Canvas, scene::Scene, shape::Shape};

/// A render target that can fill shape outlines.
///
/// Each backend implements one dispatch over the shape kinds; the geometry
/// itself comes from [`Shape::outline`] and [`Shape::placement`].
pub trait ShapeRenderer {
    fn draw_shape(&mut self, shape: &Shape) -> Result<(), Error>;

    /// Draws every shape of `scene` in sequence order.
    fn draw_shapes(&mut self, scene: &Scene) -> Result<(), Error> {
        for shape in scene.shapes() {
            self.draw_shape(shape)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// What kind of file an export produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportKind {
    /// PNG at the canvas resolution.
    Png,
    /// PNG at a resolution multiplier.
    HighResPng { scale: f32 },
    Pdf,
}

/// Default file name for an export made at `millis` since the Unix epoch.
///
/// High-resolution PNGs carry their pixel dimensions.
///
/// # Examples
///
/// ```
/// # use bauhaus::export::{ExportKind, export_file_name};
/// # use bauhaus_core::canvas::Canvas;
/// let canvas = Canvas::new(1920, 1080).unwrap();
/// assert_eq!(export_file_name(ExportKind::Png, canvas, 42), "bauhaus-42.png");
/// assert_eq!(
///     export_file_name(ExportKind::HighResPng { scale: 2.0 }, canvas, 42),
///     "bauhaus-42-3840x2160.png"
/// );
/// assert_eq!(export_file_name(ExportKind::Pdf, canvas, 42), "bauhaus-42.pdf");
/// ```
pub fn export_file_name(kind: ExportKind, canvas: Canvas, millis: u128) -> String {
    match kind {
        ExportKind::Png => format!("bauhaus-{millis}.png"),
        ExportKind::HighResPng { scale } => {
            let (width, height) = canvas.scaled(scale);
            format!("bauhaus-{millis}-{width}x{height}.png")
        }
        ExportKind::Pdf => format!("bauhaus-{millis}.pdf"),
    }
}
