//! Command-line argument definitions for the Bauhaus CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the canvas, override layout parameters,
//! configure branding and choose the output format and destination.

use clap::{Parser, ValueEnum};

use bauhaus::{
    branding::{LogoChoice, Tone},
    canvas::AspectRatio,
};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Pdf,
}

/// Logo variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogoArg {
    #[default]
    None,
    Black,
    White,
}

impl From<LogoArg> for LogoChoice {
    fn from(arg: LogoArg) -> Self {
        match arg {
            LogoArg::None => LogoChoice::None,
            LogoArg::Black => LogoChoice::Black,
            LogoArg::White => LogoChoice::White,
        }
    }
}

/// Text overlay color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ToneArg {
    #[default]
    Black,
    White,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::Black => Tone::Black,
            ToneArg::White => Tone::White,
        }
    }
}

/// Command-line arguments for the Bauhaus background generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output file path. Defaults to a timestamped name in the current directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Canvas preset (1:1, 16:9, 9:16, 4:3, 3:4, A4) or WIDTHxHEIGHT
    #[arg(long, default_value = "16:9")]
    pub aspect: AspectRatio,

    /// Custom canvas width in pixels; overrides the preset width
    #[arg(long)]
    pub width: Option<u32>,

    /// Custom canvas height in pixels; overrides the preset height
    #[arg(long)]
    pub height: Option<u32>,

    /// Background color (any CSS color)
    #[arg(long)]
    pub background: Option<String>,

    /// Shape density, 0-100
    #[arg(long)]
    pub density: Option<f32>,

    /// Shape dispersion, 0-100
    #[arg(long)]
    pub dispersion: Option<f32>,

    /// Size of the empty central ellipse, 0-100
    #[arg(long)]
    pub center_exclusion: Option<f32>,

    /// Shape size, 0-100
    #[arg(long)]
    pub shape_size: Option<f32>,

    /// Seed for a reproducible layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export PNG at the configured high-resolution scale
    #[arg(long)]
    pub high_res: bool,

    /// Logo variant to overlay
    #[arg(long, value_enum, default_value_t = LogoArg::None)]
    pub logo: LogoArg,

    /// Logo source file or URL; overrides the configuration
    #[arg(long)]
    pub logo_source: Option<String>,

    /// Logo left edge, percent of canvas width
    #[arg(long)]
    pub logo_x: Option<f32>,

    /// Logo top edge, percent of canvas height
    #[arg(long)]
    pub logo_y: Option<f32>,

    /// Logo width, percent of canvas width
    #[arg(long)]
    pub logo_scale: Option<f32>,

    /// Overlay text; use \n for explicit line breaks
    #[arg(long)]
    pub text: Option<String>,

    /// Text anchor, percent of canvas width
    #[arg(long)]
    pub text_x: Option<f32>,

    /// Text anchor, percent of canvas height
    #[arg(long)]
    pub text_y: Option<f32>,

    /// Font size, percent of canvas width
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Text color
    #[arg(long, value_enum, default_value_t = ToneArg::Black)]
    pub text_color: ToneArg,

    /// Also write the generated scene as JSON to this path
    #[arg(long)]
    pub dump_scene: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: None,
            format: OutputFormat::Png,
            aspect: AspectRatio::Landscape,
            width: None,
            height: None,
            background: None,
            density: None,
            dispersion: None,
            center_exclusion: None,
            shape_size: None,
            seed: None,
            high_res: false,
            logo: LogoArg::None,
            logo_source: None,
            logo_x: None,
            logo_y: None,
            logo_scale: None,
            text: None,
            text_x: None,
            text_y: None,
            font_size: None,
            text_color: ToneArg::Black,
            dump_scene: None,
            config: None,
            log_level: String::from("info"),
        }
    }
}
