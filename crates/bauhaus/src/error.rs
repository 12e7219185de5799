//! Error types for Bauhaus operations.
//!
//! This module provides the main error type [`BauhausError`] which wraps
//! the error conditions that can occur while generating and rendering scenes.

use std::io;

use thiserror::Error;

use bauhaus_core::canvas::InvalidCanvas;

use crate::branding::AssetError;

/// The main error type for Bauhaus operations.
///
/// # Fatal and recoverable variants
///
/// `Canvas` is a precondition violation and always fatal. `Asset` is
/// recoverable: the preview renders without the logo, while exports
/// surface it to the caller.
#[derive(Debug, Error)]
pub enum BauhausError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Canvas(#[from] InvalidCanvas),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Logo error: {0}")]
    Asset(#[from] AssetError),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}
