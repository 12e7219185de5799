//! Error adapter for converting BauhausError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use bauhaus::BauhausError;

/// Adapter giving a [`BauhausError`] a diagnostic code and, where there is
/// an obvious remedy, a help line.
pub struct ErrorAdapter<'a>(pub &'a BauhausError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BauhausError::Io(_) => "bauhaus::io",
            BauhausError::Canvas(_) => "bauhaus::canvas",
            BauhausError::Layout(_) => "bauhaus::layout",
            BauhausError::Asset(_) => "bauhaus::asset",
            BauhausError::Export(_) => "bauhaus::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BauhausError::Io(_) => return None,
            BauhausError::Canvas(_) => "width and height must both be at least 1 pixel",
            BauhausError::Layout(_) => "check the [style] colors in the configuration file",
            BauhausError::Asset(_) => {
                "check `branding.logo_source` in the configuration, or pass `--logo none`"
            }
            BauhausError::Export(_) => "if the PDF export failed, re-run with `--format png`",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
