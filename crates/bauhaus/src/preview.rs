//! Background preview rendering.
//!
//! Every request renders on its own worker thread. Only the most recent
//! request may publish its frame; anything it superseded is dropped when it
//! finishes, so a slow render can never overwrite a newer one.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
};

use log::{debug, warn};

use bauhaus_core::{branding::BrandingSpec, scene::Scene};

use crate::{branding::LogoCache, export::raster};

/// A finished preview image.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    generation: u64,
    width: u32,
    height: u32,
    png: Arc<[u8]>,
}

impl PreviewFrame {
    /// The request this frame answers.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }
}

/// Handle to an in-flight preview request.
#[derive(Debug)]
pub struct PreviewTicket {
    generation: u64,
    handle: JoinHandle<bool>,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Blocks until the render finishes. Returns whether its frame was published.
    pub fn wait(self) -> bool {
        self.handle.join().unwrap_or(false)
    }
}

struct Shared {
    generation: AtomicU64,
    latest: Mutex<Option<PreviewFrame>>,
    logos: Arc<LogoCache>,
    font_family: String,
    scale: f32,
}

impl Shared {
    /// Stores `frame` if no newer request has been made since it started.
    fn publish(&self, frame: PreviewFrame) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.generation.load(Ordering::SeqCst);
        if frame.generation != current {
            debug!(
                generation = frame.generation,
                current = current;
                "Discarding superseded preview"
            );
            return false;
        }
        *latest = Some(frame);
        true
    }

    fn render(&self, generation: u64, scene: &Scene, branding: &BrandingSpec) -> Option<PreviewFrame> {
        // A missing logo must not block the preview.
        let logo = branding
            .logo
            .tone()
            .and_then(|tone| self.logos.resolve_or_warn(tone));

        let rendered = raster::render(scene, branding, logo.as_deref(), self.scale, &self.font_family)
            .and_then(|renderer| {
                let png = renderer.encode_png()?;
                Ok((renderer.width(), renderer.height(), png))
            });

        match rendered {
            Ok((width, height, png)) => Some(PreviewFrame {
                generation,
                width,
                height,
                png: png.into(),
            }),
            Err(err) => {
                warn!(generation = generation, err:% = err; "Preview render failed");
                None
            }
        }
    }
}

/// Renders previews off the calling thread with last-write-wins semantics.
#[derive(Clone)]
pub struct PreviewRenderer {
    shared: Arc<Shared>,
}

impl PreviewRenderer {
    /// Creates a renderer drawing at `scale` times the canvas size.
    pub fn new(logos: Arc<LogoCache>, font_family: impl Into<String>, scale: f32) -> Self {
        Self {
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                latest: Mutex::new(None),
                logos,
                font_family: font_family.into(),
                scale,
            }),
        }
    }

    /// Starts rendering `scene`, superseding every earlier request.
    pub fn request(&self, scene: Scene, branding: BrandingSpec) -> PreviewTicket {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation = generation; "Preview requested");

        let shared = Arc::clone(&self.shared);
        let handle = thread::spawn(move || {
            // Skip the work entirely if already superseded.
            if shared.generation.load(Ordering::SeqCst) != generation {
                debug!(generation = generation; "Skipping superseded preview");
                return false;
            }
            shared
                .render(generation, &scene, &branding)
                .is_some_and(|frame| shared.publish(frame))
        });

        PreviewTicket { generation, handle }
    }

    /// The most recently published frame.
    pub fn latest(&self) -> Option<PreviewFrame> {
        self.shared
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
