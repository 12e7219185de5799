//! Bauhaus Core Types and Definitions
//!
//! This crate provides the backend-agnostic model shared by the layout engine
//! and every renderer. It includes:
//!
//! - **Colors**: CSS color handling and the fixed palette ([`color`] module)
//! - **Geometry**: Points, sizes, bounds and placement transforms ([`geometry`] module)
//! - **Shapes**: The tagged shape model and its local-frame outlines ([`shape`] module)
//! - **Scenes**: A generated composition and the bounded history ([`scene`] module)
//! - **Canvas**: Pixel dimensions and aspect-ratio presets ([`canvas`] module)
//! - **Branding**: Logo and text overlay specifications ([`branding`] module)
//! - **Text**: Word wrapping and line placement for text overlays ([`text`] module)

pub mod branding;
pub mod canvas;
pub mod color;
pub mod geometry;
pub mod scene;
pub mod shape;
pub mod text;
