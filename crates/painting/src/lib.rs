//! Painting primitives for shared ray-cast drawing
//!
//! This crate provides the paint-side building blocks:
//! - [`types::Rgba`] - Pen color, layout-compatible with surface pixels
//! - [`surface`] - CPU f32 RGBA surface
//! - [`canvas`] - Drawable canvas and the [`canvas::DrawableSurface`] capability
//! - [`raycast`] - Triangle mesh collider with UV lookup at the hit

pub mod canvas;
pub mod constants;
pub mod raycast;
pub mod surface;
pub mod types;

pub use canvas::*;
pub use constants::*;
pub use raycast::*;
pub use surface::*;
pub use types::*;
