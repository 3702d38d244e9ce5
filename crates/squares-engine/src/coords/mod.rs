//! Coordinate and color types shared by the engine and the demo scene.
//!
//! Canonical scene space:
//! - Pixels of the fixed viewport
//! - Origin bottom-left
//! - +X right, +Y up
//!
//! The vertex shader maps scene space to clip space with the projection
//! returned by [`Viewport::ortho`].

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
