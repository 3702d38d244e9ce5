//! Squares engine crate.
//!
//! Owns the platform + GPU runtime pieces and the thin rendering wrappers
//! (textures, shader programs, buffers, overlay) used by the app crate.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod overlay;
