//! Time subsystem.
//!
//! Frame timing for the render loop: call `FrameClock::tick()` once per
//! presented frame to obtain the clamped delta in seconds.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
