//! Chronarc engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the UI layer and the clock:
//! window loop, frame clock, input, the per-frame draw list and the shape
//! renderers that consume it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
