//! Font loading and text measurement.
//!
//! Rasterization lives in `render::shapes::text`; this module only owns the
//! parsed fonts and the layout queries the UI and the clock need.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
