//! Paint model shared between UI, the clock and renderers.
//!
//! Colors are linear premultiplied RGBA. Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
