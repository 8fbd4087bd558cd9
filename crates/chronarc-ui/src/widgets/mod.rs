//! Built-in widgets used by overlay panels.

pub mod anchored;
pub mod checkbox;
pub mod container;
pub mod flex;
pub mod radio;
pub mod slider;
pub mod text;
