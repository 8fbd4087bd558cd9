//! Animated analog clock on top of `chronarc-engine` and `chronarc-ui`.
//!
//! Ten rotating rings, twelve gradation ticks, a digital readout and three
//! hands, with an optional debug panel for live tweaking.

pub mod app;
pub mod arc;
pub mod config;
pub mod debug;
pub mod geometry;
pub mod scenario;
pub mod time;
