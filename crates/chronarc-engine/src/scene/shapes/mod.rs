pub(crate) mod arc;
pub(crate) mod circle;
pub(crate) mod line;
pub(crate) mod rounded_rect;
pub(crate) mod text;

pub use arc::{canvas_sweep, ArcCmd};
pub use circle::CircleCmd;
pub use line::LineCmd;
pub use rounded_rect::RoundedRectCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke drawn along the outer edge of a filled shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Stroke style for open paths (arcs, lines). Caps are always round.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    /// Whether this stroke would produce any visible coverage.
    #[inline]
    pub fn is_visible(self) -> bool {
        self.width > 0.0 && self.width.is_finite() && self.color.a > 0.0
    }
}
