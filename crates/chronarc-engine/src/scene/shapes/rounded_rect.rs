use crate::coords::{CornerRadii, Rect};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rounded rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub color: Color,
    pub border: Option<Border>,
}

impl RoundedRectCmd {
    #[inline]
    pub fn new(rect: Rect, radii: CornerRadii, color: Color, border: Option<Border>) -> Self {
        Self { rect, radii, color, border }
    }
}

impl DrawList {
    /// Records a rounded rectangle draw command.
    #[inline]
    pub fn push_rounded_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radii: CornerRadii,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd::new(rect, radii, color, border)));
    }

    /// Records a solid rounded rectangle with uniform corner radius.
    #[inline]
    pub fn fill_rounded_rect(&mut self, z: ZIndex, rect: Rect, radius: f32, color: Color) {
        self.push_rounded_rect(z, rect, CornerRadii::all(radius), color, None);
    }

    /// Records a solid axis-aligned rectangle (square corners).
    #[inline]
    pub fn fill_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_rounded_rect(z, rect, CornerRadii::all(0.0), color, None);
    }
}
