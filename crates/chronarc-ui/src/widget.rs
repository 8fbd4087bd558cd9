use chronarc_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The core trait every UI component implements.
///
/// ```rust,ignore
/// use chronarc_ui::prelude::*;
///
/// pub struct Swatch { color: Color, size: f32 }
///
/// impl Widget for Swatch {
///     fn measure(&self, _constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
///         Vec2::new(self.size, self.size)
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         painter.fill_rounded_rect(rect, 3.0, self.color, None);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Size this widget wants given the available space.
    ///
    /// Must be deterministic: parents may call `measure` several times per frame.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draw into `painter` within `rect`, the space allocated by the parent.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Route an input event. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        EventResult::Ignored
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget, the universal child type for containers.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.0.on_event(event, rect, ctx)
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
