use chronarc_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Corner of the parent a child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Places its child at its natural size in one corner of the parent rect,
/// `margin` pixels from both edges. Fills the parent itself.
///
/// ```rust,ignore
/// Anchored::top_right(panel, 12.0)
/// ```
pub struct Anchored {
    child: Element,
    corner: Corner,
    margin: f32,
}

impl Anchored {
    pub fn new(child: impl Into<Element>, corner: Corner, margin: f32) -> Self {
        Self { child: child.into(), corner, margin }
    }

    pub fn top_right(child: impl Into<Element>, margin: f32) -> Self {
        Self::new(child, Corner::TopRight, margin)
    }

    /// Rect of the child inside `parent`.
    pub fn child_rect(&self, parent: Rect, ctx: &LayoutCtx) -> Rect {
        let m = self.margin;
        let avail = Vec2::new(
            (parent.size.x - m * 2.0).max(0.0),
            (parent.size.y - m * 2.0).max(0.0),
        );
        let size = self.child.measure(Constraints::loose(avail), ctx);

        let left = parent.origin.x + m;
        let top = parent.origin.y + m;
        let right = parent.origin.x + parent.size.x - m - size.x;
        let bottom = parent.origin.y + parent.size.y - m - size.y;

        let (x, y) = match self.corner {
            Corner::TopLeft => (left, top),
            Corner::TopRight => (right, top),
            Corner::BottomLeft => (left, bottom),
            Corner::BottomRight => (right, bottom),
        };
        Rect::new(x, y, size.x, size.y)
    }
}

impl Widget for Anchored {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.max
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        let r = self.child_rect(rect, &ctx);
        self.child.paint(painter, r);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let r = self.child_rect(rect, ctx);
        self.child.on_event(event, r, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronarc_engine::text::FontSystem;

    struct Fixed(Vec2);

    impl Widget for Fixed {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.0)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    fn place(corner: Corner) -> Rect {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        Anchored::new(Fixed(Vec2::new(200.0, 100.0)), corner, 10.0)
            .child_rect(Rect::new(0.0, 0.0, 800.0, 600.0), &ctx)
    }

    #[test]
    fn top_right_corner() {
        assert_eq!(place(Corner::TopRight), Rect::new(590.0, 10.0, 200.0, 100.0));
    }

    #[test]
    fn bottom_left_corner() {
        assert_eq!(place(Corner::BottomLeft), Rect::new(10.0, 490.0, 200.0, 100.0));
    }

    #[test]
    fn child_shrinks_to_small_parent() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let r = Anchored::top_right(Fixed(Vec2::new(200.0, 100.0)), 10.0)
            .child_rect(Rect::new(0.0, 0.0, 120.0, 60.0), &ctx);
        assert_eq!(r, Rect::new(10.0, 10.0, 100.0, 40.0));
    }
}
