use chronarc_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full width (default).
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

// ── Column ────────────────────────────────────────────────────────────────

/// Vertical container. Children are stacked top to bottom.
///
/// ```rust,ignore
/// Column::new()
///     .spacing(6.0)
///     .child(Text::new("line width", font, 13.0, grey))
///     .child(Slider::new().min(1.0).max(10.0))
/// ```
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    // ── layout helpers ────────────────────────────────────────────────────

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                // Only force the width when it is actually bounded.
                let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
                Constraints { min: Vec2::new(min_x, 0.0), max: Vec2::new(inner_w, f32::INFINITY) }
            }
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    /// Rects of every child inside `rect`, top to bottom.
    fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        let mut rects = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let s = child.measure(child_c, ctx);
            let x = match self.cross_align {
                Align::Stretch | Align::Start => inner.origin.x,
                Align::Center => inner.origin.x + (inner.size.x - s.x) * 0.5,
                Align::End => inner.origin.x + (inner.size.x - s.x),
            };
            rects.push(Rect::new(x, y, s.x, s.y));
            y += s.y + self.spacing;
        }
        rects
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w);

        let mut total_h = self.padding.v();
        let mut max_child_w: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            total_h += s.y;
            if i + 1 < self.children.len() {
                total_h += self.spacing;
            }
            max_child_w = max_child_w.max(s.x);
        }

        let content_w = max_child_w + self.padding.h();
        let w = match self.cross_align {
            Align::Stretch if constraints.max.x.is_finite() => constraints.max.x.max(content_w),
            _ => content_w,
        };
        constraints.constrain(Vec2::new(w, total_h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.child_rects(rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronarc_engine::text::FontSystem;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Fixed-size child that records the rect it received events with.
    struct Probe {
        size: Vec2,
        seen: Rc<RefCell<Vec<Rect>>>,
    }

    impl Widget for Probe {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.size)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
        fn on_event(&mut self, _event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
            self.seen.borrow_mut().push(rect);
            EventResult::Ignored
        }
    }

    fn probe(w: f32, h: f32, seen: &Rc<RefCell<Vec<Rect>>>) -> Probe {
        Probe { size: Vec2::new(w, h), seen: seen.clone() }
    }

    // ── measure ───────────────────────────────────────────────────────────

    #[test]
    fn measure_sums_heights_and_spacing() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let col = Column::new()
            .spacing(5.0)
            .cross_align(Align::Start)
            .child(probe(40.0, 10.0, &seen))
            .child(probe(60.0, 20.0, &seen));
        let size = col.measure(Constraints::loose(Vec2::new(300.0, 300.0)), &ctx);
        assert_eq!(size, Vec2::new(60.0, 35.0));
    }

    #[test]
    fn stretch_fills_bounded_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let col = Column::new().child(probe(40.0, 10.0, &seen));
        let size = col.measure(Constraints::loose(Vec2::new(300.0, 300.0)), &ctx);
        assert_eq!(size.x, 300.0);
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn events_reach_children_at_stacked_rects() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut col = Column::new()
            .spacing(4.0)
            .padding(Edges::all(2.0))
            .child(probe(50.0, 10.0, &seen))
            .child(probe(50.0, 10.0, &seen));

        col.on_event(&UiEvent::Hover { pos: Vec2::zero() }, Rect::new(0.0, 0.0, 100.0, 100.0), &ctx);

        assert_eq!(
            *seen.borrow(),
            vec![Rect::new(2.0, 2.0, 96.0, 10.0), Rect::new(2.0, 16.0, 96.0, 10.0)]
        );
    }
}
