use chronarc_engine::coords::{Rect, Vec2};
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Single-child widget adding padding, background, border and corner rounding.
///
/// An empty `Container` draws nothing.
///
/// ```rust,ignore
/// Container::new()
///     .padding_all(12.0)
///     .background(Color::from_straight(0.05, 0.05, 0.08, 0.85))
///     .corner_radius(8.0)
///     .child(column)
/// ```
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Color>,
    border: Option<Border>,
    corner_radius: f32,
    width: Option<f32>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            border: None,
            corner_radius: 0.0,
            width: None,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    /// Fixes the outer width; the child gets exactly the inner width.
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w.max(0.0));
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let mut inner = constraints.shrink(self.padding);
        if let Some(w) = self.width {
            let inner_w = (w - self.padding.h()).clamp(0.0, inner.max.x);
            inner.min.x = inner_w;
            inner.max.x = inner_w;
        }

        let child_size = self
            .child
            .as_ref()
            .map(|c| c.measure(inner, ctx))
            .unwrap_or(Vec2::zero());

        let w = self.width.unwrap_or(child_size.x + self.padding.h());
        let h = child_size.y + self.padding.v();
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.is_some() || self.border.is_some() {
            let fill = self.background.unwrap_or(Color::transparent());
            painter.fill_rounded_rect(rect, self.corner_radius, fill, self.border);
        }

        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match &mut self.child {
            Some(child) => child.on_event(event, inset_rect(rect, self.padding), ctx),
            None => EventResult::Ignored,
        }
    }
}
