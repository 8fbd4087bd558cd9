use chronarc_engine::coords::{Rect, Vec2};
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Border;
use chronarc_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A checkbox with an optional text label. Clicking anywhere on the row toggles it.
///
/// ```rust,ignore
/// Checkbox::new()
///     .label("animate")
///     .font(Some(body))
///     .checked(true)
///     .on_change(|v| println!("animate: {v}"))
/// ```
pub struct Checkbox {
    checked: bool,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    label_color: Color,
    box_size: f32,
    bg: Color,
    checked_color: Color,
    border_color: Color,
    gap: f32,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            checked: false,
            label: String::new(),
            font: None,
            font_size: 13.0,
            label_color: Color::from_straight(0.85, 0.85, 0.9, 1.0),
            box_size: 16.0,
            bg: Color::from_straight(0.1, 0.12, 0.18, 1.0),
            checked_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            border_color: Color::from_straight(0.35, 0.45, 0.6, 1.0),
            gap: 8.0,
            on_change: None,
        }
    }

    pub fn checked(mut self, v: bool) -> Self { self.checked = v; self }
    pub fn label(mut self, v: impl Into<String>) -> Self { self.label = v.into(); self }
    pub fn font(mut self, v: Option<FontId>) -> Self { self.font = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }
    pub fn label_color(mut self, v: Color) -> Self { self.label_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    fn label_size(&self, ctx: &LayoutCtx) -> Vec2 {
        match self.font {
            Some(f) if !self.label.is_empty() => ctx.fonts.measure_text(&self.label, f, self.font_size),
            _ => Vec2::zero(),
        }
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Checkbox {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let text = self.label_size(ctx);
        let w = if text.x > 0.0 { self.box_size + self.gap + text.x } else { self.box_size };
        let h = self.box_size.max(text.y);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let hovered = painter.is_hovered(rect);
        let box_y = rect.origin.y + (rect.size.y - self.box_size) * 0.5;
        let box_rect = Rect::new(rect.origin.x, box_y, self.box_size, self.box_size);

        let border = if hovered {
            Color::from_straight(0.6, 0.7, 0.9, 1.0)
        } else {
            self.border_color
        };
        let fill = if self.checked { self.checked_color } else { self.bg };
        painter.fill_rounded_rect(box_rect, 3.0, fill, Some(Border::new(1.5, border)));

        // Checkmark: inner square.
        if self.checked {
            let m = self.box_size * 0.28;
            let mark = Rect::new(
                box_rect.origin.x + m,
                box_rect.origin.y + m,
                self.box_size - m * 2.0,
                self.box_size - m * 2.0,
            );
            painter.fill_rounded_rect(mark, 1.5, Color::from_straight(1.0, 1.0, 1.0, 0.95), None);
        }

        if let Some(font) = self.font {
            if !self.label.is_empty() {
                let x = rect.origin.x + self.box_size + self.gap;
                let y = rect.origin.y + (rect.size.y - self.font_size * 1.2) * 0.5;
                painter.text(self.label.as_str(), font, self.font_size, self.label_color, Vec2::new(x, y));
            }
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        if let UiEvent::Click { pos } = event {
            if rect.contains(*pos) {
                self.checked = !self.checked;
                if let Some(f) = &mut self.on_change {
                    f(self.checked);
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use chronarc_engine::text::FontSystem;

    fn click(cb: &mut Checkbox, x: f32, y: f32) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        cb.on_event(&UiEvent::Click { pos: Vec2::new(x, y) }, Rect::new(0.0, 0.0, 16.0, 16.0), &ctx)
    }

    #[test]
    fn click_inside_toggles_and_notifies() {
        let last = Rc::new(Cell::new(None));
        let l2 = last.clone();
        let mut cb = Checkbox::new().checked(true).on_change(move |v| l2.set(Some(v)));
        assert!(click(&mut cb, 8.0, 8.0).is_consumed());
        assert!(!cb.is_checked());
        assert_eq!(last.get(), Some(false));
    }

    #[test]
    fn click_outside_is_ignored() {
        let mut cb = Checkbox::new();
        assert_eq!(click(&mut cb, 40.0, 8.0), EventResult::Ignored);
        assert!(!cb.is_checked());
    }

    #[test]
    fn measure_without_font_is_box_only() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let size = Checkbox::new().label("animate").measure(Constraints::unbounded(), &ctx);
        assert_eq!(size, Vec2::new(16.0, 16.0));
    }
}
