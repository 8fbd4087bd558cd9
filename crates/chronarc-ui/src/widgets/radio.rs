use chronarc_engine::coords::{Rect, Vec2};
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Border;
use chronarc_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// An option within a [`RadioGroup`].
#[derive(Debug, Clone, PartialEq)]
pub struct RadioOption {
    /// Display label.
    pub label: String,
    /// Value reported to `on_change`.
    pub value: String,
}

impl RadioOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A vertical list of mutually exclusive options.
///
/// ```rust,ignore
/// RadioGroup::new()
///     .option("UTC", "UTC")
///     .option("Paris", "Europe/Paris")
///     .selected("UTC")
///     .font(Some(body))
///     .on_change(|tz| println!("timezone: {tz}"))
/// ```
pub struct RadioGroup {
    options: Vec<RadioOption>,
    selected: Option<String>,
    font: Option<FontId>,
    font_size: f32,
    label_color: Color,
    selected_color: Color,
    border_color: Color,
    dot_radius: f32,
    gap: f32,
    item_gap: f32,
    on_change: Option<Box<dyn FnMut(String)>>,
}

impl RadioGroup {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            font: None,
            font_size: 13.0,
            label_color: Color::from_straight(0.85, 0.85, 0.9, 1.0),
            selected_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            border_color: Color::from_straight(0.35, 0.45, 0.6, 1.0),
            dot_radius: 7.0,
            gap: 8.0,
            item_gap: 6.0,
            on_change: None,
        }
    }

    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(RadioOption::new(label, value));
        self
    }

    pub fn options(mut self, opts: impl IntoIterator<Item = RadioOption>) -> Self {
        self.options.extend(opts);
        self
    }

    pub fn selected(mut self, value: impl Into<String>) -> Self {
        self.selected = Some(value.into());
        self
    }

    pub fn font(mut self, v: Option<FontId>) -> Self { self.font = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }
    pub fn label_color(mut self, v: Color) -> Self { self.label_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(String) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn row_height(&self) -> f32 {
        (self.dot_radius * 2.0).max(self.font_size * 1.2)
    }

    fn total_height(&self) -> f32 {
        let n = self.options.len() as f32;
        if n == 0.0 {
            return 0.0;
        }
        n * self.row_height() + (n - 1.0) * self.item_gap
    }
}

impl Default for RadioGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for RadioGroup {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let max_label_w = match self.font {
            Some(f) => self
                .options
                .iter()
                .map(|opt| ctx.fonts.measure_text(&opt.label, f, self.font_size).x)
                .fold(0.0f32, f32::max),
            None => 0.0,
        };
        let w = self.dot_radius * 2.0 + self.gap + max_label_w;
        constraints.constrain(Vec2::new(w, self.total_height()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let row_h = self.row_height();
        let ring_cx = rect.origin.x + self.dot_radius;

        let mut y = rect.origin.y;
        for opt in &self.options {
            let is_selected = self.selected.as_deref() == Some(opt.value.as_str());
            let cy = y + row_h * 0.5;
            let ring = if is_selected { self.selected_color } else { self.border_color };

            painter.fill_circle(
                Vec2::new(ring_cx, cy),
                self.dot_radius,
                Color::from_straight(0.1, 0.12, 0.18, 1.0),
                Some(Border::new(1.5, ring)),
            );
            if is_selected {
                painter.fill_circle(Vec2::new(ring_cx, cy), self.dot_radius * 0.45, self.selected_color, None);
            }

            if let Some(font) = self.font {
                let x = rect.origin.x + self.dot_radius * 2.0 + self.gap;
                let ty = cy - self.font_size * 0.6;
                painter.text(opt.label.as_str(), font, self.font_size, self.label_color, Vec2::new(x, ty));
            }

            y += row_h + self.item_gap;
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        let UiEvent::Click { pos } = event else {
            return EventResult::Ignored;
        };
        if !rect.contains(*pos) {
            return EventResult::Ignored;
        }

        let row_h = self.row_height();
        let mut y = rect.origin.y;
        for opt in &self.options {
            let row = Rect::new(rect.origin.x, y, rect.size.x, row_h);
            if row.contains(*pos) {
                let value = opt.value.clone();
                if self.selected.as_deref() != Some(value.as_str()) {
                    self.selected = Some(value.clone());
                    if let Some(f) = &mut self.on_change {
                        f(value);
                    }
                }
                return EventResult::Consumed;
            }
            y += row_h + self.item_gap;
        }
        EventResult::Ignored
    }
}
