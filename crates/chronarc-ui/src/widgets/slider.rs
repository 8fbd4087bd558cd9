use chronarc_engine::coords::{Rect, Vec2};
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Border;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A horizontal slider selecting a value in `[min, max]`.
///
/// Pressing anywhere on the track and dragging moves the thumb. With a
/// `step`, values snap to `min + k * step`.
///
/// ```rust,ignore
/// Slider::new()
///     .min(-2.0).max(2.0).step(0.25).value(1.0)
///     .on_change(|v| println!("speed: {v}"))
/// ```
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    step: Option<f32>,
    track_height: f32,
    thumb_radius: f32,
    track_color: Color,
    fill_color: Color,
    thumb_color: Color,
    thumb_border_color: Color,
    /// Called on every drag move and once on release.
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            step: None,
            track_height: 4.0,
            thumb_radius: 7.0,
            track_color: Color::from_straight(0.2, 0.22, 0.28, 1.0),
            fill_color: Color::from_straight(0.2, 0.6, 1.0, 1.0),
            thumb_color: Color::WHITE,
            thumb_border_color: Color::from_straight(0.4, 0.6, 0.9, 1.0),
            on_change: None,
        }
    }

    /// Sets the current value; clamped when read against the final range.
    pub fn value(mut self, v: f32) -> Self { self.value = v; self }
    pub fn min(mut self, v: f32) -> Self { self.min = v; self }
    pub fn max(mut self, v: f32) -> Self { self.max = v; self }
    /// Snap increment; non-positive or non-finite steps are ignored.
    pub fn step(mut self, v: f32) -> Self {
        self.step = (v.is_finite() && v > 0.0).then_some(v);
        self
    }
    pub fn fill_color(mut self, v: Color) -> Self { self.fill_color = v; self }
    pub fn thumb_radius(mut self, v: f32) -> Self { self.thumb_radius = v; self }
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Current value, clamped into range and snapped to the step.
    pub fn current(&self) -> f32 {
        self.snap(self.value)
    }

    fn snap(&self, v: f32) -> f32 {
        let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        let v = if v.is_finite() { v.clamp(lo, hi) } else { lo };
        match self.step {
            Some(step) => (lo + ((v - lo) / step).round() * step).clamp(lo, hi),
            None => v,
        }
    }

    /// Normalized position in [0, 1].
    fn normalized(&self) -> f32 {
        if (self.max - self.min).abs() < f32::EPSILON {
            0.0
        } else {
            ((self.current() - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        }
    }

    /// Track area inside `rect`, inset so the thumb never overhangs.
    fn track(&self, rect: Rect) -> Rect {
        let inset = self.thumb_radius.min(rect.size.x * 0.5);
        Rect::new(
            rect.origin.x + inset,
            rect.origin.y + (rect.size.y - self.track_height) * 0.5,
            (rect.size.x - inset * 2.0).max(0.0),
            self.track_height,
        )
    }

    fn value_at(&self, rect: Rect, x: f32) -> f32 {
        let track = self.track(rect);
        let t = if track.size.x > 0.0 {
            ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.snap(self.min + t * (self.max - self.min))
    }

    fn set(&mut self, v: f32) {
        let changed = v != self.value;
        self.value = v;
        if changed {
            if let Some(f) = &mut self.on_change {
                f(v);
            }
        }
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let h = self.thumb_radius * 2.0;
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { 160.0 };
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let track = self.track(rect);
        let radius = self.track_height * 0.5;
        painter.fill_rounded_rect(track, radius, self.track_color, None);

        let thumb_x = track.origin.x + self.normalized() * track.size.x;
        let fill_w = thumb_x - track.origin.x;
        if fill_w > 0.0 {
            let fill = Rect::new(track.origin.x, track.origin.y, fill_w, track.size.y);
            painter.fill_rounded_rect(fill, radius, self.fill_color, None);
        }

        let r = if painter.is_pressed(rect) {
            self.thumb_radius + 2.0
        } else if painter.is_hovered(rect) {
            self.thumb_radius + 1.0
        } else {
            self.thumb_radius
        };
        let cy = rect.origin.y + rect.size.y * 0.5;
        painter.fill_circle(
            Vec2::new(thumb_x, cy),
            r,
            self.thumb_color,
            Some(Border::new(2.0, self.thumb_border_color)),
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match event {
            // Guard on `start` so only the slider that owns the press reacts.
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start } if rect.contains(*start) => {
                let v = self.value_at(rect, pos.x);
                self.set(v);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use chronarc_engine::scene::{DrawCmd, DrawList};
    use chronarc_engine::text::FontSystem;

    // Thumb radius 0 so the track spans the whole rect.
    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 14.0)
    }

    fn drag(slider: &mut Slider, x: f32) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let ev = UiEvent::Drag { pos: Vec2::new(x, 7.0), start: Vec2::new(1.0, 7.0) };
        slider.on_event(&ev, rect(), &ctx)
    }

    // ── value mapping ─────────────────────────────────────────────────────

    #[test]
    fn drag_maps_position_to_range() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s2 = seen.clone();
        let mut s = Slider::new().min(1.0).max(10.0).thumb_radius(0.0).on_change(move |v| s2.borrow_mut().push(v));
        assert!(drag(&mut s, 50.0).is_consumed());
        assert!((s.current() - 5.5).abs() < 1e-4);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn step_snaps_value() {
        let mut s = Slider::new().min(-2.0).max(2.0).step(0.25).thumb_radius(0.0);
        drag(&mut s, 53.0); // raw 0.12
        assert_eq!(s.current(), 0.0);
        drag(&mut s, 57.0); // raw 0.28
        assert_eq!(s.current(), 0.25);
    }

    #[test]
    fn drag_past_end_clamps() {
        let mut s = Slider::new().min(0.0).max(255.0).thumb_radius(0.0);
        drag(&mut s, 500.0);
        assert_eq!(s.current(), 255.0);
        drag(&mut s, -40.0);
        assert_eq!(s.current(), 0.0);
    }

    #[test]
    fn initial_value_clamped() {
        assert_eq!(Slider::new().min(1.0).max(10.0).value(42.0).current(), 10.0);
        assert_eq!(Slider::new().min(1.0).max(10.0).value(f32::NAN).current(), 1.0);
    }

    // ── paint ─────────────────────────────────────────────────────────────

    fn thumb_radius_when(mouse: Vec2, pressed: bool) -> f32 {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, mouse, pressed);
            Slider::new().paint(&mut p, rect());
        }
        list.items()
            .iter()
            .find_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => Some(c.radius),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn thumb_grows_on_hover_and_press() {
        let inside = Vec2::new(50.0, 7.0);
        assert_eq!(thumb_radius_when(Vec2::new(500.0, 7.0), false), 7.0);
        assert_eq!(thumb_radius_when(inside, false), 8.0);
        assert_eq!(thumb_radius_when(inside, true), 9.0);
    }

    // ── ownership ─────────────────────────────────────────────────────────

    #[test]
    fn drag_started_elsewhere_is_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut s = Slider::new().thumb_radius(0.0);
        let ev = UiEvent::Drag { pos: Vec2::new(50.0, 7.0), start: Vec2::new(50.0, 200.0) };
        assert_eq!(s.on_event(&ev, rect(), &ctx), EventResult::Ignored);
        assert_eq!(s.current(), 0.0);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let c2 = count.clone();
        let mut s = Slider::new().thumb_radius(0.0).on_change(move |_| *c2.borrow_mut() += 1);
        drag(&mut s, 0.0);
        assert_eq!(*count.borrow(), 0);
    }
}
