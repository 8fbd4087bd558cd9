use chronarc_engine::coords::{CornerRadii, Rect, Vec2};
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Border;
use chronarc_engine::scene::{DrawList, ZIndex};
use chronarc_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and hands out increasing z-indices, so later
/// calls paint above earlier ones within each shape kind. Also exposes the
/// pointer state so widgets can express hover / pressed visuals directly.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) font_system: &'a FontSystem,
    z: i32,
    /// Current pointer position in logical pixels.
    pub mouse_pos: Vec2,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        font_system: &'a FontSystem,
        mouse_pos: Vec2,
        mouse_pressed: bool,
    ) -> Self {
        Self { draw_list, font_system, z: 0, mouse_pos, mouse_pressed }
    }

    /// Starts z-index allocation at `base` instead of zero.
    #[must_use]
    pub fn with_z_base(mut self, base: i32) -> Self {
        self.z = base;
        self
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    // ── text ──────────────────────────────────────────────────────────────

    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.font_system.measure_text(text, font, size)
    }

    /// Returns a [`LayoutCtx`] borrowing this painter's font system.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.font_system }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.fill_rect(z, rect, color);
    }

    /// Rounded rectangle with optional border. `radius = 0.0` gives sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, CornerRadii::all(radius), color, border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, color, border);
    }

    /// Single line of text with its line box top-left at `origin`.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
