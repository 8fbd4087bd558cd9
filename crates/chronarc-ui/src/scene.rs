use chronarc_engine::coords::{Rect, Vec2};
use chronarc_engine::scene::DrawList;
use chronarc_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// First z-index handed to overlay widgets, above anything the host records.
pub const OVERLAY_Z: i32 = 1_000;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of pointer state for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    /// Cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button goes down.
    pub mouse_went_down: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Owns the fonts and the per-frame draw list shared by the host and the overlay.
///
/// The host clears the list with [`begin_frame`](Self::begin_frame), records
/// its own shapes, then calls [`frame`](Self::frame) to lay out, paint and
/// route events through an overlay tree.
pub struct UiScene {
    /// Public so the renderer can split-borrow it alongside `draw_list`.
    pub font_system: FontSystem,
    pub draw_list: DrawList,
    drag_start: Option<Vec2>,
}

impl UiScene {
    pub fn new() -> Self {
        Self { font_system: FontSystem::new(), draw_list: DrawList::new(), drag_start: None }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Clears the draw list for a new frame.
    pub fn begin_frame(&mut self) {
        self.draw_list.clear();
    }

    /// Lays out, paints and routes this frame's pointer events through `root`.
    ///
    /// `root` occupies the whole viewport; its draw commands are appended to
    /// the draw list above `OVERLAY_Z`. Pass `None` to skip the widget pass
    /// while still tracking drag state.
    pub fn frame(&mut self, root: Option<Element>, viewport: Vec2, input: &UiInput) {
        let events = self.pointer_events(input);
        let Some(mut root) = root else { return };

        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        let ctx = LayoutCtx { fonts: &self.font_system };

        // Pre-pass so children compute their natural sizes.
        let _ = root.measure(Constraints::loose(viewport), &ctx);

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter =
                Painter::new(&mut self.draw_list, &self.font_system, input.mouse_pos, input.mouse_pressed)
                    .with_z_base(OVERLAY_Z);
            root.paint(&mut painter, rect);
        }

        // ── events ────────────────────────────────────────────────────────
        let ctx = LayoutCtx { fonts: &self.font_system };
        for event in &events {
            root.on_event(event, rect, &ctx);
        }
    }

    /// Translates the pointer snapshot into widget events, updating drag state.
    fn pointer_events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        let pos = input.mouse_pos;
        let mut events = vec![UiEvent::Hover { pos }];

        if input.mouse_went_down {
            self.drag_start = Some(pos);
        }

        match self.drag_start {
            Some(start) if input.mouse_pressed => {
                events.push(UiEvent::Drag { pos, start });
            }
            Some(start) if input.mouse_clicked => {
                events.push(UiEvent::DragEnd { pos, start });
                events.push(UiEvent::Click { pos });
                self.drag_start = None;
            }
            Some(_) => self.drag_start = None,
            None if input.mouse_clicked => events.push(UiEvent::Click { pos }),
            None => {}
        }

        events
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::EventResult;
    use crate::painter::Painter;
    use crate::widget::Widget;
    use chronarc_engine::paint::Color;
    use chronarc_engine::scene::ZIndex;

    /// Records every event it sees and paints one rect.
    struct Probe(Rc<RefCell<Vec<UiEvent>>>);

    impl Widget for Probe {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.max
        }
        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.fill_rect(rect, Color::WHITE);
        }
        fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx) -> EventResult {
            self.0.borrow_mut().push(event.clone());
            EventResult::Ignored
        }
    }

    fn input(x: f32, pressed: bool, down: bool, clicked: bool) -> UiInput {
        UiInput {
            mouse_pos: Vec2::new(x, 5.0),
            mouse_pressed: pressed,
            mouse_went_down: down,
            mouse_clicked: clicked,
        }
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn frame_appends_above_host_content() {
        let mut scene = UiScene::new();
        scene.begin_frame();
        scene.draw_list.fill_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);

        let log = Rc::new(RefCell::new(Vec::new()));
        scene.frame(Some(Probe(log).into()), Vec2::new(100.0, 100.0), &UiInput::default());

        let items = scene.draw_list.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].key.z, ZIndex::new(OVERLAY_Z));
    }

    #[test]
    fn begin_frame_clears() {
        let mut scene = UiScene::new();
        scene.draw_list.fill_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        scene.begin_frame();
        assert!(scene.draw_list.is_empty());
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn hover_every_frame() {
        let mut scene = UiScene::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scene.frame(Some(Probe(log.clone()).into()), Vec2::new(100.0, 100.0), &input(3.0, false, false, false));
        assert_eq!(*log.borrow(), vec![UiEvent::Hover { pos: Vec2::new(3.0, 5.0) }]);
    }

    #[test]
    fn press_drag_release_sequence() {
        let mut scene = UiScene::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let vp = Vec2::new(100.0, 100.0);

        scene.frame(Some(Probe(log.clone()).into()), vp, &input(10.0, true, true, false));
        scene.frame(Some(Probe(log.clone()).into()), vp, &input(30.0, true, false, false));
        scene.frame(Some(Probe(log.clone()).into()), vp, &input(40.0, false, false, true));

        let start = Vec2::new(10.0, 5.0);
        let seen: Vec<UiEvent> =
            log.borrow().iter().filter(|e| !matches!(e, UiEvent::Hover { .. })).cloned().collect();
        assert_eq!(
            seen,
            vec![
                UiEvent::Drag { pos: start, start },
                UiEvent::Drag { pos: Vec2::new(30.0, 5.0), start },
                UiEvent::DragEnd { pos: Vec2::new(40.0, 5.0), start },
                UiEvent::Click { pos: Vec2::new(40.0, 5.0) },
            ]
        );
    }

    #[test]
    fn drag_tracked_without_overlay() {
        let mut scene = UiScene::new();
        let vp = Vec2::new(100.0, 100.0);
        scene.frame(None, vp, &input(10.0, true, true, false));

        let log = Rc::new(RefCell::new(Vec::new()));
        scene.frame(Some(Probe(log.clone()).into()), vp, &input(20.0, false, false, true));
        assert!(log.borrow().contains(&UiEvent::DragEnd {
            pos: Vec2::new(20.0, 5.0),
            start: Vec2::new(10.0, 5.0),
        }));
    }
}
