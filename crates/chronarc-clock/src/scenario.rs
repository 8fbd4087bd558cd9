//! The clock scene: rotating rings, gradation, readout and hands.

use chrono::NaiveTime;
use chrono_tz::Tz;
use rand::Rng;

use chronarc_engine::coords::Vec2;
use chronarc_engine::paint::Color;
use chronarc_engine::scene::shapes::Stroke;
use chronarc_engine::scene::{DrawList, ZIndex};
use chronarc_engine::text::{FontId, FontSystem};

use crate::arc::RotatingArc;
use crate::geometry::{Arrow, Hand, Layout, ARC_COUNT};
use crate::time::{now_naive, with_field, ClockTime, TimeError, TimeField};

/// Layer of every clock shape. UI overlays sit far above it.
pub const SCENE_Z: ZIndex = ZIndex(0);
/// Readout font size in logical pixels.
pub const READOUT_SIZE: f32 = 30.0;
/// Baseline origin of the readout.
pub const READOUT_BASELINE: Vec2 = Vec2::new(10.0, 50.0);

/// User-tweakable drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub line_width: f32,
    /// Ring rotation in radians per second.
    pub speed: f32,
    pub color: Color,
    pub animate: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self { line_width: 2.0, speed: 1.0, color: Color::WHITE, animate: true }
    }
}

impl SceneParams {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.line_width, self.color)
    }
}

pub struct Scenario {
    layout: Layout,
    arcs: Vec<RotatingArc>,
    pub params: SceneParams,
    time_override: Option<NaiveTime>,
    font: Option<FontId>,
}

impl Scenario {
    /// Builds the ring set for a `width` x `height` surface.
    ///
    /// The innermost and outermost rings are closed; the others get random spans.
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let layout = Layout::new(width, height);
        let arcs = (0..ARC_COUNT)
            .map(|i| {
                let radius = layout.ring_radius(i);
                if i == 0 || i == ARC_COUNT - 1 {
                    RotatingArc::full(layout.center, radius)
                } else {
                    RotatingArc::random(layout.center, radius, rng)
                }
            })
            .collect();

        Self {
            layout,
            arcs,
            params: SceneParams::default(),
            time_override: None,
            font: None,
        }
    }

    /// Font for the readout. Without one the readout is skipped.
    pub fn with_font(mut self, font: Option<FontId>) -> Self {
        self.font = font;
        self
    }

    pub fn with_params(mut self, params: SceneParams) -> Self {
        self.params = params;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn arcs(&self) -> &[RotatingArc] {
        &self.arcs
    }

    /// Recenters and rescales every ring. Spans and phases are kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout = Layout::new(width, height);
        for (i, arc) in self.arcs.iter_mut().enumerate() {
            arc.center = self.layout.center;
            arc.radius = self.layout.ring_radius(i);
        }
    }

    // ── time ──────────────────────────────────────────────────────────────

    /// Time shown this frame: the frozen override, or the wall clock in `tz`.
    pub fn clock_time(&self, tz: Tz) -> ClockTime {
        match self.time_override {
            Some(t) => ClockTime::from(t),
            None => ClockTime::now_in(tz),
        }
    }

    pub fn time_override(&self) -> Option<NaiveTime> {
        self.time_override
    }

    /// Replaces one field of the override, seeding it from the wall clock in `tz` first.
    pub fn set_time_field(&mut self, field: TimeField, value: u32, tz: Tz) -> Result<(), TimeError> {
        let base = self.time_override.unwrap_or_else(|| now_naive(tz));
        match with_field(base, field, value) {
            Ok(t) => {
                self.time_override = Some(t);
                Ok(())
            }
            Err(e) => {
                log::warn!("time override rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn set_hour(&mut self, hour: u32, tz: Tz) -> Result<(), TimeError> {
        self.set_time_field(TimeField::Hour, hour, tz)
    }

    pub fn set_minute(&mut self, minute: u32, tz: Tz) -> Result<(), TimeError> {
        self.set_time_field(TimeField::Minute, minute, tz)
    }

    pub fn set_second(&mut self, second: u32, tz: Tz) -> Result<(), TimeError> {
        self.set_time_field(TimeField::Second, second, tz)
    }

    pub fn clear_time_override(&mut self) {
        self.time_override = None;
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Advances and records one frame of the clock.
    pub fn draw_update(&mut self, list: &mut DrawList, fonts: &FontSystem, dt: f32, now: ClockTime) {
        let stroke = self.params.stroke();

        self.draw_gradation(list, stroke);

        for arc in &mut self.arcs {
            if self.params.animate {
                arc.update(dt, self.params.speed);
            }
            arc.draw(list, SCENE_Z, stroke);
        }

        self.draw_time(list, fonts, now);
        self.draw_hands(list, now);
    }

    fn draw_gradation(&self, list: &mut DrawList, stroke: Stroke) {
        for tick in self.layout.ticks() {
            let (from, to) = tick.endpoints();
            list.push_line(SCENE_Z, from, to, stroke);
        }
    }

    fn draw_time(&self, list: &mut DrawList, fonts: &FontSystem, now: ClockTime) {
        let Some(font) = self.font else {
            return;
        };
        let origin = readout_origin(fonts.ascent(font, READOUT_SIZE));
        list.push_text(SCENE_Z, now.to_string(), font, READOUT_SIZE, Color::WHITE, origin);
    }

    fn draw_hands(&self, list: &mut DrawList, now: ClockTime) {
        for hand in Hand::ALL {
            let length = self.layout.main_radius * hand.length_factor();
            let arrow = Arrow::new(self.layout.center, length, hand.angle(now));
            let stroke = Stroke::new(self.params.line_width, hand.color());
            list.push_line(SCENE_Z, arrow.shaft.0, arrow.shaft.1, stroke);
            list.push_polyline(SCENE_Z, &arrow.head, stroke);
        }
    }
}

/// Top-left of the readout line box for a font with the given `ascent`.
pub fn readout_origin(ascent: f32) -> Vec2 {
    Vec2::new(READOUT_BASELINE.x, READOUT_BASELINE.y - ascent)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;
    use chronarc_engine::scene::DrawCmd;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario() -> Scenario {
        Scenario::new(800.0, 600.0, &mut StdRng::seed_from_u64(42))
    }

    fn noon() -> ClockTime {
        ClockTime::new(12, 0, 0).unwrap()
    }

    fn count(list: &DrawList, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        list.items().iter().filter(|i| pred(&i.cmd)).count()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn builds_ten_rings_with_closed_ends() {
        let s = scenario();
        assert_eq!(s.arcs().len(), ARC_COUNT);
        assert_eq!(s.arcs()[0].sweep(), TAU);
        assert_eq!(s.arcs()[9].sweep(), TAU);
        for (i, arc) in s.arcs().iter().enumerate() {
            assert!((arc.radius - s.layout().ring_radius(i)).abs() < 1e-4);
            assert_eq!(arc.center, Vec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn same_seed_same_spans() {
        let a = scenario();
        let b = scenario();
        assert_eq!(a.arcs(), b.arcs());
    }

    #[test]
    fn default_params() {
        let p = SceneParams::default();
        assert_eq!(p.line_width, 2.0);
        assert_eq!(p.speed, 1.0);
        assert_eq!(p.color, Color::WHITE);
        assert!(p.animate);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_moves_rings_and_keeps_spans() {
        let mut s = scenario();
        let before: Vec<_> = s.arcs().iter().map(|a| (a.start, a.end, a.phase)).collect();
        s.resize(400.0, 1000.0);
        assert_eq!(s.layout().center, Vec2::new(200.0, 500.0));
        assert!((s.layout().main_radius - 130.0).abs() < 1e-4);
        for (i, arc) in s.arcs().iter().enumerate() {
            assert_eq!(arc.center, Vec2::new(200.0, 500.0));
            assert!((arc.radius - s.layout().ring_radius(i)).abs() < 1e-4);
            assert_eq!((arc.start, arc.end, arc.phase), before[i]);
        }
    }

    // ── draw_update ───────────────────────────────────────────────────────

    #[test]
    fn frame_records_ticks_rings_and_hands() {
        let mut s = scenario();
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        s.draw_update(&mut list, &fonts, 0.016, noon());

        let arcs = count(&list, |c| matches!(c, DrawCmd::Arc(_)));
        let lines = count(&list, |c| matches!(c, DrawCmd::Line(_)));
        // Random spans may collapse to zero, closed rings never do.
        assert!((2..=ARC_COUNT).contains(&arcs));
        // 12 ticks + 3 shafts + 3 * 2 arrowhead segments.
        assert_eq!(lines, 12 + 3 + 6);
        // No font: no readout.
        assert_eq!(count(&list, |c| matches!(c, DrawCmd::Text(_))), 0);
    }

    #[test]
    fn animate_advances_phase_only_when_enabled() {
        let mut s = scenario();
        let fonts = FontSystem::new();
        let mut list = DrawList::new();

        s.draw_update(&mut list, &fonts, 0.5, noon());
        assert!((s.arcs()[3].phase - 0.5).abs() < 1e-6);

        s.params.animate = false;
        s.draw_update(&mut list, &fonts, 0.5, noon());
        assert!((s.arcs()[3].phase - 0.5).abs() < 1e-6);
    }

    #[test]
    fn speed_scales_rotation() {
        let mut s = scenario();
        s.params.speed = -2.0;
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        s.draw_update(&mut list, &fonts, 0.25, noon());
        assert!((s.arcs()[0].phase - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn stroke_follows_params() {
        let mut s = scenario();
        s.params.line_width = 5.0;
        s.params.color = Color::from_srgb_u8(255, 0, 0, 255);
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        s.draw_update(&mut list, &fonts, 0.0, noon());

        let DrawCmd::Line(tick) = &list.items()[0].cmd else {
            panic!("first item should be a tick");
        };
        assert_eq!(tick.stroke, Stroke::new(5.0, Color::from_srgb_u8(255, 0, 0, 255)));
    }

    #[test]
    fn hands_use_fixed_colors_and_lengths() {
        let mut s = scenario();
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        // 03:00:30: hour hand points right, second hand points down.
        s.draw_update(&mut list, &fonts, 0.0, ClockTime::new(3, 0, 30).unwrap());

        let shafts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Line(l) if l.from == Vec2::new(400.0, 300.0) => Some(l.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(shafts.len(), 3);

        let r = s.layout().main_radius;
        let (second, minute, hour) = (&shafts[0], &shafts[1], &shafts[2]);
        assert_eq!(second.stroke.color, Color::RED);
        assert_eq!(minute.stroke.color, Color::BLUE);
        assert_eq!(hour.stroke.color, Color::GREEN);
        assert!((second.to.y - (300.0 + 0.9 * r)).abs() < 1e-3);
        assert!((minute.to.y - (300.0 - 0.8 * r)).abs() < 1e-3);
        assert!((hour.to.x - (400.0 + 0.5 * r)).abs() < 1e-3);
    }

    // ── readout ───────────────────────────────────────────────────────────

    #[test]
    fn readout_origin_puts_baseline_at_fifty() {
        assert_eq!(readout_origin(22.5), Vec2::new(10.0, 27.5));
        assert_eq!(readout_origin(0.0), READOUT_BASELINE);
    }

    #[test]
    fn readout_records_time_text_on_baseline() {
        let font = FontId::from_index(0);
        let mut s = scenario().with_font(Some(font));
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        s.draw_update(&mut list, &fonts, 0.0, ClockTime::new(3, 4, 5).unwrap());

        let texts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 1);
        let t = &texts[0];
        assert_eq!(t.text, "03:04:05");
        assert_eq!(t.font, font);
        assert_eq!(t.size, 30.0);
        assert_eq!(t.color, Color::WHITE);
        assert_eq!(t.origin.x, 10.0);
        assert!((t.origin.y + fonts.ascent(font, 30.0) - 50.0).abs() < 1e-4);
    }

    // ── time override ─────────────────────────────────────────────────────

    #[test]
    fn override_fields_stack_and_freeze() {
        let mut s = scenario();
        s.set_hour(9, Tz::UTC).unwrap();
        s.set_minute(41, Tz::UTC).unwrap();
        s.set_second(7, Tz::UTC).unwrap();
        assert_eq!(s.clock_time(Tz::UTC), ClockTime::new(9, 41, 7).unwrap());
        // Frozen regardless of timezone.
        assert_eq!(s.clock_time(Tz::Asia__Tokyo), ClockTime::new(9, 41, 7).unwrap());
    }

    #[test]
    fn rejected_override_leaves_state_unchanged() {
        let mut s = scenario();
        assert!(s.set_minute(60, Tz::UTC).is_err());
        assert_eq!(s.time_override(), None);

        s.set_hour(5, Tz::UTC).unwrap();
        let before = s.time_override();
        assert_eq!(
            s.set_hour(24, Tz::UTC),
            Err(TimeError::OutOfRange { field: TimeField::Hour, value: 24 })
        );
        assert_eq!(s.time_override(), before);
    }

    #[test]
    fn clearing_override_returns_to_wall_clock() {
        let mut s = scenario();
        s.set_second(0, Tz::UTC).unwrap();
        assert!(s.time_override().is_some());
        s.clear_time_override();
        assert_eq!(s.time_override(), None);
    }
}
