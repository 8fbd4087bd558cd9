use std::f32::consts::TAU;

use rand::Rng;

use chronarc_engine::coords::Vec2;
use chronarc_engine::scene::shapes::{canvas_sweep, Stroke};
use chronarc_engine::scene::{DrawList, ZIndex};

/// A circular arc with a fixed angular span and an advancing rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatingArc {
    pub center: Vec2,
    pub radius: f32,
    /// Span start, radians.
    pub start: f32,
    /// Span end, radians. Canvas sweep rules apply.
    pub end: f32,
    /// Accumulated rotation in `[0, 2π)`.
    pub phase: f32,
}

impl RotatingArc {
    pub fn new(center: Vec2, radius: f32, start: f32, end: f32) -> Self {
        Self { center, radius, start, end, phase: 0.0 }
    }

    /// A closed ring.
    pub fn full(center: Vec2, radius: f32) -> Self {
        Self::new(center, radius, 0.0, TAU)
    }

    /// An arc whose start and end are drawn independently from `[0°, 360°)`.
    pub fn random<R: Rng + ?Sized>(center: Vec2, radius: f32, rng: &mut R) -> Self {
        let start = rng.random_range(0.0..360.0f32).to_radians();
        let end = rng.random_range(0.0..360.0f32).to_radians();
        Self::new(center, radius, start, end)
    }

    /// Advances the rotation by `dt * speed` radians.
    pub fn update(&mut self, dt: f32, speed: f32) {
        let step = dt * speed;
        if !step.is_finite() {
            return;
        }
        let phase = (self.phase + step).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs.
        self.phase = if phase >= TAU { 0.0 } else { phase };
    }

    /// Clockwise angular extent, independent of the phase.
    pub fn sweep(&self) -> f32 {
        canvas_sweep(self.start, self.end)
    }

    pub fn draw(&self, list: &mut DrawList, z: ZIndex, stroke: Stroke) {
        list.push_arc_sweep(z, self.center, self.radius, self.start + self.phase, self.sweep(), stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronarc_engine::paint::Color;
    use chronarc_engine::scene::DrawCmd;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stroke() -> Stroke {
        Stroke::new(2.0, Color::WHITE)
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_accumulates_phase() {
        let mut a = RotatingArc::full(Vec2::zero(), 10.0);
        a.update(0.5, 1.0);
        a.update(0.25, 2.0);
        assert!((a.phase - 1.0).abs() < 1e-6);
    }

    #[test]
    fn phase_wraps_into_one_turn() {
        let mut a = RotatingArc::full(Vec2::zero(), 10.0);
        for _ in 0..100 {
            a.update(0.25, 2.0);
        }
        assert!(a.phase >= 0.0 && a.phase < TAU);
        assert!((a.phase - (50.0f32).rem_euclid(TAU)).abs() < 1e-3);
    }

    #[test]
    fn negative_speed_turns_backwards() {
        let mut a = RotatingArc::full(Vec2::zero(), 10.0);
        a.update(0.5, -1.0);
        assert!((a.phase - (TAU - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn non_finite_step_is_ignored() {
        let mut a = RotatingArc::full(Vec2::zero(), 10.0);
        a.update(0.1, 1.0);
        a.update(f32::NAN, 1.0);
        a.update(0.1, f32::INFINITY);
        assert!((a.phase - 0.1).abs() < 1e-6);
    }

    // ── spans ─────────────────────────────────────────────────────────────

    #[test]
    fn full_ring_sweeps_one_turn() {
        assert_eq!(RotatingArc::full(Vec2::zero(), 10.0).sweep(), TAU);
    }

    #[test]
    fn end_before_start_wraps() {
        let a = RotatingArc::new(Vec2::zero(), 10.0, 3.0, 1.0);
        assert!((a.sweep() - (TAU - 2.0)).abs() < 1e-5);
    }

    #[test]
    fn random_spans_are_in_range_and_seeded() {
        let mut r1 = StdRng::seed_from_u64(7);
        let mut r2 = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let a = RotatingArc::random(Vec2::zero(), 10.0, &mut r1);
            let b = RotatingArc::random(Vec2::zero(), 10.0, &mut r2);
            assert_eq!(a, b);
            assert!((0.0..TAU).contains(&a.start));
            assert!((0.0..TAU).contains(&a.end));
        }
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_rotates_start_and_keeps_sweep() {
        let mut a = RotatingArc::new(Vec2::new(50.0, 50.0), 20.0, 0.5, 2.0);
        a.update(1.0, 1.0);
        let mut list = DrawList::new();
        a.draw(&mut list, ZIndex(0), stroke());

        let DrawCmd::Arc(cmd) = &list.items()[0].cmd else {
            panic!("expected arc");
        };
        assert!((cmd.start - 1.5).abs() < 1e-5);
        assert!((cmd.sweep - 1.5).abs() < 1e-5);
        assert_eq!(cmd.radius, 20.0);
    }

    #[test]
    fn rotated_full_ring_stays_closed() {
        let mut a = RotatingArc::full(Vec2::zero(), 10.0);
        a.update(0.123, 1.7);
        let mut list = DrawList::new();
        a.draw(&mut list, ZIndex(0), stroke());
        let DrawCmd::Arc(cmd) = &list.items()[0].cmd else {
            panic!("expected arc");
        };
        assert!(cmd.is_full_circle());
    }

    #[test]
    fn zero_span_draws_nothing() {
        let a = RotatingArc::new(Vec2::zero(), 10.0, 1.0, 1.0);
        let mut list = DrawList::new();
        a.draw(&mut list, ZIndex(0), stroke());
        assert!(list.is_empty());
    }
}
