use std::f32::consts::TAU;

use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Circular arc stroke payload.
///
/// Angles are in radians, measured from +X and turning clockwise on screen
/// (+Y down). `sweep` is already normalized into `(0, 2π]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCmd {
    pub center: Vec2,
    pub radius: f32,
    pub start: f32,
    pub sweep: f32,
    pub stroke: Stroke,
}

impl ArcCmd {
    /// Builds an arc from `start` turning clockwise by `sweep`, clamped to one turn.
    ///
    /// Returns `None` when the arc would draw nothing.
    pub fn with_sweep(center: Vec2, radius: f32, start: f32, sweep: f32, stroke: Stroke) -> Option<Self> {
        if !(radius > 0.0) || !center.is_finite() || !start.is_finite() {
            return None;
        }
        if !(sweep > 0.0) {
            return None;
        }
        let sweep = sweep.min(TAU);
        Some(Self { center, radius, start: start.rem_euclid(TAU), sweep, stroke })
    }

    #[inline]
    pub fn is_full_circle(&self) -> bool {
        self.sweep >= TAU
    }
}

/// Clockwise sweep from `start` to `end`, as a canvas `arc()` call draws it.
///
/// A difference of at least one turn is a full circle; anything smaller wraps
/// into `[0, 2π)`.
pub fn canvas_sweep(start: f32, end: f32) -> f32 {
    let d = end - start;
    if !d.is_finite() {
        return 0.0;
    }
    if d >= TAU {
        return TAU;
    }
    d.rem_euclid(TAU)
}

impl DrawList {
    /// Records an arc stroke from `start` turning clockwise by `sweep` radians.
    ///
    /// Degenerate arcs (zero sweep, non-positive radius, invisible stroke) are skipped.
    pub fn push_arc_sweep(&mut self, z: ZIndex, center: Vec2, radius: f32, start: f32, sweep: f32, stroke: Stroke) {
        if !stroke.is_visible() {
            return;
        }
        if let Some(cmd) = ArcCmd::with_sweep(center, radius, start, sweep, stroke) {
            self.push(z, DrawCmd::Arc(cmd));
        }
    }
}
