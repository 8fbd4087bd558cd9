use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Stroke;

/// Straight line segment with round caps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub stroke: Stroke,
}

impl LineCmd {
    #[inline]
    pub fn new(from: Vec2, to: Vec2, stroke: Stroke) -> Self {
        Self { from, to, stroke }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.to - self.from).length()
    }
}

impl DrawList {
    /// Records a line segment.
    ///
    /// A zero-length segment is still recorded; with round caps it renders as a dot.
    pub fn push_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, stroke: Stroke) {
        if !stroke.is_visible() || !from.is_finite() || !to.is_finite() {
            return;
        }
        self.push(z, DrawCmd::Line(LineCmd::new(from, to, stroke)));
    }

    /// Records an open polyline as consecutive segments.
    pub fn push_polyline(&mut self, z: ZIndex, points: &[Vec2], stroke: Stroke) {
        for pair in points.windows(2) {
            self.push_line(z, pair[0], pair[1], stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn polyline_records_one_segment_per_pair() {
        let mut list = DrawList::new();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        list.push_polyline(ZIndex(0), &pts, Stroke::new(1.0, Color::WHITE));
        assert_eq!(list.len(), 2);

        let DrawCmd::Line(second) = &list.items()[1].cmd else {
            panic!("expected line");
        };
        assert_eq!(second.from, Vec2::new(10.0, 0.0));
        assert_eq!(second.to, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn invisible_stroke_is_skipped() {
        let mut list = DrawList::new();
        list.push_line(ZIndex(0), Vec2::zero(), Vec2::new(1.0, 1.0), Stroke::new(0.0, Color::WHITE));
        list.push_line(ZIndex(0), Vec2::zero(), Vec2::new(1.0, 1.0), Stroke::new(1.0, Color::transparent()));
        assert!(list.is_empty());
    }

    #[test]
    fn non_finite_endpoint_is_skipped() {
        let mut list = DrawList::new();
        list.push_line(ZIndex(0), Vec2::new(f32::NAN, 0.0), Vec2::zero(), Stroke::new(1.0, Color::WHITE));
        assert!(list.is_empty());
    }
}
