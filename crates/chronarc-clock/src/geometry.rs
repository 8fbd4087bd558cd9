//! Clock face geometry: ring radii, gradation ticks and hand vectors.
//!
//! Angles are radians in screen space: 0 points to 3 o'clock and positive
//! angles turn clockwise (+Y down).

use std::f32::consts::{FRAC_PI_2, TAU};

use chronarc_engine::coords::Vec2;
use chronarc_engine::paint::Color;

use crate::time::ClockTime;

/// Number of rotating rings.
pub const ARC_COUNT: usize = 10;
/// Number of gradation ticks.
pub const GRADATION_COUNT: usize = 12;
/// Arrowhead leg offset along and across the hand, in logical pixels.
pub const ARROW_SIZE: f32 = 10.0;

// ── Layout ────────────────────────────────────────────────────────────────

/// Size-derived dimensions of the clock face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Vec2,
    pub main_radius: f32,
    /// Radial distance between neighbouring rings.
    pub delta_radius: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let main_radius = width.min(height).max(0.0) * 0.5 * 0.65;
        Self {
            center: Vec2::new(width * 0.5, height * 0.5),
            main_radius,
            delta_radius: main_radius * 0.075,
        }
    }

    /// Radius of ring `index`; rings are spread around `main_radius`.
    pub fn ring_radius(&self, index: usize) -> f32 {
        self.main_radius + (index as f32 - ARC_COUNT as f32 / 2.0) * self.delta_radius
    }

    /// Gradation tick `index` in `0..GRADATION_COUNT`.
    pub fn tick(&self, index: usize) -> Tick {
        let angle = TAU * index as f32 / GRADATION_COUNT as f32 + FRAC_PI_2;
        let distance = self.main_radius - self.delta_radius / 2.0;
        Tick {
            center: self.center + Vec2::from_angle(angle) * distance,
            angle,
            length: self.delta_radius * (ARC_COUNT as f32 - 1.0),
        }
    }

    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        (0..GRADATION_COUNT).map(|i| self.tick(i))
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────

/// A radial tick mark centered on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub center: Vec2,
    pub angle: f32,
    pub length: f32,
}

impl Tick {
    /// Segment endpoints, `length / 2` on each side of the center along `angle`.
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = Vec2::from_angle(self.angle) * (self.length * 0.5);
        (self.center - half, self.center + half)
    }
}

// ── Hands ─────────────────────────────────────────────────────────────────

/// Clock hand kinds, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Second,
    Minute,
    Hour,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Second, Hand::Minute, Hand::Hour];

    /// Length as a fraction of the main radius.
    pub fn length_factor(self) -> f32 {
        match self {
            Hand::Second => 0.9,
            Hand::Minute => 0.8,
            Hand::Hour => 0.5,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Hand::Second => Color::RED,
            Hand::Minute => Color::BLUE,
            Hand::Hour => Color::GREEN,
        }
    }

    /// Screen angle of this hand at `time`. Hands jump once per unit.
    pub fn angle(self, time: ClockTime) -> f32 {
        let fraction = match self {
            Hand::Second => time.second as f32 / 60.0,
            Hand::Minute => time.minute as f32 / 60.0,
            Hand::Hour => (time.hour % 12) as f32 / 12.0,
        };
        TAU * fraction - FRAC_PI_2
    }
}

/// A hand stroke: shaft from the origin plus a three-point arrowhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub shaft: (Vec2, Vec2),
    pub head: [Vec2; 3],
}

impl Arrow {
    /// Arrow of `length` from `origin` along `angle`.
    ///
    /// In the hand's local frame the head is `(L - 10, -10) → (L, 0) → (L - 10, 10)`.
    pub fn new(origin: Vec2, length: f32, angle: f32) -> Self {
        let local = |x: f32, y: f32| origin + Vec2::new(x, y).rotated(angle);
        let tip = local(length, 0.0);
        Self {
            shaft: (origin, tip),
            head: [
                local(length - ARROW_SIZE, -ARROW_SIZE),
                tip,
                local(length - ARROW_SIZE, ARROW_SIZE),
            ],
        }
    }
}
