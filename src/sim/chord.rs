//! Deflecting chords
//!
//! The crossing test compares distances to the two off-diagonal corners of
//! the chord's bounding box instead of a cross-product sign. It matches the
//! chord line exactly for square boxes and approximates it otherwise.

use glam::Vec2;

use super::body::{Body, BodyKind, Viewport};
use super::geometry::distance;
use crate::tuning::Tuning;

/// A line segment that bounces the launch point
#[derive(Debug, Clone)]
pub struct Chord {
    /// Start end
    pub body: Body,
    /// End ratio position (persisted)
    pub end_ratio: Vec2,
    end: Vec2,
}

impl Chord {
    pub fn new(start_ratio: Vec2, end_ratio: Vec2) -> Self {
        Self {
            body: Body::new(BodyKind::Chord, start_ratio, 0.0, false),
            end_ratio,
            end: Vec2::ZERO,
        }
    }

    pub fn init(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.body.init(viewport, tuning);
        self.end = viewport.to_pixels(self.end_ratio);
    }

    pub fn normalize(&mut self, viewport: &Viewport) {
        self.body.normalize(viewport);
        self.end_ratio = viewport.to_ratio(self.end);
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.body.pos()
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn set_end(&mut self, end: Vec2) {
        self.end = end;
    }

    /// Which side of the chord `p` is on
    fn side(&self, p: Vec2) -> bool {
        let (a, b) = (self.start(), self.end);
        let corner_a = Vec2::new(a.x, b.y);
        let corner_b = Vec2::new(b.x, a.y);
        distance(p, corner_a) < distance(p, corner_b)
    }

    /// Deflect `body` if its last move crossed the chord. Returns true on hit.
    pub fn receive(&self, body: &mut Body, impulse: f32) -> bool {
        let min = self.start().min(self.end);
        let max = self.start().max(self.end);
        let prev = body.prev();
        if prev.x < min.x || prev.x > max.x || prev.y < min.y || prev.y > max.y {
            return false;
        }

        if self.side(prev) != self.side(body.pos()) {
            body.vel = -(body.vel + Vec2::splat(impulse));
            true
        } else {
            false
        }
    }
}
