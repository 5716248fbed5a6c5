//! Shared body model
//!
//! Every entity keeps a ratio position (0..1 of the viewport, the persisted
//! source of truth) and derived pixel positions rebuilt by [`Body::init`].

use glam::{DVec2, Vec2};

use super::geometry::{distance, within};
use crate::consts::POINT_MASS;
use crate::tuning::Tuning;

/// Viewport the scene is laid out against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Multiplier applied to every render radius (thumbnails use less than 1)
    pub render_scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            render_scale: 1.0,
        }
    }

    /// Viewport for level-list previews
    pub fn thumbnail(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            render_scale: crate::consts::THUMBNAIL_SCALE,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Pixel position to ratio position
    #[inline]
    pub fn to_ratio(&self, pos: Vec2) -> Vec2 {
        pos / self.size()
    }

    /// Ratio position to pixel position
    #[inline]
    pub fn to_pixels(&self, ratio: Vec2) -> Vec2 {
        ratio * self.size()
    }
}

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Aim,
    Point,
    Attractor,
    Portal,
    Chord,
}

impl BodyKind {
    /// Takes part in gravitational interaction
    pub fn is_massive(&self) -> bool {
        matches!(self, BodyKind::Aim | BodyKind::Point | BodyKind::Attractor)
    }

    /// Carries a second position (portal exit, chord end)
    pub fn is_dual(&self) -> bool {
        matches!(self, BodyKind::Portal | BodyKind::Chord)
    }
}

/// Positional state common to all entities
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    /// Ratio position (persisted)
    pub ratio: Vec2,
    /// Initial pixel position at the current viewport size
    pub origin: Vec2,
    /// Live pixel position
    pos: Vec2,
    /// Pixel position before the most recent write
    prev: Vec2,
    /// Velocity (pixels/s)
    pub vel: Vec2,
    /// Render radius (pixels)
    pub r: f32,
    /// Hit-test radius for editing
    pub halo_r: f32,
    /// Mass (kg), sign encodes attraction vs repulsion
    pub m: f64,
    /// Whether gravity moves this body
    pub attractable: bool,
    /// Viewport extent the bounds check runs against
    extent: Vec2,
}

impl Body {
    pub fn new(kind: BodyKind, ratio: Vec2, m: f64, attractable: bool) -> Self {
        Self {
            kind,
            ratio,
            origin: Vec2::ZERO,
            pos: Vec2::ZERO,
            prev: Vec2::ZERO,
            vel: Vec2::ZERO,
            r: 0.0,
            halo_r: 0.0,
            m,
            attractable,
            extent: Vec2::ZERO,
        }
    }

    /// The stationary goal marker
    pub fn aim(ratio: Vec2) -> Self {
        Self::new(BodyKind::Aim, ratio, POINT_MASS, true)
    }

    /// The player-launched mass
    pub fn point(ratio: Vec2) -> Self {
        Self::new(BodyKind::Point, ratio, POINT_MASS, true)
    }

    /// Rebuild pixel state from the ratio position
    pub fn init(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.extent = viewport.size();
        self.origin = viewport.to_pixels(self.ratio);
        self.r = tuning.base_radius(self.kind) * viewport.render_scale;
        self.halo_r = self.r * tuning.halo_factor(self.kind);
        self.set_pos(self.origin);
        self.prev = self.origin;
    }

    /// Rebuild the ratio position from the live pixel position
    pub fn normalize(&mut self, viewport: &Viewport) {
        self.ratio = viewport.to_ratio(self.pos);
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn prev(&self) -> Vec2 {
        self.prev
    }

    /// Write x; an out-of-range value flips the x velocity
    pub fn set_x(&mut self, x: f32) {
        self.prev.x = self.pos.x;
        self.pos.x = x;
        if x < 0.0 || x > self.extent.x {
            self.vel.x = -self.vel.x;
        }
    }

    /// Write y; an out-of-range value flips the y velocity
    pub fn set_y(&mut self, y: f32) {
        self.prev.y = self.pos.y;
        self.pos.y = y;
        if y < 0.0 || y > self.extent.y {
            self.vel.y = -self.vel.y;
        }
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.set_x(pos.x);
        self.set_y(pos.y);
    }

    /// Advance by the current velocity
    pub fn move_by(&mut self, dt: f32) {
        self.set_x(self.pos.x + self.vel.x * dt);
        self.set_y(self.pos.y + self.vel.y * dt);
    }

    /// Apply a force (newtons) for `dt` seconds, if this body is attractable
    pub fn accelerate(&mut self, force: DVec2, dt: f32) {
        if self.attractable {
            let acceleration = (force / self.m).as_vec2();
            self.vel += acceleration * dt;
        }
    }

    /// Back to the initial pixel position at rest
    pub fn reset(&mut self) {
        if self.kind.is_massive() {
            self.set_pos(self.origin);
            self.vel = Vec2::ZERO;
        }
    }

    /// Whether this body is inside `other`'s radius
    #[inline]
    pub fn reached(&self, other: &Body) -> bool {
        within(self.pos, other.pos, other.r)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        within(p, self.pos, self.r)
    }

    #[inline]
    pub fn halo_contains(&self, p: Vec2) -> bool {
        within(p, self.pos, self.halo_r)
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        distance(self.pos, other.pos)
    }

    /// Live position lies outside the viewport
    pub fn out_of_bounds(&self) -> bool {
        self.pos.x < 0.0 || self.pos.y < 0.0 || self.pos.x > self.extent.x || self.pos.y > self.extent.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point_at(ratio: Vec2, viewport: &Viewport) -> Body {
        let mut body = Body::point(ratio);
        body.init(viewport, &Tuning::default());
        body
    }

    #[test]
    fn test_init_derives_pixels_and_radius() {
        let viewport = Viewport::new(1000.0, 500.0);
        let tuning = Tuning::default();
        let body = point_at(Vec2::new(0.2, 0.8), &viewport);
        assert_eq!(body.origin, Vec2::new(200.0, 400.0));
        assert_eq!(body.pos(), body.origin);
        assert_eq!(body.r, tuning.point_size * tuning.pixels_per_dip);
        assert_eq!(body.halo_r, body.r * tuning.point_halo);
    }

    #[test]
    fn test_thumbnail_shrinks_radius() {
        let full = point_at(Vec2::splat(0.5), &Viewport::new(300.0, 300.0));
        let thumb = point_at(Vec2::splat(0.5), &Viewport::thumbnail(300.0, 300.0));
        assert!((thumb.r - full.r * 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_crossing_left_edge_flips_once() {
        let mut body = point_at(Vec2::new(0.005, 0.5), &Viewport::new(1000.0, 1000.0));
        body.vel = Vec2::new(-600.0, 0.0);
        // x: 5 -> -5, flips to +600
        body.move_by(1.0 / 60.0);
        assert!(body.pos().x < 0.0);
        assert_eq!(body.vel.x, 600.0);
        // x: -5 -> 5, back in range, no flip
        body.move_by(1.0 / 60.0);
        assert!(body.pos().x > 0.0);
        assert_eq!(body.vel.x, 600.0);
    }

    #[test]
    fn test_slow_exit_double_flips() {
        // Every out-of-range write flips, even when already heading inward
        let mut body = point_at(Vec2::new(0.001, 0.5), &Viewport::new(1000.0, 1000.0));
        body.vel = Vec2::new(-120.0, 0.0);
        body.move_by(1.0 / 60.0); // 1 -> -1
        assert_eq!(body.vel.x, 120.0);
        body.move_by(1.0 / 100.0); // -1 -> 0.2
        assert_eq!(body.vel.x, 120.0);
        body.set_x(-3.0);
        assert_eq!(body.vel.x, -120.0);
        body.set_x(-2.0);
        assert_eq!(body.vel.x, 120.0);
    }

    #[test]
    fn test_prev_tracks_last_write() {
        let mut body = point_at(Vec2::splat(0.5), &Viewport::new(100.0, 100.0));
        body.vel = Vec2::new(60.0, -60.0);
        body.move_by(0.5);
        assert_eq!(body.prev(), Vec2::new(50.0, 50.0));
        assert_eq!(body.pos(), Vec2::new(80.0, 20.0));
    }

    #[test]
    fn test_reset_restores_origin() {
        let mut body = point_at(Vec2::splat(0.5), &Viewport::new(100.0, 100.0));
        body.vel = Vec2::new(10.0, 10.0);
        body.move_by(1.0);
        body.reset();
        assert_eq!(body.pos(), body.origin);
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.ratio, Vec2::splat(0.5));
    }

    #[test]
    fn test_accelerate_respects_attractable() {
        let mut body = Body::new(BodyKind::Attractor, Vec2::ZERO, 2.0, false);
        body.accelerate(DVec2::new(4.0, 0.0), 1.0);
        assert_eq!(body.vel, Vec2::ZERO);
        body.attractable = true;
        body.accelerate(DVec2::new(4.0, 0.0), 0.5);
        assert_eq!(body.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_capabilities() {
        assert!(BodyKind::Attractor.is_massive());
        assert!(!BodyKind::Portal.is_massive());
        assert!(BodyKind::Chord.is_dual());
        assert!(!BodyKind::Aim.is_dual());
    }

    proptest! {
        #[test]
        fn prop_init_normalize_round_trip(
            rx in 0.0f32..=1.0,
            ry in 0.0f32..=1.0,
            w in 100.0f32..4000.0,
            h in 100.0f32..4000.0,
        ) {
            let viewport = Viewport::new(w, h);
            let mut body = point_at(Vec2::new(rx, ry), &viewport);
            body.normalize(&viewport);
            prop_assert!((body.ratio.x - rx).abs() < 1e-5);
            prop_assert!((body.ratio.y - ry).abs() < 1e-5);
        }
    }
}
