//! Linked entry/exit teleport pairs

use glam::Vec2;

use super::body::{Body, BodyKind, Viewport};
use super::geometry::within;
use crate::tuning::Tuning;

/// A portal: touching one end moves the body to the other end
#[derive(Debug, Clone)]
pub struct Portal {
    /// Entry end
    pub body: Body,
    /// Exit ratio position (persisted)
    pub exit_ratio: Vec2,
    exit: Vec2,
    /// The body was just placed on the entry end
    landed_at_entry: bool,
    /// The body was just placed on the exit end
    landed_at_exit: bool,
}

impl Portal {
    pub fn new(entry_ratio: Vec2, exit_ratio: Vec2) -> Self {
        Self {
            body: Body::new(BodyKind::Portal, entry_ratio, 0.0, false),
            exit_ratio,
            exit: Vec2::ZERO,
            landed_at_entry: false,
            landed_at_exit: false,
        }
    }

    pub fn init(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.body.init(viewport, tuning);
        self.exit = viewport.to_pixels(self.exit_ratio);
    }

    pub fn normalize(&mut self, viewport: &Viewport) {
        self.body.normalize(viewport);
        self.exit_ratio = viewport.to_ratio(self.exit);
    }

    #[inline]
    pub fn entry(&self) -> Vec2 {
        self.body.pos()
    }

    #[inline]
    pub fn exit(&self) -> Vec2 {
        self.exit
    }

    /// Move the exit end (pixels)
    pub fn set_exit(&mut self, exit: Vec2) {
        self.exit = exit;
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.r
    }

    pub fn reset(&mut self) {
        self.landed_at_entry = false;
        self.landed_at_exit = false;
    }

    /// Teleport `body` if it touches either end. Returns true on teleport.
    ///
    /// A body placed on one end is not sent back until it has left that
    /// end's circle.
    pub fn try_port(&mut self, body: &mut Body) -> bool {
        let r = self.radius();
        let at_entry = within(body.pos(), self.entry(), r);
        let at_exit = within(body.pos(), self.exit, r);

        if self.landed_at_entry && !at_entry {
            self.landed_at_entry = false;
        }
        if self.landed_at_exit && !at_exit {
            self.landed_at_exit = false;
        }

        if at_entry && !self.landed_at_entry {
            body.set_pos(self.exit);
            self.landed_at_entry = false;
            self.landed_at_exit = true;
            true
        } else if at_exit && !self.landed_at_exit {
            body.set_pos(self.entry());
            self.landed_at_exit = false;
            self.landed_at_entry = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Portal, Body) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1000.0, 1000.0);
        let mut portal = Portal::new(Vec2::new(0.3, 0.3), Vec2::new(0.7, 0.7));
        portal.init(&viewport, &tuning);
        let mut point = Body::point(Vec2::new(0.1, 0.3));
        point.init(&viewport, &tuning);
        (portal, point)
    }

    #[test]
    fn test_entry_sends_to_exit() {
        let (mut portal, mut point) = setup();
        point.set_pos(Vec2::new(301.0, 300.0));
        assert!(portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(700.0, 700.0));
    }

    #[test]
    fn test_no_bounce_back_while_inside_exit() {
        let (mut portal, mut point) = setup();
        point.set_pos(Vec2::new(300.0, 300.0));
        assert!(portal.try_port(&mut point));
        // Next tick the body is still on the exit circle
        point.set_pos(Vec2::new(702.0, 701.0));
        assert!(!portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(702.0, 701.0));
    }

    #[test]
    fn test_drifting_back_into_exit_ports_back() {
        let (mut portal, mut point) = setup();
        point.set_pos(Vec2::new(300.0, 300.0));
        assert!(portal.try_port(&mut point));
        point.set_pos(Vec2::new(800.0, 800.0));
        assert!(!portal.try_port(&mut point));
        point.set_pos(Vec2::new(700.0, 700.0));
        assert!(portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_drifting_back_into_entry_ports_forward() {
        let (mut portal, mut point) = setup();
        point.set_pos(Vec2::new(700.0, 700.0));
        assert!(portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(300.0, 300.0));
        // Leaves the entry circle, then comes back
        point.set_pos(Vec2::new(200.0, 300.0));
        assert!(!portal.try_port(&mut point));
        point.set_pos(Vec2::new(310.0, 300.0));
        assert!(portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(700.0, 700.0));
    }

    #[test]
    fn test_far_body_untouched() {
        let (mut portal, mut point) = setup();
        assert!(!portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_reset_clears_markers() {
        let (mut portal, mut point) = setup();
        point.set_pos(Vec2::new(300.0, 300.0));
        assert!(portal.try_port(&mut point));
        portal.reset();
        assert!(portal.try_port(&mut point));
        assert_eq!(point.pos(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_normalize_round_trip() {
        let (mut portal, _) = setup();
        let viewport = Viewport::new(1000.0, 1000.0);
        portal.set_exit(Vec2::new(250.0, 900.0));
        portal.normalize(&viewport);
        assert!((portal.exit_ratio - Vec2::new(0.25, 0.9)).length() < 1e-6);
        assert!((portal.body.ratio - Vec2::new(0.3, 0.3)).length() < 1e-6);
    }
}
