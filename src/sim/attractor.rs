//! Attractors: fixed masses pulling (or pushing) the launch point

use glam::Vec2;

use super::body::{Body, BodyKind, Viewport};
use crate::tuning::Tuning;

/// A gravitational attractor with an integer strength level
#[derive(Debug, Clone)]
pub struct Attractor {
    /// Stable id for edit/delete correlation
    pub id: u32,
    pub body: Body,
    attracting: bool,
    f: u8,
    max_f: u8,
    unit_mass: f64,
    /// Render radius before strength scaling
    base_r: f32,
    halo_factor: f32,
}

impl Attractor {
    pub fn new(id: u32, ratio: Vec2, f: u8, attracting: bool, tuning: &Tuning) -> Self {
        let mut attractor = Self {
            id,
            body: Body::new(BodyKind::Attractor, ratio, 0.0, tuning.attractors_attractable),
            attracting,
            f: 1,
            max_f: tuning.max_strength.max(1),
            unit_mass: tuning.attractor_unit_mass,
            base_r: 0.0,
            halo_factor: tuning.halo_factor(BodyKind::Attractor),
        };
        attractor.set_strength(f);
        attractor
    }

    pub fn init(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.body.init(viewport, tuning);
        self.base_r = self.body.r;
        self.halo_factor = tuning.halo_factor(BodyKind::Attractor);
        self.rescale();
    }

    #[inline]
    pub fn strength(&self) -> u8 {
        self.f
    }

    #[inline]
    pub fn is_attracting(&self) -> bool {
        self.attracting
    }

    /// Set the strength level, clamped to 1..=max
    pub fn set_strength(&mut self, f: u8) {
        self.f = f.clamp(1, self.max_f);
        self.rescale();
    }

    pub fn set_attracting(&mut self, attracting: bool) {
        self.attracting = attracting;
        self.rescale();
    }

    /// Strength drives both mass and radius
    fn rescale(&mut self) {
        let sign = if self.attracting { 1.0 } else { -1.0 };
        self.body.m = self.unit_mass * self.f as f64 * sign;
        self.body.r = self.base_r * (1.0 + self.f as f32 / self.max_f as f32);
        self.body.halo_r = self.body.r * self.halo_factor;
    }
}
