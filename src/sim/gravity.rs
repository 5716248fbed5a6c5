//! Pairwise Newtonian attraction
//!
//! Pixel separations are converted to meters with one factor per tick so that
//! G works at gameplay scale. Integration is explicit Euler on velocity.

use glam::DVec2;

use super::body::Body;
use super::geometry::{distance_vector, magnitude, scale};
use crate::tuning::Tuning;

/// Gravity parameters fixed for the duration of a tick
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    pub g: f64,
    pub meters_per_pixel: f32,
}

impl Gravity {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            g: tuning.gravitational_constant,
            meters_per_pixel: tuning.meters_per_pixel(),
        }
    }

    /// One interaction between `source` and `target`, applied to both sides.
    ///
    /// The source's mass counts as zero while the target is inside the
    /// source's radius. Coincident bodies yield non-finite velocities.
    pub fn attract(&self, source: &mut Body, target: &mut Body, dt: f32) {
        if !(source.attractable || target.attractable) {
            return;
        }

        let d = scale(distance_vector(source.pos(), target.pos()), self.meters_per_pixel);
        let dist = magnitude(d) as f64;
        let scaled_r = (source.r * self.meters_per_pixel) as f64;
        let effective_m = if dist < scaled_r { 0.0 } else { source.m };

        let force = self.g * effective_m * target.m / (dist * dist);
        let unit_force = force / dist;
        let force = DVec2::new(unit_force * d.x as f64, unit_force * d.y as f64);

        target.accelerate(force, dt);
        source.accelerate(-force, dt);
    }
}
