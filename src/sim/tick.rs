//! One simulation step
//!
//! Order within a step: attractor pairs and attractor motion, attractors on
//! the point, point motion, chords, portals, then termination.

use super::gravity::Gravity;
use super::scene::Scene;
use crate::tuning::{BoundsPolicy, Tuning};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The point reached the aim
    Reached,
    /// The point fell inside an attractor
    Absorbed { attractor_id: u32 },
    /// The point left the viewport under [`BoundsPolicy::Fail`]
    OutOfBounds,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Reached)
    }
}

/// What happened during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: Option<Outcome>,
    /// A portal moved the point
    pub ported: bool,
    /// A chord deflected the point
    pub deflected: bool,
}

/// Advance the scene by `dt` seconds
pub fn step(scene: &mut Scene, tuning: &Tuning, dt: f32) -> StepReport {
    let gravity = Gravity::new(tuning);
    let mut report = StepReport::default();

    // Attractors on each other, once per unordered pair
    if scene.has_mobile_attractors() {
        for i in 0..scene.attractors.len() {
            let (head, tail) = scene.attractors.split_at_mut(i + 1);
            let source = &mut head[i].body;
            for other in tail {
                gravity.attract(source, &mut other.body, dt);
            }
        }
    }
    for attractor in &mut scene.attractors {
        attractor.body.move_by(dt);
    }

    for attractor in &mut scene.attractors {
        gravity.attract(&mut attractor.body, &mut scene.point, dt);
    }
    scene.point.move_by(dt);

    for chord in &scene.chords {
        if chord.receive(&mut scene.point, tuning.chord_impulse) {
            report.deflected = true;
        }
    }
    for portal in &mut scene.portals {
        if portal.try_port(&mut scene.point) {
            report.ported = true;
        }
    }

    report.outcome = check_finished(scene, tuning);
    report
}

/// Termination conditions, evaluated on the point's current position
pub fn check_finished(scene: &Scene, tuning: &Tuning) -> Option<Outcome> {
    if scene.point.reached(&scene.aim) {
        return Some(Outcome::Reached);
    }
    if let Some(attractor) = scene.attractors.iter().find(|a| scene.point.reached(&a.body)) {
        return Some(Outcome::Absorbed {
            attractor_id: attractor.id,
        });
    }
    if tuning.bounds == BoundsPolicy::Fail && scene.point.out_of_bounds() {
        return Some(Outcome::OutOfBounds);
    }
    None
}
