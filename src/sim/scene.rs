//! A playable arrangement: one aim, one point, and any number of attractors,
//! portals and chords.
//!
//! `Clone` is a deep copy; a play session always works on its own copy.

use glam::Vec2;

use super::attractor::Attractor;
use super::body::{Body, Viewport};
use super::chord::Chord;
use super::portal::Portal;
use crate::consts::{DEFAULT_AIM, DEFAULT_ATTRACTOR, DEFAULT_POINT};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Scene {
    pub aim: Body,
    pub point: Body,
    /// Sorted by id
    pub attractors: Vec<Attractor>,
    pub portals: Vec<Portal>,
    pub chords: Vec<Chord>,
}

impl Scene {
    /// An empty scene with just the aim and the point
    pub fn new(aim: Vec2, point: Vec2) -> Self {
        Self {
            aim: Body::aim(aim),
            point: Body::point(point),
            attractors: Vec::new(),
            portals: Vec::new(),
            chords: Vec::new(),
        }
    }

    /// Starting layout for a new level
    pub fn default_layout(tuning: &Tuning) -> Self {
        let mut scene = Self::new(DEFAULT_AIM.into(), DEFAULT_POINT.into());
        scene
            .attractors
            .push(Attractor::new(0, DEFAULT_ATTRACTOR.into(), 1, true, tuning));
        scene
    }

    /// Lay the scene out against a viewport (ratio -> pixels)
    pub fn init(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.aim.init(viewport, tuning);
        self.point.init(viewport, tuning);
        for attractor in &mut self.attractors {
            attractor.init(viewport, tuning);
        }
        for portal in &mut self.portals {
            portal.init(viewport, tuning);
        }
        for chord in &mut self.chords {
            chord.init(viewport, tuning);
        }
    }

    /// Write live pixel positions back to ratios (before serialization)
    pub fn normalize(&mut self, viewport: &Viewport) {
        self.aim.normalize(viewport);
        self.point.normalize(viewport);
        for attractor in &mut self.attractors {
            attractor.body.normalize(viewport);
        }
        for portal in &mut self.portals {
            portal.normalize(viewport);
        }
        for chord in &mut self.chords {
            chord.normalize(viewport);
        }
    }

    /// Drop all per-run state
    pub fn reset(&mut self) {
        self.aim.reset();
        self.point.reset();
        for attractor in &mut self.attractors {
            attractor.body.reset();
        }
        for portal in &mut self.portals {
            portal.reset();
        }
    }

    pub fn attractor(&self, id: u32) -> Option<&Attractor> {
        self.attractors.iter().find(|a| a.id == id)
    }

    pub fn attractor_mut(&mut self, id: u32) -> Option<&mut Attractor> {
        self.attractors.iter_mut().find(|a| a.id == id)
    }

    pub fn max_attractor_id(&self) -> Option<u32> {
        self.attractors.iter().map(|a| a.id).max()
    }

    /// Whether any attractor is moved by gravity
    pub fn has_mobile_attractors(&self) -> bool {
        self.attractors.iter().any(|a| a.body.attractable)
    }
}
