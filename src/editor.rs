//! Level authoring model
//!
//! Holds a mutable scene bound to one viewport. Gesture handlers pass pixel
//! positions; [`SceneEditor::construct`] hands out a normalized deep copy
//! suitable for play or storage.

use glam::Vec2;

use crate::sim::{Attractor, Body, Chord, Portal, Scene, Viewport};
use crate::tuning::Tuning;

/// An entity picked by a hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Aim,
    Point,
    Attractor(u32),
}

pub struct SceneEditor {
    scene: Scene,
    viewport: Viewport,
    tuning: Tuning,
    /// Next attractor id; never reused within a session
    next_id: u32,
}

impl SceneEditor {
    /// Start from the default layout
    pub fn new(viewport: Viewport, tuning: Tuning) -> Self {
        let scene = Scene::default_layout(&tuning);
        Self::from_scene(scene, viewport, tuning)
    }

    /// Resume editing an existing scene
    pub fn from_scene(mut scene: Scene, viewport: Viewport, tuning: Tuning) -> Self {
        scene.init(&viewport, &tuning);
        let next_id = scene.max_attractor_id().map_or(0, |id| id + 1);
        Self {
            scene,
            viewport,
            tuning,
            next_id,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // === Attractors ===

    pub fn add_attractor(&mut self, pos: Vec2, f: u8, attracting: bool) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let ratio = self.viewport.to_ratio(pos);
        let mut attractor = Attractor::new(id, ratio, f, attracting, &self.tuning);
        attractor.init(&self.viewport, &self.tuning);
        self.scene.attractors.push(attractor);
        log::debug!("Added attractor {} (f={}, attracting={})", id, f, attracting);
        id
    }

    /// Change strength and sign. Returns false for an unknown id.
    pub fn update_attractor(&mut self, id: u32, f: u8, attracting: bool) -> bool {
        match self.scene.attractor_mut(id) {
            Some(attractor) => {
                attractor.set_strength(f);
                attractor.set_attracting(attracting);
                true
            }
            None => false,
        }
    }

    pub fn remove_attractor(&mut self, id: u32) -> bool {
        let before = self.scene.attractors.len();
        self.scene.attractors.retain(|a| a.id != id);
        before != self.scene.attractors.len()
    }

    // === Portals and chords ===

    /// New portal with both ends at `entry`; drag the exit with
    /// [`set_portal_exit`](Self::set_portal_exit)
    pub fn add_portal(&mut self, entry: Vec2) {
        let ratio = self.viewport.to_ratio(entry);
        let mut portal = Portal::new(ratio, ratio);
        portal.init(&self.viewport, &self.tuning);
        self.scene.portals.push(portal);
    }

    /// Move the exit of the most recent portal
    pub fn set_portal_exit(&mut self, exit: Vec2) -> bool {
        match self.scene.portals.last_mut() {
            Some(portal) => {
                portal.set_exit(exit);
                true
            }
            None => false,
        }
    }

    pub fn begin_chord(&mut self, start: Vec2) {
        let ratio = self.viewport.to_ratio(start);
        let mut chord = Chord::new(ratio, ratio);
        chord.init(&self.viewport, &self.tuning);
        self.scene.chords.push(chord);
    }

    /// Move the end of the most recent chord
    pub fn extend_chord(&mut self, end: Vec2) -> bool {
        match self.scene.chords.last_mut() {
            Some(chord) => {
                chord.set_end(end);
                true
            }
            None => false,
        }
    }

    // === Hit testing ===

    /// First entity whose halo covers `pos`: aim, point, then attractors
    pub fn find_in_halo(&self, pos: Vec2) -> Option<Selection> {
        self.find(|body| body.halo_contains(pos))
    }

    /// First entity whose radius covers `pos`
    pub fn find_touched(&self, pos: Vec2) -> Option<Selection> {
        self.find(|body| body.contains(pos))
    }

    fn find(&self, hit: impl Fn(&Body) -> bool) -> Option<Selection> {
        if hit(&self.scene.aim) {
            return Some(Selection::Aim);
        }
        if hit(&self.scene.point) {
            return Some(Selection::Point);
        }
        self.scene
            .attractors
            .iter()
            .find(|a| hit(&a.body))
            .map(|a| Selection::Attractor(a.id))
    }

    /// Move the selected entity; its new position is also its start position
    pub fn drag(&mut self, selection: Selection, pos: Vec2) -> bool {
        let body = match selection {
            Selection::Aim => &mut self.scene.aim,
            Selection::Point => &mut self.scene.point,
            Selection::Attractor(id) => match self.scene.attractor_mut(id) {
                Some(attractor) => &mut attractor.body,
                None => return false,
            },
        };
        body.set_pos(pos);
        body.origin = pos;
        true
    }

    /// Normalized deep copy of the scene
    pub fn construct(&mut self) -> Scene {
        self.scene.normalize(&self.viewport);
        self.scene.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> SceneEditor {
        SceneEditor::new(Viewport::new(1000.0, 1000.0), Tuning::default())
    }

    #[test]
    fn test_default_layout() {
        let editor = editor();
        let scene = editor.scene();
        assert_eq!(scene.aim.pos(), Vec2::new(800.0, 200.0));
        assert_eq!(scene.point.pos(), Vec2::new(200.0, 800.0));
        assert_eq!(scene.attractors.len(), 1);
        assert_eq!(scene.attractors[0].id, 0);
        assert_eq!(scene.attractors[0].strength(), 1);
        assert!(scene.attractors[0].is_attracting());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut editor = editor();
        assert_eq!(editor.add_attractor(Vec2::new(300.0, 300.0), 2, true), 1);
        assert_eq!(editor.add_attractor(Vec2::new(700.0, 700.0), 3, false), 2);
        assert!(editor.remove_attractor(2));
        assert!(!editor.remove_attractor(2));
        assert_eq!(editor.add_attractor(Vec2::new(700.0, 700.0), 3, false), 3);
        let ids: Vec<u32> = editor.scene().attractors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn test_from_scene_resumes_counter() {
        let tuning = Tuning::default();
        let mut scene = Scene::default_layout(&tuning);
        scene
            .attractors
            .push(Attractor::new(7, Vec2::new(0.3, 0.3), 1, true, &tuning));
        let mut editor = SceneEditor::from_scene(scene, Viewport::new(1000.0, 1000.0), tuning);
        assert_eq!(editor.add_attractor(Vec2::new(100.0, 100.0), 1, true), 8);

        let empty = Scene::new(Vec2::new(0.8, 0.2), Vec2::new(0.2, 0.8));
        let mut editor = SceneEditor::from_scene(empty, Viewport::new(1000.0, 1000.0), Tuning::default());
        assert_eq!(editor.add_attractor(Vec2::new(100.0, 100.0), 1, true), 0);
    }

    #[test]
    fn test_update_attractor() {
        let mut editor = editor();
        assert!(editor.update_attractor(0, 4, false));
        let attractor = editor.scene().attractor(0).unwrap();
        assert_eq!(attractor.strength(), 4);
        assert!(attractor.body.m < 0.0);
        assert!(!editor.update_attractor(42, 1, true));
    }

    #[test]
    fn test_halo_priority() {
        let mut editor = editor();
        let id = editor.add_attractor(Vec2::new(300.0, 700.0), 1, true);
        assert_eq!(editor.find_in_halo(Vec2::new(800.0, 250.0)), Some(Selection::Aim));
        assert_eq!(editor.find_in_halo(Vec2::new(520.0, 500.0)), Some(Selection::Attractor(0)));
        // Inside both the point's halo and the new attractor's body
        assert_eq!(editor.find_in_halo(Vec2::new(300.0, 700.0)), Some(Selection::Point));
        assert_eq!(editor.find_touched(Vec2::new(300.0, 700.0)), Some(Selection::Attractor(id)));
        assert_eq!(editor.find_in_halo(Vec2::new(999.0, 999.0)), None);
    }

    #[test]
    fn test_drag_then_construct() {
        let mut editor = editor();
        assert!(editor.drag(Selection::Aim, Vec2::new(500.0, 100.0)));
        assert!(editor.drag(Selection::Attractor(0), Vec2::new(250.0, 250.0)));
        assert!(!editor.drag(Selection::Attractor(9), Vec2::ZERO));

        let scene = editor.construct();
        assert!((scene.aim.ratio - Vec2::new(0.5, 0.1)).length() < 1e-6);
        assert!((scene.attractors[0].body.ratio - Vec2::splat(0.25)).length() < 1e-6);
        assert_eq!(scene.aim.origin, Vec2::new(500.0, 100.0));
    }

    #[test]
    fn test_portals_and_chords() {
        let mut editor = editor();
        assert!(!editor.set_portal_exit(Vec2::ZERO));
        assert!(!editor.extend_chord(Vec2::ZERO));

        editor.add_portal(Vec2::new(100.0, 100.0));
        assert!(editor.set_portal_exit(Vec2::new(900.0, 900.0)));
        editor.begin_chord(Vec2::new(300.0, 600.0));
        assert!(editor.extend_chord(Vec2::new(600.0, 300.0)));

        let scene = editor.construct();
        assert!((scene.portals[0].exit_ratio - Vec2::splat(0.9)).length() < 1e-6);
        assert!((scene.chords[0].body.ratio - Vec2::new(0.3, 0.6)).length() < 1e-6);
        assert!((scene.chords[0].end_ratio - Vec2::new(0.6, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_construct_is_a_copy() {
        let mut editor = editor();
        let scene = editor.construct();
        editor.remove_attractor(0);
        assert_eq!(scene.attractors.len(), 1);
    }
}
