//! Level records and the ordered level library
//!
//! Records hold ratio positions only. Scenes built from them still need
//! [`Scene::init`] against a viewport before play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::persistence::{LevelStore, Result, StoreError};
use crate::sim::{Attractor, Chord, Portal, Scene};
use crate::tuning::Tuning;

/// A single ratio position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(rename = "xR")]
    pub x_r: f32,
    #[serde(rename = "yR")]
    pub y_r: f32,
}

impl From<Vec2> for PositionRecord {
    fn from(v: Vec2) -> Self {
        Self { x_r: v.x, y_r: v.y }
    }
}

impl From<PositionRecord> for Vec2 {
    fn from(p: PositionRecord) -> Self {
        Vec2::new(p.x_r, p.y_r)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractorRecord {
    pub id: u32,
    #[serde(rename = "xR")]
    pub x_r: f32,
    #[serde(rename = "yR")]
    pub y_r: f32,
    /// Strength level
    pub f: u8,
    /// False for a repulsor
    pub attracting: bool,
}

/// Two-ended entity (portal or chord)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualRecord {
    #[serde(rename = "xR")]
    pub x_r: f32,
    #[serde(rename = "yR")]
    pub y_r: f32,
    #[serde(rename = "xR2")]
    pub x_r2: f32,
    #[serde(rename = "yR2")]
    pub y_r2: f32,
}

impl DualRecord {
    fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            x_r: a.x,
            y_r: a.y,
            x_r2: b.x,
            y_r2: b.y,
        }
    }

    fn ends(&self) -> (Vec2, Vec2) {
        (Vec2::new(self.x_r, self.y_r), Vec2::new(self.x_r2, self.y_r2))
    }
}

/// One persisted level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub aim: PositionRecord,
    pub point: PositionRecord,
    #[serde(default)]
    pub attractors: Vec<AttractorRecord>,
    #[serde(default)]
    pub portals: Vec<DualRecord>,
    #[serde(default)]
    pub chords: Vec<DualRecord>,
}

impl From<&Scene> for LevelRecord {
    /// Reads ratio positions; normalize the scene first if it was edited
    fn from(scene: &Scene) -> Self {
        Self {
            aim: scene.aim.ratio.into(),
            point: scene.point.ratio.into(),
            attractors: scene
                .attractors
                .iter()
                .map(|a| AttractorRecord {
                    id: a.id,
                    x_r: a.body.ratio.x,
                    y_r: a.body.ratio.y,
                    f: a.strength(),
                    attracting: a.is_attracting(),
                })
                .collect(),
            portals: scene
                .portals
                .iter()
                .map(|p| DualRecord::new(p.body.ratio, p.exit_ratio))
                .collect(),
            chords: scene
                .chords
                .iter()
                .map(|c| DualRecord::new(c.body.ratio, c.end_ratio))
                .collect(),
        }
    }
}

impl LevelRecord {
    /// Build a fresh, uninitialized scene
    pub fn to_scene(&self, tuning: &Tuning) -> Scene {
        let mut scene = Scene::new(self.aim.into(), self.point.into());
        scene.attractors = self
            .attractors
            .iter()
            .map(|a| Attractor::new(a.id, Vec2::new(a.x_r, a.y_r), a.f, a.attracting, tuning))
            .collect();
        scene.attractors.sort_by_key(|a| a.id);
        scene.portals = self
            .portals
            .iter()
            .map(|p| {
                let (entry, exit) = p.ends();
                Portal::new(entry, exit)
            })
            .collect();
        scene.chords = self
            .chords
            .iter()
            .map(|c| {
                let (start, end) = c.ends();
                Chord::new(start, end)
            })
            .collect();
        scene
    }

    /// Check strength levels against `max_f`, ratio values and id uniqueness
    pub fn validate(&self, max_f: u8) -> std::result::Result<(), String> {
        let mut ratios = vec![self.aim.x_r, self.aim.y_r, self.point.x_r, self.point.y_r];
        for a in &self.attractors {
            if !(1..=max_f).contains(&a.f) {
                return Err(format!("attractor {} strength {} out of range", a.id, a.f));
            }
            ratios.extend([a.x_r, a.y_r]);
        }
        for d in self.portals.iter().chain(&self.chords) {
            ratios.extend([d.x_r, d.y_r, d.x_r2, d.y_r2]);
        }
        if ratios.iter().any(|r| !r.is_finite()) {
            return Err("non-finite position".into());
        }

        let mut ids: Vec<u32> = self.attractors.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err("duplicate attractor id".into());
        }
        Ok(())
    }
}

/// Ordered level collection
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    levels: Vec<LevelRecord>,
}

impl LevelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a store; any failure leaves the library empty
    pub fn load(store: &impl LevelStore, tuning: &Tuning) -> Self {
        match Self::try_load(store, tuning) {
            Ok(library) => {
                log::info!("Loaded {} levels", library.len());
                library
            }
            Err(e) => {
                log::warn!("Level data unusable, starting empty: {}", e);
                Self::new()
            }
        }
    }

    /// Load from a store, rejecting the whole collection on any bad record.
    /// Strength levels are checked against `tuning.max_strength`.
    pub fn try_load(store: &impl LevelStore, tuning: &Tuning) -> Result<Self> {
        let Some(json) = store.read()? else {
            return Ok(Self::new());
        };
        let levels: Vec<LevelRecord> = serde_json::from_str(&json)?;
        for (index, level) in levels.iter().enumerate() {
            level
                .validate(tuning.max_strength)
                .map_err(|reason| StoreError::InvalidLevel { index, reason })?;
        }
        Ok(Self { levels })
    }

    /// Overwrite the store with the full collection
    pub fn save(&self, store: &mut impl LevelStore) -> Result<()> {
        let json = serde_json::to_string(&self.levels)?;
        store.write(&json)?;
        log::info!("Saved {} levels", self.levels.len());
        Ok(())
    }

    /// Append a (normalized) scene. Returns its index.
    pub fn push(&mut self, scene: &Scene) -> usize {
        self.levels.push(LevelRecord::from(scene));
        self.levels.len() - 1
    }

    /// A fresh scene for level `index`
    pub fn get(&self, index: usize, tuning: &Tuning) -> Option<Scene> {
        self.levels.get(index).map(|level| level.to_scene(tuning))
    }

    pub fn remove(&mut self, index: usize) -> Option<LevelRecord> {
        (index < self.levels.len()).then(|| self.levels.remove(index))
    }

    pub fn records(&self) -> &[LevelRecord] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
