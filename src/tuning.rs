//! Physics and sizing tuning
//!
//! Loaded from an optional JSON file; any missing field falls back to the
//! compiled-in defaults from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BodyKind;

/// What happens when the launch point leaves the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundsPolicy {
    /// Velocity component flips on every out-of-range write
    #[default]
    Bounce,
    /// The run ends as a failure
    Fail,
}

impl BoundsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundsPolicy::Bounce => "Bounce",
            BoundsPolicy::Fail => "Fail",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounce" => Some(BoundsPolicy::Bounce),
            "fail" | "failure" => Some(BoundsPolicy::Fail),
            _ => None,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Gravitational constant
    pub gravitational_constant: f64,
    /// Meters represented by one dip
    pub meters_per_dip: f32,
    /// Mass of one attractor strength level
    pub attractor_unit_mass: f64,
    /// Highest attractor strength level
    pub max_strength: u8,
    /// Whether newly created attractors are pulled by other attractors
    pub attractors_attractable: bool,
    /// Chord deflection velocity offset (pixels/s)
    pub chord_impulse: f32,
    /// Out-of-viewport behavior for the launch point
    pub bounds: BoundsPolicy,

    // === Display ===
    /// Screen density
    pub pixels_per_dip: f32,
    pub point_size: f32,
    pub aim_size: f32,
    pub attractor_size: f32,
    pub portal_size: f32,
    pub cursor_size: f32,
    /// Trace length relative to viewport height
    pub trace_fraction: f32,

    // === Halos ===
    pub aim_halo: f32,
    pub point_halo: f32,
    pub attractor_halo: f32,
    pub portal_halo: f32,
    pub chord_halo: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            meters_per_dip: METERS_PER_DIP,
            attractor_unit_mass: ATTRACTOR_UNIT_MASS,
            max_strength: MAX_F,
            attractors_attractable: false,
            chord_impulse: CHORD_IMPULSE,
            bounds: BoundsPolicy::Bounce,

            pixels_per_dip: PIXELS_PER_DIP,
            point_size: POINT_SIZE,
            aim_size: AIM_SIZE,
            attractor_size: ATTRACTOR_SIZE,
            portal_size: PORTAL_SIZE,
            cursor_size: CURSOR_SIZE,
            trace_fraction: TRACE_FRACTION,

            aim_halo: AIM_HALO,
            point_halo: POINT_HALO,
            attractor_halo: ATTRACTOR_HALO,
            portal_halo: PORTAL_HALO,
            chord_halo: CHORD_HALO,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Meters per pixel at the configured density
    pub fn meters_per_pixel(&self) -> f32 {
        self.meters_per_dip / self.pixels_per_dip
    }

    /// Base render radius in pixels, before strength scaling
    pub fn base_radius(&self, kind: BodyKind) -> f32 {
        let dip = match kind {
            BodyKind::Aim => self.aim_size,
            BodyKind::Point => self.point_size,
            BodyKind::Attractor => self.attractor_size,
            BodyKind::Portal => self.portal_size,
            BodyKind::Chord => 0.0,
        };
        dip * self.pixels_per_dip
    }

    /// Halo multiplier for a body kind
    pub fn halo_factor(&self, kind: BodyKind) -> f32 {
        match kind {
            BodyKind::Aim => self.aim_halo,
            BodyKind::Point => self.point_halo,
            BodyKind::Attractor => self.attractor_halo,
            BodyKind::Portal => self.portal_halo,
            BodyKind::Chord => self.chord_halo,
        }
    }

    /// Sling cursor length in pixels
    pub fn cursor_length(&self) -> f32 {
        self.cursor_size * self.pixels_per_dip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pixels_per_dip": 2.0, "bounds": "Fail" }"#).unwrap();
        assert_eq!(tuning.pixels_per_dip, 2.0);
        assert_eq!(tuning.bounds, BoundsPolicy::Fail);
        assert_eq!(tuning.max_strength, MAX_F);
        assert_eq!(tuning.gravitational_constant, G);
    }

    #[test]
    fn test_meters_per_pixel() {
        let tuning = Tuning {
            pixels_per_dip: 2.0,
            ..Default::default()
        };
        assert!((tuning.meters_per_pixel() - 2500.0).abs() < 0.001);
    }

    #[test]
    fn test_chord_has_no_radius() {
        let tuning = Tuning::default();
        assert_eq!(tuning.base_radius(BodyKind::Chord), 0.0);
        assert!(tuning.base_radius(BodyKind::Aim) > tuning.base_radius(BodyKind::Point));
    }

    #[test]
    fn test_bounds_policy_from_str() {
        assert_eq!(BoundsPolicy::from_str("BOUNCE"), Some(BoundsPolicy::Bounce));
        assert_eq!(BoundsPolicy::from_str("fail"), Some(BoundsPolicy::Fail));
        assert_eq!(BoundsPolicy::from_str("wrap"), None);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("gravita_missing_tuning_file.json");
        let _ = std::fs::remove_file(&path);
        let tuning = Tuning::load(&path);
        assert_eq!(tuning.chord_impulse, CHORD_IMPULSE);
    }
}
