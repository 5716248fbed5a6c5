//! Gravita - a gravity slingshot puzzle game
//!
//! Core modules:
//! - `sim`: Simulation core (bodies, gravity, portals, chords, sling, stepping)
//! - `session`: Tick driver bound to an injected frame source
//! - `editor`: Scene authoring model
//! - `levels`: Level records and the level library
//! - `persistence`: Storage backends for the level library
//! - `platform`: Frame source abstractions
//! - `tuning`: Data-driven physics and sizing constants

pub mod editor;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use editor::{SceneEditor, Selection};
pub use levels::{LevelLibrary, LevelRecord};
pub use session::{Phase, Session};
pub use tuning::{BoundsPolicy, Tuning};

/// Game configuration constants
pub mod consts {
    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub const G: f64 = 6.67408e-11;
    /// Physical meters represented by one density-independent pixel
    pub const METERS_PER_DIP: f32 = 5000.0;
    /// Default screen density when the host does not report one
    pub const PIXELS_PER_DIP: f32 = 3.0;

    /// Mass of an attractor per strength level (kg)
    pub const ATTRACTOR_UNIT_MASS: f64 = 2e23;
    /// Mass of the launch point and the aim (kg)
    pub const POINT_MASS: f64 = 1.0;
    /// Highest attractor strength level
    pub const MAX_F: u8 = 6;

    /// Entity sizes (dip)
    pub const POINT_SIZE: f32 = 6.0;
    pub const AIM_SIZE: f32 = 16.0;
    pub const ATTRACTOR_SIZE: f32 = 12.0;
    pub const PORTAL_SIZE: f32 = 14.0;
    /// Length of the dashed direction cursor drawn while aiming
    pub const CURSOR_SIZE: f32 = 40.0;

    /// Halo radius multipliers (edit hit-testing only)
    pub const AIM_HALO: f32 = 4.0;
    pub const POINT_HALO: f32 = 8.0;
    pub const ATTRACTOR_HALO: f32 = 4.0;
    pub const PORTAL_HALO: f32 = 4.0;
    pub const CHORD_HALO: f32 = 4.0;

    /// Velocity offset applied on chord deflection (pixels/s)
    pub const CHORD_IMPULSE: f32 = 200.0;

    /// Radius scale for level-list thumbnails
    pub const THUMBNAIL_SCALE: f32 = 0.2;
    /// Trace path length as a fraction of viewport height
    pub const TRACE_FRACTION: f32 = 1.0;

    /// Default ratio positions of a fresh scene
    pub const DEFAULT_AIM: (f32, f32) = (0.8, 0.2);
    pub const DEFAULT_POINT: (f32, f32) = (0.2, 0.8);
    pub const DEFAULT_ATTRACTOR: (f32, f32) = (0.5, 0.5);
}
