//! Simulation module
//!
//! All gameplay physics lives here. This module is pure:
//! - No rendering, storage or platform dependencies
//! - Time only enters as the `dt` passed to [`step`]
//! - Stable iteration order (attractors by id)

pub mod attractor;
pub mod body;
pub mod chord;
pub mod geometry;
pub mod gravity;
pub mod portal;
pub mod scene;
pub mod sling;
pub mod tick;
pub mod trace;

pub use attractor::Attractor;
pub use body::{Body, BodyKind, Viewport};
pub use chord::Chord;
pub use geometry::{distance, distance_vector, magnitude, scale};
pub use gravity::Gravity;
pub use portal::Portal;
pub use scene::Scene;
pub use sling::{Sling, SlingState, SlingVisuals};
pub use tick::{Outcome, StepReport, check_finished, step};
pub use trace::Trace;
