//! Terrella Core - geographic anchoring, marker registry, and occlusion logic
//!
//! This crate provides the engine-free logic for the Terrella globe viewer:
//! - Geographic-to-3D anchor projection on the globe surface
//! - Append-only marker registry with stable 1-based identifiers
//! - Location intake validation and parsing
//! - Occlusion decision and screen-offset math for the per-frame passes

pub mod geo;
pub mod intake;
pub mod occlusion;
pub mod registry;
pub mod screen;

pub use geo::{anchor_point, from_spherical, GeoLocation, GLOBE_RADIUS};
pub use intake::{seed_locations, IntakeError, LocationForm};
pub use occlusion::{Occlusion, SurfaceHit};
pub use registry::{MarkerId, MarkerRecord, MarkerRegistry};
pub use screen::screen_offset;
