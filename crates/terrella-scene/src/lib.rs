//! Terrella Scene - 3D globe rendering and marker overlay systems
//!
//! This crate provides the Bevy side of the Terrella viewer: the globe and
//! atmosphere scene, the orbit camera, marker spawning with their stems and
//! screen-space overlays, the per-frame occlusion and projection passes,
//! and the egui control panel.

pub mod camera;
pub mod globe;
pub mod markers;
pub mod overlay;
pub mod sun;
pub mod ui;

use bevy::prelude::*;

/// Plugin that sets up the complete globe scene
pub struct TerrellaScenePlugin;

impl Plugin for TerrellaScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(globe::GlobePlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(markers::MarkersPlugin)
            .add_plugins(overlay::OverlayPlugin)
            .add_plugins(sun::SunPlugin)
            .add_plugins(ui::UiPlugin);
    }
}

// Re-export commonly used types
pub use camera::{CameraSettings, MainCamera};
pub use globe::{AtmosphereShell, GlobeSettings, GlobeSurface};
pub use markers::Markers;
pub use sun::SunSettings;
