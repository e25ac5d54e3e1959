//! Sun placement and atmosphere tinting

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use terrella_core::from_spherical;

use crate::globe::{AtmosphereShell, ATMOSPHERE_ALPHA};

/// Sun direction in spherical angles plus the atmosphere color pair.
///
/// The angles follow the same convention as geographic anchoring: `phi` is
/// measured from the +Y pole, `theta` around it.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct SunSettings {
    /// Polar angle in `[0, pi]`
    pub phi: f32,
    /// Azimuthal angle in `[-pi, pi]`
    pub theta: f32,
    /// Atmosphere tint when the sun stands high
    pub day_color: [f32; 3],
    /// Atmosphere tint when the sun grazes the horizon
    pub twilight_color: [f32; 3],
}

impl Default for SunSettings {
    fn default() -> Self {
        Self {
            phi: FRAC_PI_2,
            theta: 0.5,
            day_color: [0.0, 0.667, 1.0],
            twilight_color: [1.0, 0.4, 0.0],
        }
    }
}

impl SunSettings {
    /// Unit direction from the globe center toward the sun
    pub fn direction(&self) -> Vec3 {
        let [x, y, z] = from_spherical(1.0, f64::from(self.phi), f64::from(self.theta));
        Vec3::new(x as f32, y as f32, z as f32)
    }
}

/// Marker component for the directional sun light
#[derive(Component)]
pub struct SunLight;

pub struct SunPlugin;

impl Plugin for SunPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SunSettings>()
            .add_systems(Startup, spawn_sun)
            .add_systems(Update, apply_sun_settings);
    }
}

fn spawn_sun(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(SunSettings::default().direction() * 20.0)
            .looking_at(Vec3::ZERO, Vec3::Y),
        SunLight,
    ));
}

/// Reposition the light and retint the atmosphere when the settings change
fn apply_sun_settings(
    settings: Res<SunSettings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut suns: Query<&mut Transform, With<SunLight>>,
    shells: Query<&MeshMaterial3d<StandardMaterial>, With<AtmosphereShell>>,
) {
    if !settings.is_changed() {
        return;
    }
    let direction = settings.direction();
    if let Ok(mut transform) = suns.single_mut() {
        *transform =
            Transform::from_translation(direction * 20.0).looking_at(Vec3::ZERO, Vec3::Y);
    }

    // Shell tint blends from twilight to day as the sun climbs
    let Ok(shell_material) = shells.single() else {
        return;
    };
    if let Some(material) = materials.get_mut(&shell_material.0) {
        let t = (direction.y * 0.5 + 0.5).clamp(0.0, 1.0);
        let blend = |low: f32, high: f32| low + (high - low) * t;
        material.base_color = Color::srgba(
            blend(settings.twilight_color[0], settings.day_color[0]),
            blend(settings.twilight_color[1], settings.day_color[1]),
            blend(settings.twilight_color[2], settings.day_color[2]),
            ATMOSPHERE_ALPHA,
        );
    }
}
